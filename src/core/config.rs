//! Runtime configuration for the converter shells.
//!
//! The upload/output directories, size cap and bind address are constructed
//! once at startup and passed into the web shell as shared state; nothing in
//! the crate reads them ambiently.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::utils::ConvertResult;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Converter configuration shared by the web shell and the conversion core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where uploads are staged before conversion
    pub upload_dir: PathBuf,
    /// Directory where converted outputs are written
    pub output_dir: PathBuf,
    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
    /// Address the HTTP server binds to
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("converted"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            bind_addr: "0.0.0.0:5000".to_string(),
        }
    }
}

impl AppConfig {
    /// Build a config from defaults plus `IMGCONV_*` environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("IMGCONV_UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("IMGCONV_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = env::var("IMGCONV_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(raw) = env::var("IMGCONV_MAX_UPLOAD_BYTES") {
            match raw.parse::<usize>() {
                Ok(bytes) if bytes > 0 => config.max_upload_bytes = bytes,
                _ => warn!(
                    "Ignoring invalid IMGCONV_MAX_UPLOAD_BYTES value: {:?}",
                    raw
                ),
            }
        }

        config
    }

    /// Create the upload and output directories if they are missing.
    pub async fn ensure_dirs(&self) -> ConvertResult<()> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.output_dir).await?;
        Ok(())
    }

    /// The size cap in whole mebibytes, for user-facing messages.
    pub fn max_upload_mib(&self) -> usize {
        self.max_upload_bytes / (1024 * 1024)
    }
}
