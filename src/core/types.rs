//! Core types for conversion jobs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::{format_from_path, ConvertResult, ImageFormat};

/// A single conversion job.
///
/// Both paths carry an implicit format determined by their file extension;
/// the job is transient and owns no resources beyond the two path names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Path to the source image
    pub input_path: PathBuf,
    /// Path the converted image is written to
    pub output_path: PathBuf,
}

impl ConversionRequest {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    /// Source and target formats implied by the two extensions.
    pub fn formats(&self) -> ConvertResult<(ImageFormat, ImageFormat)> {
        let source = format_from_path(&self.input_path)?;
        let target = format_from_path(&self.output_path)?;
        Ok((source, target))
    }

    pub fn input(&self) -> &Path {
        &self.input_path
    }

    pub fn output(&self) -> &Path {
        &self.output_path
    }
}
