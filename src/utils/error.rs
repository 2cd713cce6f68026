//! Error types for the image converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// File path errors.
#[derive(Error, Debug, Serialize)]
pub enum PathError {
    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a file
    #[error("Not a file: {0}")]
    NotFile(PathBuf),
    /// Path has no usable extension
    #[error("File has no extension: {0}")]
    NoExtension(PathBuf),
    /// Parent directory of an output path does not exist
    #[error("Directory not found: {0}")]
    DirNotFound(PathBuf),
    /// IO error accessing the path
    #[error("IO error: {0}")]
    Io(String),
}

/// Main error type for the converter.
///
/// Every failure in the conversion pipeline is expressed as one of these
/// variants before it reaches a shell (web handler or CLI).
#[derive(Error, Debug, Serialize)]
pub enum ConvertError {
    /// Extension outside the supported set
    #[error("Unsupported file format: {extension}. Supported formats are {supported}")]
    UnsupportedFormat { extension: String, supported: String },

    /// No file was provided with the request
    #[error("No file provided")]
    MissingFile,

    /// Input could not be parsed as an image
    #[error("Failed to decode '{path}': {reason}")]
    Decode { path: String, reason: String },

    /// Output could not be encoded or written
    #[error("Failed to encode '{path}': {reason}")]
    Encode { path: String, reason: String },

    /// Request body exceeded the configured size cap
    #[error("File too large (max {max_mib}MB)")]
    PayloadTooLarge { max_mib: usize },

    /// Path validation failed
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Convenience result type for converter operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

// Helper methods for error creation
impl ConvertError {
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
            supported: crate::utils::formats::SUPPORTED_EXTENSIONS.join(", "),
        }
    }

    pub fn decode(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn encode(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::Encode {
            path: path.as_ref().display().to_string(),
            reason: reason.to_string(),
        }
    }
}

// Convert std::io::Error to ConvertError
impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// Convert io::Error to PathError
impl From<io::Error> for PathError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
