//! Pre-conversion path validation for the CLI entry point.
//!
//! The web shell filters extensions through its allow-list before staging a
//! file; the CLI validates explicitly and refuses to run the conversion on a
//! bad path.

use std::path::Path;

use crate::utils::error::{ConvertResult, PathError};
use crate::utils::formats::format_from_path;

/// Validates the input file path and format
pub fn validate_input_path(path: &Path) -> ConvertResult<()> {
    if !path.exists() {
        return Err(PathError::NotFound(path.to_path_buf()).into());
    }

    if !path.is_file() {
        return Err(PathError::NotFile(path.to_path_buf()).into());
    }

    // This will validate the extension and format
    format_from_path(path)?;
    Ok(())
}

/// Validates the output file path and format
pub fn validate_output_path(path: &Path) -> ConvertResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(PathError::DirNotFound(parent.to_path_buf()).into());
        }
    }

    // This will validate the extension and format
    format_from_path(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConvertError;

    #[test]
    fn missing_input_is_reported_as_not_found() {
        let err = validate_input_path(Path::new("/no/such/photo.png")).unwrap_err();
        assert!(matches!(err, ConvertError::Path(PathError::NotFound(_))));
    }

    #[test]
    fn unsupported_input_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.webp");
        std::fs::write(&path, b"not an image").unwrap();

        let err = validate_input_path(&path).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    }

    #[test]
    fn output_into_missing_directory_is_rejected() {
        let err = validate_output_path(Path::new("/no/such/dir/photo.jpg")).unwrap_err();
        assert!(matches!(err, ConvertError::Path(PathError::DirNotFound(_))));
    }

    #[test]
    fn bare_output_filename_is_accepted() {
        assert!(validate_output_path(Path::new("photo.jpg")).is_ok());
    }
}
