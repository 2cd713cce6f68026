//! Filesystem helpers: staging names, sanitized filenames, best-effort cleanup.

use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use crate::utils::error::{ConvertResult, PathError};

/// Get file extension as lowercase string
pub fn get_extension(path: impl AsRef<Path>) -> ConvertResult<String> {
    let path = path.as_ref();
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| PathError::NoExtension(path.to_path_buf()).into())
}

/// Reduce an uploaded filename to a safe base name (no extension).
///
/// Keeps ASCII alphanumerics, `-`, `_` and `.`; everything else (path
/// separators included) becomes `_`. Falls back to `file` when nothing
/// printable survives.
pub fn sanitize_file_stem(original_name: &str) -> String {
    let stem = Path::new(original_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Build a collision-free filename `<base>_<uuid>.<ext>` for staging.
pub fn unique_file_name(base: &str, unique_id: &Uuid, extension: &str) -> String {
    format!("{base}_{unique_id}.{extension}")
}

/// Removes tracked files when dropped, on every exit path.
///
/// Cleanup failures are logged and swallowed; they must never mask the
/// primary conversion result.
#[derive(Debug, Default)]
pub struct TempFileGuard {
    paths: Vec<PathBuf>,
}

impl TempFileGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        for path in &self.paths {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!("Failed to remove temp file {}: {}", path.display(), e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_hostile_names() {
        assert_eq!(sanitize_file_stem("holiday photo.png"), "holiday_photo");
        assert_eq!(sanitize_file_stem("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_stem("............"), "file");
        assert_eq!(sanitize_file_stem("IMG_0042.HEIC"), "IMG_0042");
    }

    #[test]
    fn unique_names_differ_for_identical_originals() {
        let a = unique_file_name("photo", &Uuid::new_v4(), "jpg");
        let b = unique_file_name("photo", &Uuid::new_v4(), "jpg");
        assert_ne!(a, b);
        assert!(a.starts_with("photo_") && a.ends_with(".jpg"));
    }

    #[test]
    fn guard_removes_tracked_files_and_ignores_missing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("staged.png");
        let absent = dir.path().join("never-written.jpg");
        std::fs::write(&present, b"x").unwrap();

        {
            let mut guard = TempFileGuard::new();
            guard.track(&present);
            guard.track(&absent);
        }

        assert!(!present.exists());
        assert!(!absent.exists());
    }
}
