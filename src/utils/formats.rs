use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::error::{ConvertError, ConvertResult, PathError};

/// Every extension the converter accepts, lowercase.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["heic", "jpg", "jpeg", "png", "bmp", "tiff", "gif"];

/// Extensions offered as output targets by the web form.
///
/// HEIC stays out of this list (matching the original tool's output set) even
/// though the core routine can encode it; the CLI accepts it directly.
pub const OUTPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Heic,
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Gif,
}

impl ImageFormat {
    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Heic => &["heic"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::Bmp => &["bmp"],
            Self::Tiff => &["tiff"],
            Self::Gif => &["gif"],
        }
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &'static str {
        self.extensions()[0]
    }

    /// Check if the extension matches this format
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions().contains(&ext.as_str())
    }

    /// Whether the encoded form can carry an alpha channel.
    ///
    /// JPEG cannot; images with transparency are flattened before encoding to it.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, Self::Jpeg)
    }

    /// The `image` crate format for this member, `None` for HEIC which goes
    /// through the libheif path instead.
    pub fn to_image_format(&self) -> Option<image::ImageFormat> {
        match self {
            Self::Heic => None,
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Png => Some(image::ImageFormat::Png),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            Self::Tiff => Some(image::ImageFormat::Tiff),
            Self::Gif => Some(image::ImageFormat::Gif),
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ConvertError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "heic" => Ok(Self::Heic),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "tiff" => Ok(Self::Tiff),
            "gif" => Ok(Self::Gif),
            _ => Err(ConvertError::unsupported_format(ext)),
        }
    }
}

/// Get format from a file path's extension (case-insensitive)
pub fn format_from_path(path: impl AsRef<Path>) -> ConvertResult<ImageFormat> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| PathError::NoExtension(path.to_path_buf()))?;

    ImageFormat::from_str(ext)
}

/// MIME type derived naively from the output extension.
///
/// The original service sent `image/<extension>` verbatim (so `image/jpg`
/// rather than the canonical `image/jpeg`); kept for compatibility.
pub fn naive_mime_type(extension: &str) -> String {
    format!("image/{}", extension.to_lowercase())
}
