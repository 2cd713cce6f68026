//! HEIC decode/encode through libheif.
//!
//! The `image` crate has no HEIF codec, so this module bridges to the system
//! libheif. Everything crosses the boundary as interleaved 8-bit RGBA.

use std::path::Path;

use image::{DynamicImage, RgbaImage};
use lazy_static::lazy_static;
use libheif_rs::{
    Channel, ColorSpace, CompressionFormat, EncoderQuality, HeifContext, Image as HeifImage,
    LibHeif, RgbChroma,
};

use crate::utils::{ConvertError, ConvertResult};

lazy_static! {
    /// Process-wide libheif handle.
    ///
    /// Initializes the library (codec plugin registration included) on first
    /// use; subsequent conversions share it. Idempotent by construction.
    static ref LIB_HEIF: LibHeif = LibHeif::new();
}

const RGBA_BITS_PER_PIXEL: u8 = 32;
const BYTES_PER_PIXEL: usize = 4;

/// Decode the primary image of a HEIC file into an RGBA bitmap.
pub fn decode(path: &Path) -> ConvertResult<DynamicImage> {
    let context = HeifContext::read_from_file(path.to_string_lossy().as_ref())
        .map_err(|e| ConvertError::decode(path, e))?;
    let handle = context
        .primary_image_handle()
        .map_err(|e| ConvertError::decode(path, e))?;

    let decoded = LIB_HEIF
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgba), None)
        .map_err(|e| ConvertError::decode(path, e))?;

    let width = decoded.width();
    let height = decoded.height();
    let planes = decoded.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| ConvertError::decode(path, "decoded image has no interleaved plane"))?;

    // libheif rows are stride-padded; repack them tightly.
    let row_bytes = width as usize * BYTES_PER_PIXEL;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * plane.stride;
        pixels.extend_from_slice(&plane.data[start..start + row_bytes]);
    }

    let buffer = RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| ConvertError::decode(path, "decoded pixel buffer has unexpected length"))?;
    Ok(DynamicImage::ImageRgba8(buffer))
}

/// Encode an image as HEIC (HEVC compression) at the given lossy quality.
pub fn encode(image: &DynamicImage, path: &Path, quality: u8) -> ConvertResult<()> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut heif_image = HeifImage::new(width, height, ColorSpace::Rgb(RgbChroma::Rgba))
        .map_err(|e| ConvertError::encode(path, e))?;
    heif_image
        .create_plane(Channel::Interleaved, width, height, RGBA_BITS_PER_PIXEL)
        .map_err(|e| ConvertError::encode(path, e))?;

    {
        let planes = heif_image.planes_mut();
        let plane = planes
            .interleaved
            .ok_or_else(|| ConvertError::encode(path, "image has no interleaved plane"))?;
        let row_bytes = width as usize * BYTES_PER_PIXEL;
        for (row, source) in rgba.as_raw().chunks_exact(row_bytes).enumerate() {
            let start = row * plane.stride;
            plane.data[start..start + row_bytes].copy_from_slice(source);
        }
    }

    let mut context = HeifContext::new().map_err(|e| ConvertError::encode(path, e))?;
    let mut encoder = LIB_HEIF
        .encoder_for_format(CompressionFormat::Hevc)
        .map_err(|e| ConvertError::encode(path, e))?;
    encoder
        .set_quality(EncoderQuality::Lossy(quality))
        .map_err(|e| ConvertError::encode(path, e))?;

    context
        .encode_image(&heif_image, &mut encoder, None)
        .map_err(|e| ConvertError::encode(path, e))?;
    context
        .write_to_file(path.to_string_lossy().as_ref())
        .map_err(|e| ConvertError::encode(path, e))?;

    Ok(())
}
