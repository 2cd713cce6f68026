//! The conversion routine: decode, flatten transparency when needed, re-encode.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader, Rgb, RgbImage};
use tracing::debug;

use crate::utils::{format_from_path, ConvertError, ConvertResult, ImageFormat};

/// Encode quality applied uniformly to every non-HEIC target.
///
/// Only lossy formats (JPEG) are actually affected by it.
const ENCODE_QUALITY: u8 = 95;

/// Convert the image at `input_path` to the format implied by `output_path`.
///
/// Images with an alpha channel are flattened onto a white background before
/// encoding to JPEG, which cannot represent transparency. All decoder and
/// encoder resources are scoped to this call.
pub fn convert(input_path: &Path, output_path: &Path) -> ConvertResult<()> {
    let source = format_from_path(input_path)?;
    let target = format_from_path(output_path)?;

    let decoded = decode(input_path, source)?;
    debug!(
        "Decoded {} ({:?}, {}x{}, alpha: {})",
        input_path.display(),
        source,
        decoded.width(),
        decoded.height(),
        decoded.color().has_alpha()
    );

    let image = if !target.supports_alpha() && decoded.color().has_alpha() {
        flatten_onto_white(&decoded)
    } else {
        decoded
    };

    encode(&image, output_path, target)?;
    debug!("Encoded {} ({:?})", output_path.display(), target);
    Ok(())
}

fn decode(path: &Path, format: ImageFormat) -> ConvertResult<DynamicImage> {
    match format {
        #[cfg(feature = "heif")]
        ImageFormat::Heic => super::heif::decode(path),
        #[cfg(not(feature = "heif"))]
        ImageFormat::Heic => Err(ConvertError::decode(
            path,
            "HEIC support not compiled in (enable the `heif` feature)",
        )),
        _ => ImageReader::open(path)
            .map_err(|e| ConvertError::decode(path, e))?
            .with_guessed_format()
            .map_err(|e| ConvertError::decode(path, e))?
            .decode()
            .map_err(|e| ConvertError::decode(path, e)),
    }
}

fn encode(image: &DynamicImage, path: &Path, format: ImageFormat) -> ConvertResult<()> {
    match format {
        #[cfg(feature = "heif")]
        ImageFormat::Heic => super::heif::encode(image, path, ENCODE_QUALITY),
        #[cfg(not(feature = "heif"))]
        ImageFormat::Heic => Err(ConvertError::encode(
            path,
            "HEIC support not compiled in (enable the `heif` feature)",
        )),
        ImageFormat::Jpeg => {
            let file = File::create(path).map_err(|e| ConvertError::encode(path, e))?;
            let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), ENCODE_QUALITY);
            // The alpha check above guarantees an opaque image here; JPEG
            // additionally needs 8-bit RGB.
            encoder
                .encode_image(&image.to_rgb8())
                .map_err(|e| ConvertError::encode(path, e))
        }
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Tiff | ImageFormat::Gif => {
            let target = format
                .to_image_format()
                .ok_or_else(|| ConvertError::encode(path, "no codec for format"))?;
            image
                .save_with_format(path, target)
                .map_err(|e| ConvertError::encode(path, e))
        }
    }
}

/// Composite `image` onto an opaque white background of identical dimensions,
/// using its alpha channel as the mask.
///
/// White is load-bearing: dropping the channel or flattening onto black
/// changes the rendered output for any partially transparent source.
fn flatten_onto_white(image: &DynamicImage) -> DynamicImage {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut flattened = RgbImage::new(width, height);

    for (source, target) in rgba.pixels().zip(flattened.pixels_mut()) {
        let [r, g, b, a] = source.0;
        let alpha = a as u32;
        let blend = |c: u8| (((c as u32) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        *target = Rgb([blend(r), blend(g), blend(b)]);
    }

    DynamicImage::ImageRgb8(flattened)
}
