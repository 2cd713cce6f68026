//! End-to-end properties of the conversion routine across the raster formats
//! the `image` crate handles natively. HEIC paths need the system libheif and
//! real camera samples, so they are exercised manually rather than here.

use std::path::Path;

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;

use imgconv::processing::convert;
use imgconv::utils::ConvertError;

const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "gif"];

fn opaque_sample() -> DynamicImage {
    let mut img = RgbImage::new(12, 8);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([(x * 20) as u8, (y * 30) as u8, 90]);
    }
    DynamicImage::ImageRgb8(img)
}

/// Left half opaque dark red, right half fully transparent.
fn transparent_sample() -> DynamicImage {
    let mut img = RgbaImage::new(10, 10);
    for (x, _y, pixel) in img.enumerate_pixels_mut() {
        *pixel = if x < 5 {
            Rgba([180, 20, 20, 255])
        } else {
            Rgba([0, 0, 0, 0])
        };
    }
    DynamicImage::ImageRgba8(img)
}

fn write_sample(image: &DynamicImage, path: &Path) {
    image.save(path).unwrap();
}

#[test]
fn every_format_pair_produces_decodable_output() {
    let dir = TempDir::new().unwrap();

    for input_ext in RASTER_EXTENSIONS {
        for output_ext in RASTER_EXTENSIONS {
            let input = dir.path().join(format!("in_{input_ext}_{output_ext}.{input_ext}"));
            let output = dir.path().join(format!("out_{input_ext}_{output_ext}.{output_ext}"));
            write_sample(&opaque_sample(), &input);

            convert(&input, &output)
                .unwrap_or_else(|e| panic!("{input_ext} -> {output_ext} failed: {e}"));

            let reopened = image::open(&output)
                .unwrap_or_else(|e| panic!("{input_ext} -> {output_ext} not decodable: {e}"));
            assert_eq!(
                (reopened.width(), reopened.height()),
                (12, 8),
                "{input_ext} -> {output_ext} changed dimensions"
            );
        }
    }
}

#[test]
fn alpha_flattens_to_white_on_jpeg() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("transparent.png");
    let output = dir.path().join("flattened.jpg");
    write_sample(&transparent_sample(), &input);

    convert(&input, &output).unwrap();

    let reopened = image::open(&output).unwrap();
    assert!(!reopened.color().has_alpha());

    let rgb = reopened.to_rgb8();
    // JPEG is lossy; leave headroom around pure white and pure red.
    let [r, g, b] = rgb.get_pixel(8, 5).0;
    assert!(
        r >= 245 && g >= 245 && b >= 245,
        "transparent pixel should render white, got {:?}",
        [r, g, b]
    );
    let [r, g, _] = rgb.get_pixel(1, 5).0;
    assert!(r >= 150 && g <= 80, "opaque pixel should stay red");
}

#[test]
fn alpha_survives_conversion_to_png() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("transparent.gif");
    let output = dir.path().join("still-transparent.png");
    write_sample(&transparent_sample(), &input);

    convert(&input, &output).unwrap();

    let reopened = image::open(&output).unwrap();
    assert!(reopened.color().has_alpha());
}

#[test]
fn round_trip_preserves_dimensions() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("stage0.png");
    let second = dir.path().join("stage1.jpg");
    let third = dir.path().join("stage2.png");
    write_sample(&opaque_sample(), &first);

    convert(&first, &second).unwrap();
    convert(&second, &third).unwrap();

    let reopened = image::open(&third).unwrap();
    assert_eq!((reopened.width(), reopened.height()), (12, 8));
}

#[test]
fn unsupported_target_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sample.png");
    let output = dir.path().join("sample.webp");
    write_sample(&opaque_sample(), &input);

    let err = convert(&input, &output).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    assert!(!output.exists(), "no output may be written for a rejected format");
}

#[test]
fn unsupported_source_is_rejected_without_reading() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sample.webp");
    let output = dir.path().join("sample.png");
    std::fs::write(&input, b"does not matter").unwrap();

    let err = convert(&input, &output).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedFormat { .. }));
    assert!(!output.exists());
}

#[test]
fn corrupt_input_surfaces_a_decode_error_naming_the_path() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.png");
    let output = dir.path().join("broken.jpg");
    std::fs::write(&input, b"not a png at all").unwrap();

    let err = convert(&input, &output).unwrap_err();
    assert!(matches!(err, ConvertError::Decode { .. }));
    assert!(err.to_string().contains("broken.png"));
    assert!(!output.exists());
}
