//! Best-effort image normalization for web display.
//!
//! Downscale to fit 800x600 preserving aspect ratio, flatten transparency
//! onto white, re-encode as JPEG at a fixed quality. Callers treat any error
//! here as "keep the original bytes" rather than a failed upload.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageError, Rgb, RgbImage};

const MAX_WIDTH: u32 = 800;
const MAX_HEIGHT: u32 = 600;
const JPEG_QUALITY: u8 = 85;

pub fn normalize(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes)?;
    let mut rgb = flatten_onto_white(&img);
    if rgb.width() > MAX_WIDTH || rgb.height() > MAX_HEIGHT {
        rgb = DynamicImage::ImageRgb8(rgb)
            .resize(MAX_WIDTH, MAX_HEIGHT, FilterType::Lanczos3)
            .to_rgb8();
    }

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    Ok(out)
}

fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    let mut out = RgbImage::from_pixel(rgba.width(), rgba.height(), Rgb([255, 255, 255]));
    for (x, y, px) in rgba.enumerate_pixels() {
        let alpha = u32::from(px[3]);
        let blend = |c: u8| (((u32::from(c)) * alpha + 255 * (255 - alpha)) / 255) as u8;
        out.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(img: RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img).write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn small_images_are_reencoded_without_resizing() {
        let src = RgbaImage::from_pixel(40, 30, Rgba([10, 20, 30, 255]));
        let jpeg = normalize(&png_bytes(src)).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), ImageFormat::Jpeg);
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn large_images_fit_the_bounding_box_preserving_aspect() {
        let src = RgbaImage::from_pixel(1600, 600, Rgba([10, 20, 30, 255]));
        let jpeg = normalize(&png_bytes(src)).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (800, 300));
    }

    #[test]
    fn transparency_flattens_onto_white() {
        let src = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        let jpeg = normalize(&png_bytes(src)).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap().to_rgb8();
        let px = decoded.get_pixel(4, 4);
        // JPEG is lossy; fully transparent pixels must come out near white.
        assert!(px[0] > 240 && px[1] > 240 && px[2] > 240);
    }

    #[test]
    fn corrupt_input_is_an_error_not_a_panic() {
        assert!(normalize(b"definitely not an image").is_err());
    }
}
