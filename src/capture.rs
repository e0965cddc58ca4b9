//! Image upload from a file path
//!
//! Reads one file, rejects anything that is not an image and shrinks
//! oversized photos before they are sent to the model.

use crate::error::{DetoxError, Result};
use desk_detox_common::CapturedImage;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::Path;

const JPEG_QUALITY: u8 = 85;

pub fn load_image(path: &Path, max_size: u32) -> Result<CapturedImage> {
    if !path.is_file() {
        return Err(DetoxError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let captured = CapturedImage::from_bytes(bytes, &name)?;
    downscale(captured, max_size)
}

/// Re-encode as JPEG if the long edge exceeds `max_size`
///
/// Formats the decoder does not know (HEIC) are passed through as-is.
pub fn downscale(captured: CapturedImage, max_size: u32) -> Result<CapturedImage> {
    let decoded = match image::load_from_memory(&captured.bytes) {
        Ok(img) => img,
        Err(e) => {
            tracing::debug!(mime = %captured.mime_type, error = %e, "not decodable, sending original");
            return Ok(captured);
        }
    };

    if max_size == 0 || decoded.width().max(decoded.height()) <= max_size {
        return Ok(captured);
    }

    let resized = decoded.resize(max_size, max_size, FilterType::Lanczos3);
    tracing::debug!(
        from = %format!("{}x{}", decoded.width(), decoded.height()),
        to = %format!("{}x{}", resized.width(), resized.height()),
        "downscaled image"
    );

    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut buffer = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY))
        .map_err(|e| DetoxError::ImageLoad(e.to_string()))?;

    Ok(CapturedImage::new(buffer, "image/jpeg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut cursor = Cursor::new(Vec::new());
        img.write_to(&mut cursor, ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_small_image_untouched() {
        let captured = CapturedImage::from_bytes(png_bytes(10, 8), "small.png").unwrap();
        let result = downscale(captured.clone(), 100).unwrap();
        assert_eq!(result, captured);
        assert_eq!(result.mime_type, "image/png");
    }

    #[test]
    fn test_large_image_downscaled_to_jpeg() {
        let captured = CapturedImage::from_bytes(png_bytes(400, 200), "big.png").unwrap();
        let result = downscale(captured, 100).unwrap();
        assert_eq!(result.mime_type, "image/jpeg");

        let decoded = image::load_from_memory(&result.bytes).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 50);
    }

    #[test]
    fn test_missing_file() {
        let err = load_image(Path::new("/nonexistent/desk-12345.jpg"), 1600).unwrap_err();
        assert!(matches!(err, DetoxError::FileNotFound(_)));
    }
}
