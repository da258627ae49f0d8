//! JPEG encoding of the final crop.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use thiserror::Error;

/// Errors that can occur while producing the output raster.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder failed or produced no output
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),

    /// The background encode task was cancelled or panicked
    #[error("Encode task interrupted: {0}")]
    Interrupted(String),
}

/// Encode an RGB image to JPEG bytes.
///
/// `quality` is clamped to 1-100. The crop pipeline uses 90.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    if bytes.is_empty() {
        return Err(EncodeError::EncodingFailed("encoder produced no output".to_string()));
    }
    Ok(bytes)
}
