//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::ImageDimensions;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not in a format we can recognise.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The format was recognised but the data could not be decoded.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The background decode task was cancelled or panicked.
    #[error("Decode task interrupted: {0}")]
    Interrupted(String),
}

/// Filter type for resampling the crop to its target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// Stored (pre-orientation) dimensions as they will be displayed.
    pub fn apply_to(self, width: u32, height: u32) -> ImageDimensions {
        if self.swaps_dimensions() {
            ImageDimensions::new(height, width)
        } else {
            ImageDimensions::new(width, height)
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded, orientation-corrected source image.
///
/// Pixels are kept as RGB8; the output format carries no alpha channel.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: image::RgbImage,
}

impl DecodedImage {
    /// Wrap an already decoded RGB buffer.
    pub fn from_rgb_image(pixels: image::RgbImage) -> Self {
        Self { pixels }
    }

    /// Intrinsic dimensions in source pixels.
    pub fn dimensions(&self) -> ImageDimensions {
        let (width, height) = self.pixels.dimensions();
        ImageDimensions::new(width, height)
    }

    pub fn as_rgb_image(&self) -> &image::RgbImage {
        &self.pixels
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.as_raw().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(0), Orientation::Normal);
        assert_eq!(Orientation::from(99), Orientation::Normal);
    }

    #[test]
    fn test_orientation_apply_to() {
        assert_eq!(Orientation::Normal.apply_to(3000, 2000), ImageDimensions::new(3000, 2000));
        assert_eq!(Orientation::Rotate180.apply_to(3000, 2000), ImageDimensions::new(3000, 2000));
        assert_eq!(Orientation::Rotate90CW.apply_to(3000, 2000), ImageDimensions::new(2000, 3000));
        assert_eq!(Orientation::Transverse.apply_to(3000, 2000), ImageDimensions::new(2000, 3000));
    }

    #[test]
    fn test_decoded_image_dimensions() {
        let img = DecodedImage::from_rgb_image(image::RgbImage::new(100, 50));
        assert_eq!(img.dimensions(), ImageDimensions::new(100, 50));
        assert_eq!(img.byte_size(), 100 * 50 * 3);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("unexpected EOF".to_string());
        assert_eq!(err.to_string(), "Corrupted or incomplete image file: unexpected EOF");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
