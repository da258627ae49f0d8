//! Source image decoding with EXIF orientation handling.
//!
//! The browser host shows images orientation-corrected, so the crop engine
//! does the same: both the reported dimensions and the decoded pixels are
//! in displayed orientation.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};
use crate::geometry::ImageDimensions;

/// Decode image bytes (JPEG or PNG), applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognised or
/// not supported, `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = get_orientation(bytes);

    let img = open(bytes)?.decode().map_err(map_image_error)?;
    let oriented = apply_orientation(img, orientation);

    Ok(DecodedImage::from_rgb_image(oriented.into_rgb8()))
}

/// Read the displayed dimensions of an image from its header only.
///
/// Cheaper than [`decode_image`]; no pixel data is decoded.
pub fn decode_dimensions(bytes: &[u8]) -> Result<ImageDimensions, DecodeError> {
    let orientation = get_orientation(bytes);

    let (width, height) = open(bytes)?.into_dimensions().map_err(map_image_error)?;
    if width == 0 || height == 0 {
        return Err(DecodeError::CorruptedFile(format!(
            "Image reports empty dimensions {width}x{height}"
        )));
    }

    Ok(orientation.apply_to(width, height))
}

/// Extract EXIF orientation value from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn open(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }
    Ok(reader)
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};

    /// Gradient test image: R follows x, G follows y.
    pub fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
            ])
        })
    }

    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        encode(gradient(width, height), ImageFormat::Png)
    }

    pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        encode(gradient(width, height), ImageFormat::Jpeg)
    }

    /// JPEG with an APP1 EXIF segment carrying the given orientation tag.
    pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let jpeg = jpeg_bytes(width, height);
        let [lo, hi] = orientation.to_le_bytes();

        #[rustfmt::skip]
        let app1: Vec<u8> = vec![
            0xFF, 0xE1, 0x00, 0x22,
            b'E', b'x', b'i', b'f', 0x00, 0x00,
            // Little-endian TIFF header, IFD0 at offset 8
            0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00,
            // One entry: Orientation (0x0112), SHORT, count 1
            0x01, 0x00,
            0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, lo, hi, 0x00, 0x00,
            // No next IFD
            0x00, 0x00, 0x00, 0x00,
        ];

        let mut out = Vec::with_capacity(jpeg.len() + app1.len());
        out.extend_from_slice(&jpeg[..2]);
        out.extend_from_slice(&app1);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    fn encode(img: RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, format)
            .expect("fixture encoding");
        buffer.into_inner()
    }
}
