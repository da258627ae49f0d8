//! Final raster generation: source-space crop to encoded output.
//!
//! # Pipeline
//!
//! 1. Resolve the crop: an explicit rectangle with positive area, or the
//!    centered aspect-locked crop when there is none (headless path)
//! 2. Correct aspect drift: if width/height differs from the target ratio
//!    by more than the tolerance, height is re-derived from width
//! 3. Clamp to the decoded image, keeping the aspect lock
//! 4. Uniformly downscale so neither edge exceeds `max_dimension`
//! 5. Sample the crop into a `target_width x target_height` surface and
//!    encode as JPEG

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::aspect::AspectRatio;
use crate::config::CropConfig;
use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::{encode_jpeg, EncodeError, JPEG_MIME_TYPE};
use crate::geometry::{centered_source_crop, clamp_locked, CropRect, ImageDimensions, SourceRect};

/// Encoded output of a crop. Ownership passes to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedImage {
    pub encoded_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ProcessedImage {
    /// Format tag stored alongside the asset.
    pub fn mime_type(&self) -> &'static str {
        JPEG_MIME_TYPE
    }

    /// File extension matching [`mime_type`](Self::mime_type).
    pub fn extension(&self) -> &'static str {
        "jpg"
    }
}

/// Errors from the bytes-in, bytes-out entry point.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Decode `bytes` and run the full pipeline on them.
///
/// `crop` is in source pixels; `None` selects the centered crop.
pub fn process_crop(
    bytes: &[u8],
    crop: Option<SourceRect>,
    aspect: AspectRatio,
    config: &CropConfig,
) -> Result<ProcessedImage, ProcessError> {
    let source = decode_image(bytes)?;
    Ok(process_image(&source, crop, aspect, config)?)
}

/// Run the pipeline on an already decoded image.
pub fn process_image(
    source: &DecodedImage,
    crop: Option<SourceRect>,
    aspect: AspectRatio,
    config: &CropConfig,
) -> Result<ProcessedImage, EncodeError> {
    let dims = source.dimensions();
    if dims.width == 0 || dims.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: dims.width,
            height: dims.height,
        });
    }

    let rect = resolve_crop(dims, crop, aspect, config.aspect_tolerance);
    let (width, height) = target_size(rect.width, rect.height, config.max_dimension);

    let pixels = rasterize(source.as_rgb_image(), &rect, width, height, config);
    let encoded_bytes = encode_jpeg(&pixels, config.jpeg_quality)?;

    tracing::debug!(
        sx = rect.sx,
        sy = rect.sy,
        crop_width = rect.width,
        crop_height = rect.height,
        width,
        height,
        bytes = encoded_bytes.len(),
        "Crop rasterized"
    );

    Ok(ProcessedImage {
        encoded_bytes,
        width,
        height,
    })
}

/// Steps 1-3: pick the crop, fix aspect drift, clamp to the image.
///
/// Always returns a rectangle with positive area inside `dims`.
pub fn resolve_crop(
    dims: ImageDimensions,
    crop: Option<SourceRect>,
    aspect: AspectRatio,
    tolerance: f64,
) -> SourceRect {
    let ratio = aspect.ratio();

    let mut rect = match crop {
        Some(rect) if rect.has_area() && rect.sx.is_finite() && rect.sy.is_finite() => rect,
        Some(rect) => {
            tracing::warn!(?rect, "Ignoring crop without positive area, using centered crop");
            centered_source_crop(dims, aspect)
        }
        None => centered_source_crop(dims, aspect),
    };

    if (rect.width / rect.height - ratio).abs() > tolerance {
        tracing::warn!(
            width = rect.width,
            height = rect.height,
            ratio,
            "Correcting crop aspect drift"
        );
        rect.height = rect.width / ratio;
    }

    let img_w = dims.width as f64;
    let img_h = dims.height as f64;
    let bounds = CropRect::new(0.0, 0.0, img_w, img_h);
    // Keep at least one pixel of room to the right and below the origin
    let origin = CropRect {
        x: rect.sx.clamp(0.0, (img_w - 1.0).max(0.0)),
        y: rect.sy.clamp(0.0, (img_h - 1.0).max(0.0)),
        width: rect.width,
        height: rect.height,
    };
    let clamped = clamp_locked(origin, &bounds, ratio);

    SourceRect::new(clamped.x, clamped.y, clamped.width, clamped.height)
}

/// Step 4: whole-pixel output size, uniformly scaled down to fit
/// `max_dimension` on both edges. Never smaller than 1x1.
pub fn target_size(width: f64, height: f64, max_dimension: u32) -> (u32, u32) {
    let max = max_dimension.max(1) as f64;
    let (mut width, mut height) = (width, height);

    if width > max || height > max {
        let scale = (max / width).min(max / height);
        width *= scale;
        height *= scale;
    }

    (
        (width.round() as u32).clamp(1, max as u32),
        (height.round() as u32).clamp(1, max as u32),
    )
}

/// Step 5 (sampling): copy the crop window and resample it to the target.
fn rasterize(
    image: &image::RgbImage,
    rect: &SourceRect,
    width: u32,
    height: u32,
    config: &CropConfig,
) -> image::RgbImage {
    let (img_w, img_h) = image.dimensions();

    let px_left = (rect.sx.floor() as u32).min(img_w.saturating_sub(1));
    let px_top = (rect.sy.floor() as u32).min(img_h.saturating_sub(1));
    let px_width = (rect.width.round() as u32).clamp(1, img_w - px_left);
    let px_height = (rect.height.round() as u32).clamp(1, img_h - px_top);

    let window = imageops::crop_imm(image, px_left, px_top, px_width, px_height).to_image();
    if (px_width, px_height) == (width, height) {
        return window;
    }
    imageops::resize(&window, width, height, config.filter.to_image_filter())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn aspect_strategy() -> impl Strategy<Value = AspectRatio> {
        prop_oneof![
            Just(AspectRatio::SQUARE),
            Just(AspectRatio::FOUR_THREE),
            Just(AspectRatio::SIXTEEN_NINE),
        ]
    }

    proptest! {
        /// Property: resolved crops lie inside the image and keep the ratio.
        #[test]
        fn prop_resolved_crop_valid(
            (img_w, img_h) in (1u32..=5000, 1u32..=5000),
            (sx, sy, width) in (-500.0f64..=5000.0, -500.0f64..=5000.0, 1.0f64..=6000.0),
            aspect in aspect_strategy(),
        ) {
            let dims = ImageDimensions::new(img_w, img_h);
            let crop = SourceRect::new(sx, sy, width, width / aspect.ratio());
            let rect = resolve_crop(dims, Some(crop), aspect, 0.01);

            prop_assert!(rect.has_area());
            prop_assert!(rect.sx >= 0.0 && rect.sy >= 0.0);
            prop_assert!(rect.sx + rect.width <= img_w as f64 + 1e-6);
            prop_assert!(rect.sy + rect.height <= img_h as f64 + 1e-6);
            prop_assert!((rect.width / rect.height - aspect.ratio()).abs() < 1e-6 * aspect.ratio());
        }

        /// Property: target size never exceeds the limit and keeps the ratio.
        #[test]
        fn prop_target_size_bounded(
            width in 1.0f64..=10_000.0,
            aspect in aspect_strategy(),
            max_dimension in 16u32..=4096,
        ) {
            let height = width / aspect.ratio();
            let (w, h) = target_size(width, height, max_dimension);

            prop_assert!(w >= 1 && h >= 1);
            prop_assert!(w <= max_dimension && h <= max_dimension);
            if width > 200.0 && height > 200.0 && max_dimension >= 200 {
                let ratio = w as f64 / h as f64;
                prop_assert!((ratio - aspect.ratio()).abs() / aspect.ratio() < 0.01);
            }
        }
    }
}
