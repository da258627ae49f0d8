//! WASM bindings for headless cropping.
//!
//! These skip the interactive session: the caller already knows the crop
//! (or wants the centered default) and only needs the encoded result.

use aspectcrop_core::{process_crop, AspectRatio, CropConfig, SourceRect};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsProcessedImage};

/// Center-crop an image to `aspect` and encode it as JPEG.
///
/// The crop is the largest one the image can hold at that ratio, downscaled
/// so neither edge exceeds `max_size`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const banner = crop_to_aspect_ratio(bytes, "16:9", 1600);
/// ```
#[wasm_bindgen]
pub fn crop_to_aspect_ratio(
    bytes: &[u8],
    aspect: &str,
    max_size: u32,
) -> Result<JsProcessedImage, JsValue> {
    let config = CropConfig::default().with_max_dimension(max_size);
    process_crop(bytes, None, AspectRatio::parse(aspect), &config)
        .map(JsProcessedImage::from)
        .map_err(js_error)
}

/// Crop an explicit source-pixel rectangle and encode it as JPEG.
///
/// The rectangle is corrected to `aspect` and clamped to the image first.
#[wasm_bindgen]
pub fn crop_source_rect(
    bytes: &[u8],
    aspect: &str,
    sx: f64,
    sy: f64,
    width: f64,
    height: f64,
    max_size: u32,
) -> Result<JsProcessedImage, JsValue> {
    let config = CropConfig::default().with_max_dimension(max_size);
    let rect = SourceRect::new(sx, sy, width, height);
    process_crop(bytes, Some(rect), AspectRatio::parse(aspect), &config)
        .map(JsProcessedImage::from)
        .map_err(js_error)
}
