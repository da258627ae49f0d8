//! WASM bindings for aspect ratio parsing and preview layout.

use aspectcrop_core::{compute_fit as core_fit, AspectRatio, ImageDimensions, ViewportDimensions};
use wasm_bindgen::prelude::*;

use crate::types::js_error;

/// Numeric width/height ratio of a `"W:H"` token.
///
/// Malformed tokens give `1.0`, the same fallback the crop session uses.
///
/// # Example (TypeScript)
///
/// ```typescript
/// parse_aspect_ratio("16:9"); // 1.777...
/// parse_aspect_ratio("wide"); // 1
/// ```
#[wasm_bindgen]
pub fn parse_aspect_ratio(token: &str) -> f64 {
    AspectRatio::parse(token).ratio()
}

/// Canonical `"W:H"` form of a token, or an error if it is malformed.
///
/// Use this to validate user input before starting a session.
#[wasm_bindgen]
pub fn normalize_aspect_ratio(token: &str) -> Result<String, JsValue> {
    AspectRatio::try_parse(token)
        .map(|aspect| aspect.to_string())
        .map_err(js_error)
}

/// Ratio tokens offered by default in the crop dialog.
#[wasm_bindgen]
pub fn aspect_presets() -> Vec<String> {
    AspectRatio::PRESETS.iter().map(ToString::to_string).collect()
}

/// Contain-fit transform for showing an image in a viewport.
///
/// Returns `{ scale, offsetX, offsetY }`.
#[wasm_bindgen]
pub fn compute_fit(
    image_width: u32,
    image_height: u32,
    viewport_width: f64,
    viewport_height: f64,
) -> Result<JsValue, JsValue> {
    let fit = core_fit(
        ImageDimensions::new(image_width, image_height),
        ViewportDimensions::new(viewport_width, viewport_height),
    );
    serde_wasm_bindgen::to_value(&fit).map_err(js_error)
}
