//! WASM-compatible wrapper types for crop output.

use std::fmt::Display;

use aspectcrop_core::ProcessedImage;
use wasm_bindgen::prelude::*;

/// A finished crop, ready to be stored as an asset.
///
/// The encoded bytes live in WASM memory until the object is freed;
/// `bytes()` hands JavaScript a copy.
#[wasm_bindgen]
pub struct JsProcessedImage {
    inner: ProcessedImage,
}

#[wasm_bindgen]
impl JsProcessedImage {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Size of the encoded file in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.encoded_bytes.len()
    }

    /// Format tag for the upload, always `image/jpeg`.
    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.inner.extension().to_string()
    }

    /// Returns the encoded JPEG as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.encoded_bytes.clone()
    }
}

impl From<ProcessedImage> for JsProcessedImage {
    fn from(inner: ProcessedImage) -> Self {
        Self { inner }
    }
}

/// Error message for the JavaScript side.
pub(crate) fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
