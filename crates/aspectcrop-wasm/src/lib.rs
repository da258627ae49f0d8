//! Aspect Crop WASM - WebAssembly bindings for aspectcrop-core
//!
//! This crate exposes the crop engine to JavaScript/TypeScript hosts.
//!
//! # Module Structure
//!
//! - `session` - Interactive crop session driven by pointer events
//! - `raster` - Headless crop-and-encode entry points
//! - `geometry` - Aspect ratio parsing and preview layout helpers
//! - `types` - WASM-compatible wrapper for the encoded output
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@aspectcrop/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsCropSession(bytes, "1:1", 800, 600, undefined);
//! const result = session.confirm();
//! console.log(`Cropped to ${result.width}x${result.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod geometry;
mod raster;
mod session;
mod types;

pub use geometry::{aspect_presets, compute_fit, normalize_aspect_ratio, parse_aspect_ratio};
pub use raster::{crop_source_rect, crop_to_aspect_ratio};
pub use session::JsCropSession;
pub use types::JsProcessedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    aspectcrop_core::VERSION.to_string()
}
