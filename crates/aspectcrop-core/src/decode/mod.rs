//! Source image decoding.
//!
//! This module provides:
//! - Header-only dimension probing ([`decode_dimensions`])
//! - Full decoding to RGB8 with EXIF orientation applied ([`decode_image`])
//!
//! All functions here are synchronous. The async wrappers that move them off
//! the caller's thread live in the `tasks` module.

mod reader;
mod types;

#[cfg(test)]
pub(crate) use reader::fixtures;
pub use reader::{decode_dimensions, decode_image, get_orientation};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
