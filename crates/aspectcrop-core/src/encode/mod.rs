//! Output encoding.
//!
//! The crop pipeline emits lossy JPEG at a fixed quality. Like decoding,
//! encoding here is synchronous; see the `tasks` module for the async path.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};

/// MIME type of everything [`encode_jpeg`] produces.
pub const JPEG_MIME_TYPE: &str = "image/jpeg";
