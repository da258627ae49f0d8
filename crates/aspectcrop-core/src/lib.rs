//! Aspect Crop Core - aspect-ratio-locked image cropping
//!
//! This crate turns an uploaded image and a `"W:H"` ratio token into a
//! cropped, size-limited JPEG. It covers the whole episode:
//!
//! - [`aspect`]: ratio token parsing, degrading to 1:1
//! - [`geometry`]: contain-fit preview transform and coordinate mapping
//! - [`interaction`]: the pointer-driven move/resize state machine
//! - [`raster`]: final crop, downscale and encode
//!
//! With the `async` feature (on by default), [`CropSession`] ties these
//! together and keeps decoding and encoding off the caller's thread.

pub mod aspect;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod raster;
#[cfg(feature = "async")]
pub mod session;
#[cfg(feature = "async")]
pub mod tasks;

pub use aspect::{AspectRatio, AspectRatioError};
pub use config::CropConfig;
pub use decode::{DecodeError, DecodedImage, FilterType};
pub use encode::EncodeError;
pub use error::CropError;
pub use geometry::{
    compute_fit, to_display, to_source, CropRect, FitTransform, ImageDimensions, Point,
    SourceRect, ViewportDimensions,
};
pub use interaction::{CropInteractionController, DragMode, InteractionState, NotReadyError};
pub use raster::{process_crop, process_image, ProcessError, ProcessedImage};
#[cfg(feature = "async")]
pub use session::CropSession;

/// Crate version, reported by host bindings.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_crop_from_bytes() {
        let bytes = decode::fixtures::png_bytes(300, 200);
        let out = process_crop(&bytes, None, AspectRatio::parse("1:1"), &CropConfig::default())
            .unwrap();

        assert_eq!((out.width, out.height), (200, 200));
        assert_eq!(out.mime_type(), "image/jpeg");
    }

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
