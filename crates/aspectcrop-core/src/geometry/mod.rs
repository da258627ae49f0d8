//! Viewport geometry: the mapping between source pixels and the scaled,
//! centered preview.
//!
//! # Coordinate Systems
//!
//! - **Source space**: pixels of the decoded, orientation-corrected image
//! - **Display space**: pixels of the bounded viewport showing the preview
//! - Origin is the top-left corner in both

mod fit;
mod types;

pub use fit::{
    centered_source_crop, clamp_locked, compute_fit, initial_crop, initial_crop_scaled,
    locked_size, to_display, to_source, DEFAULT_INITIAL_CROP_FRACTION,
};
pub use types::{CropRect, FitTransform, ImageDimensions, Point, SourceRect, ViewportDimensions};
