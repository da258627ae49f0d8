//! Value types shared by the geometry, interaction and raster stages.

use serde::{Deserialize, Serialize};

/// Intrinsic (orientation-corrected) size of a decoded image, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Zero-height images report 1.0.
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f64 / self.height as f64
    }
}

/// Size of the bounded preview area, in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportDimensions {
    pub width: f64,
    pub height: f64,
}

impl ViewportDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A pointer position in display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Uniform scale plus centering offset: `display = source * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitTransform {
    /// The rectangle the scaled image occupies inside the viewport.
    ///
    /// Zero-pixel sides count as one pixel, as in `compute_fit`.
    pub fn image_bounds(&self, image: ImageDimensions) -> CropRect {
        CropRect {
            x: self.offset_x,
            y: self.offset_y,
            width: image.width.max(1) as f64 * self.scale,
            height: image.height.max(1) as f64 * self.scale,
        }
    }
}

/// A rectangle in display space. Used both for the crop selection and for
/// the displayed image bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// True if `self` lies inside `outer`, allowing `epsilon` of slack on
    /// every edge.
    pub fn is_within(&self, outer: &CropRect, epsilon: f64) -> bool {
        self.x >= outer.x - epsilon
            && self.y >= outer.y - epsilon
            && self.right() <= outer.right() + epsilon
            && self.bottom() <= outer.bottom() + epsilon
    }
}

/// A rectangle in source-image pixel space.
///
/// Coordinates are fractional: they come straight out of the inverse fit
/// mapping and are only snapped to whole pixels at rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceRect {
    pub sx: f64,
    pub sy: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    pub fn new(sx: f64, sy: f64, width: f64, height: f64) -> Self {
        Self {
            sx,
            sy,
            width,
            height,
        }
    }

    /// True if both sides are finite and strictly positive.
    pub fn has_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
