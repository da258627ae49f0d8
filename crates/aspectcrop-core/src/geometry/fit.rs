//! "Contain" fit between source pixel space and viewport display space.
//!
//! The image is scaled uniformly until it fills the viewport on its
//! constraining axis, then centered on the other axis:
//!
//! ```text
//! display = source * scale + offset
//! source  = (display - offset) / scale
//! ```
//!
//! Everything here is pure and total. The interaction controller and the
//! final inverse mapping both go through these functions so the preview and
//! the rasterized output never disagree about where the image sits.

use crate::aspect::AspectRatio;

use super::types::{CropRect, FitTransform, ImageDimensions, SourceRect, ViewportDimensions};

/// Fraction of the largest locked rectangle used for a fresh session's crop.
pub const DEFAULT_INITIAL_CROP_FRACTION: f64 = 0.7;

/// Compute the contain-fit transform of `image` into `viewport`.
///
/// Degenerate sizes (zero or negative on an axis) are floored to one pixel
/// so the returned scale is always positive.
pub fn compute_fit(image: ImageDimensions, viewport: ViewportDimensions) -> FitTransform {
    let img_w = image.width.max(1) as f64;
    let img_h = image.height.max(1) as f64;
    let vp_w = viewport.width.max(1.0);
    let vp_h = viewport.height.max(1.0);

    let scale = if img_w / img_h > vp_w / vp_h {
        // Relatively wider than the viewport: width constrains
        vp_w / img_w
    } else {
        vp_h / img_h
    };

    FitTransform {
        scale,
        offset_x: (vp_w - img_w * scale) / 2.0,
        offset_y: (vp_h - img_h * scale) / 2.0,
    }
}

/// Map a display-space rectangle back to source pixel space.
pub fn to_source(rect: &CropRect, fit: &FitTransform) -> SourceRect {
    SourceRect {
        sx: (rect.x - fit.offset_x) / fit.scale,
        sy: (rect.y - fit.offset_y) / fit.scale,
        width: rect.width / fit.scale,
        height: rect.height / fit.scale,
    }
}

/// Map a source-space rectangle forward into display space.
pub fn to_display(rect: &SourceRect, fit: &FitTransform) -> CropRect {
    CropRect {
        x: rect.sx * fit.scale + fit.offset_x,
        y: rect.sy * fit.scale + fit.offset_y,
        width: rect.width * fit.scale,
        height: rect.height * fit.scale,
    }
}

/// Largest `(width, height)` with `width / height == ratio` that fits in
/// a `max_width x max_height` box.
pub fn locked_size(max_width: f64, max_height: f64, ratio: f64) -> (f64, f64) {
    if max_width / max_height > ratio {
        (max_height * ratio, max_height)
    } else {
        (max_width, max_width / ratio)
    }
}

/// Default crop for a new session: centered on the displayed image, aspect
/// locked, at 70% of the largest locked rectangle the image can hold.
pub fn initial_crop(fit: &FitTransform, aspect: AspectRatio, image: ImageDimensions) -> CropRect {
    initial_crop_scaled(fit, aspect, image, DEFAULT_INITIAL_CROP_FRACTION)
}

/// [`initial_crop`] with an explicit fraction (clamped to `(0, 1]`).
pub fn initial_crop_scaled(
    fit: &FitTransform,
    aspect: AspectRatio,
    image: ImageDimensions,
    fraction: f64,
) -> CropRect {
    let bounds = fit.image_bounds(image);
    let fraction = if fraction > 0.0 { fraction.min(1.0) } else { DEFAULT_INITIAL_CROP_FRACTION };

    let (max_w, max_h) = locked_size(bounds.width, bounds.height, aspect.ratio());
    let width = max_w * fraction;
    let height = max_h * fraction;

    CropRect {
        x: bounds.x + (bounds.width - width) / 2.0,
        y: bounds.y + (bounds.height - height) / 2.0,
        width,
        height,
    }
}

/// Centered, aspect-locked crop covering as much of the image as possible,
/// in source pixels. Used when no interactive selection was made.
pub fn centered_source_crop(image: ImageDimensions, aspect: AspectRatio) -> SourceRect {
    let img_w = image.width as f64;
    let img_h = image.height as f64;
    let (width, height) = locked_size(img_w, img_h, aspect.ratio());

    SourceRect {
        sx: (img_w - width) / 2.0,
        sy: (img_h - height) / 2.0,
        width,
        height,
    }
}

/// Shrink `rect` (top-left fixed) until it fits inside `bounds`, keeping
/// `width / height == ratio`.
///
/// Height is clamped against the bottom edge first (width re-derived from
/// it), then width against the right edge (height re-derived). Each pass
/// only shrinks, so the second cannot undo the first.
pub fn clamp_locked(rect: CropRect, bounds: &CropRect, ratio: f64) -> CropRect {
    let mut width = rect.width;
    let mut height = rect.height;

    if rect.y + height > bounds.bottom() {
        height = bounds.bottom() - rect.y;
        width = height * ratio;
    }
    if rect.x + width > bounds.right() {
        width = bounds.right() - rect.x;
        height = width / ratio;
    }

    CropRect { width, height, ..rect }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_fit_height_constrained() {
        // 800x600 in 1920x1080: 1.33 < 1.78, height constrains
        let fit = compute_fit(
            ImageDimensions::new(800, 600),
            ViewportDimensions::new(1920.0, 1080.0),
        );
        assert!(approx(fit.scale, 1.8));
        assert!(approx(fit.offset_x, 240.0));
        assert!(approx(fit.offset_y, 0.0));

        let bounds = fit.image_bounds(ImageDimensions::new(800, 600));
        assert!(approx(bounds.width, 1440.0));
        assert!(approx(bounds.height, 1080.0));
    }

    #[test]
    fn test_fit_width_constrained() {
        let fit = compute_fit(
            ImageDimensions::new(3000, 1000),
            ViewportDimensions::new(600.0, 400.0),
        );
        assert!(approx(fit.scale, 0.2));
        assert!(approx(fit.offset_x, 0.0));
        assert!(approx(fit.offset_y, 100.0));
    }

    #[test]
    fn test_fit_same_aspect_has_no_offset() {
        let fit = compute_fit(
            ImageDimensions::new(400, 300),
            ViewportDimensions::new(800.0, 600.0),
        );
        assert!(approx(fit.scale, 2.0));
        assert!(approx(fit.offset_x, 0.0));
        assert!(approx(fit.offset_y, 0.0));
    }

    #[test]
    fn test_fit_degenerate_viewport_keeps_positive_scale() {
        let fit = compute_fit(ImageDimensions::new(100, 100), ViewportDimensions::new(0.0, -5.0));
        assert!(fit.scale > 0.0);

        let fit = compute_fit(ImageDimensions::new(0, 0), ViewportDimensions::new(100.0, 100.0));
        assert!(fit.scale > 0.0);
    }

    #[test]
    fn test_to_source_inverts_offset_and_scale() {
        let fit = FitTransform {
            scale: 2.0,
            offset_x: 100.0,
            offset_y: 0.0,
        };
        let src = to_source(&CropRect::new(120.0, 40.0, 200.0, 100.0), &fit);
        assert_eq!(src, SourceRect::new(10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn test_locked_size() {
        assert_eq!(locked_size(300.0, 200.0, 1.0), (200.0, 200.0));
        let (w, h) = locked_size(160.0, 200.0, 16.0 / 9.0);
        assert!(approx(w, 160.0));
        assert!(approx(h, 90.0));
    }

    #[test]
    fn test_initial_crop_is_centered_and_locked() {
        let image = ImageDimensions::new(800, 600);
        let fit = compute_fit(image, ViewportDimensions::new(1920.0, 1080.0));
        let crop = initial_crop(&fit, AspectRatio::SIXTEEN_NINE, image);
        let bounds = fit.image_bounds(image);

        assert!((crop.aspect() - 16.0 / 9.0).abs() < 1e-9);
        assert!(crop.is_within(&bounds, EPS));
        // 16:9 inside 1440x1080 is width-limited: 1440 * 0.7
        assert!(approx(crop.width, 1008.0));
        assert!(approx(crop.x + crop.width / 2.0, bounds.x + bounds.width / 2.0));
        assert!(approx(crop.y + crop.height / 2.0, bounds.y + bounds.height / 2.0));
    }

    #[test]
    fn test_initial_crop_fits_wide_image_with_tall_ratio() {
        // A naive 70%-of-width box would overflow vertically here
        let image = ImageDimensions::new(1600, 900);
        let fit = compute_fit(image, ViewportDimensions::new(800.0, 450.0));
        let crop = initial_crop(&fit, AspectRatio::SQUARE, image);

        assert!(crop.is_within(&fit.image_bounds(image), EPS));
        assert!(approx(crop.height, 450.0 * 0.7));
        assert!(approx(crop.width, crop.height));
    }

    #[test]
    fn test_centered_source_crop() {
        let crop = centered_source_crop(ImageDimensions::new(3000, 2000), AspectRatio::SQUARE);
        assert_eq!(crop, SourceRect::new(500.0, 0.0, 2000.0, 2000.0));

        let crop =
            centered_source_crop(ImageDimensions::new(1000, 1000), AspectRatio::SIXTEEN_NINE);
        assert!(approx(crop.width, 1000.0));
        assert!(approx(crop.height, 562.5));
        assert!(approx(crop.sy, 218.75));
    }

    #[test]
    fn test_clamp_locked_right_edge() {
        let bounds = CropRect::new(0.0, 0.0, 100.0, 100.0);
        let clamped = clamp_locked(CropRect::new(60.0, 0.0, 80.0, 40.0), &bounds, 2.0);
        assert!(approx(clamped.width, 40.0));
        assert!(approx(clamped.height, 20.0));
    }

    #[test]
    fn test_clamp_locked_bottom_edge() {
        let bounds = CropRect::new(0.0, 0.0, 100.0, 100.0);
        let clamped = clamp_locked(CropRect::new(0.0, 50.0, 80.0, 80.0), &bounds, 1.0);
        assert!(approx(clamped.width, 50.0));
        assert!(approx(clamped.height, 50.0));
    }

    #[test]
    fn test_clamp_locked_noop_when_inside() {
        let bounds = CropRect::new(0.0, 0.0, 100.0, 100.0);
        let rect = CropRect::new(10.0, 10.0, 40.0, 30.0);
        assert_eq!(clamp_locked(rect, &bounds, 4.0 / 3.0), rect);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
