//! Pointer-driven crop interaction.
//!
//! [`CropInteractionController`] owns the display-space crop rectangle for
//! one session and mutates it in response to pointer events. The state
//! machine is deliberately small:
//!
//! ```text
//! Idle --pointer_down--> Dragging --pointer_move*--> Dragging --pointer_up--> Idle
//! ```
//!
//! Every transition goes through the pure functions [`move_crop`] and
//! [`resize_crop`], which never fail: they degrade pointer tracking instead
//! of producing a rectangle that leaves the displayed image or breaks the
//! aspect lock.
//!
//! The controller is not `Sync`-safe by contract: one interaction context
//! drives it at a time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aspect::AspectRatio;
use crate::config::CropConfig;
use crate::geometry::{
    clamp_locked, compute_fit, initial_crop_scaled, to_display, to_source, CropRect,
    FitTransform, ImageDimensions, Point, SourceRect, ViewportDimensions,
};

/// `confirm` was called before the session had geometry and a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Crop preview not ready: image and viewport dimensions are not known yet")]
pub struct NotReadyError;

/// What a drag does to the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    /// Translate without changing size.
    Move,
    /// Grow or shrink from the bottom-right corner, top-left fixed.
    Resize,
}

/// Pointer interaction state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        mode: DragMode,
        /// Pointer position at `pointer_down`.
        anchor: Point,
        /// Crop rectangle at `pointer_down`. Deltas apply to this, not to
        /// the previous frame, so rounding never accumulates mid-drag.
        baseline: CropRect,
    },
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging { .. })
    }
}

/// Geometry known once both the image and viewport sizes are available.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SessionGeometry {
    image: ImageDimensions,
    viewport: ViewportDimensions,
    fit: FitTransform,
}

impl SessionGeometry {
    fn new(image: ImageDimensions, viewport: ViewportDimensions) -> Self {
        Self {
            image,
            viewport,
            fit: compute_fit(image, viewport),
        }
    }

    fn bounds(&self) -> CropRect {
        self.fit.image_bounds(self.image)
    }
}

/// Translate `baseline` by `delta`, clamping each axis independently so the
/// rectangle stays inside `bounds`. Size is unchanged.
pub fn move_crop(baseline: &CropRect, delta: Point, bounds: &CropRect) -> CropRect {
    let x = (baseline.x + delta.x)
        .min(bounds.right() - baseline.width)
        .max(bounds.x);
    let y = (baseline.y + delta.y)
        .min(bounds.bottom() - baseline.height)
        .max(bounds.y);

    CropRect { x, y, ..*baseline }
}

/// Resize `baseline` from its bottom-right corner by `delta.x`.
///
/// Width follows the pointer (floored at `min_size`) and height is always
/// derived from width. If the result would leave `bounds`, it is shrunk
/// with [`clamp_locked`], so a drag near an edge stops short of the pointer
/// rather than breaking the ratio.
pub fn resize_crop(
    baseline: &CropRect,
    delta: Point,
    bounds: &CropRect,
    ratio: f64,
    min_size: f64,
) -> CropRect {
    let width = (baseline.width + delta.x).max(min_size);
    let candidate = CropRect {
        width,
        height: width / ratio,
        ..*baseline
    };

    clamp_locked(candidate, bounds, ratio)
}

/// Owns the crop rectangle of one session and applies pointer input to it.
#[derive(Debug, Clone)]
pub struct CropInteractionController {
    aspect: AspectRatio,
    min_crop_size: f64,
    initial_crop_fraction: f64,
    geometry: Option<SessionGeometry>,
    crop: Option<CropRect>,
    state: InteractionState,
}

impl Default for CropInteractionController {
    fn default() -> Self {
        Self::with_config(&CropConfig::default())
    }
}

impl CropInteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle controller using the interaction settings of `config`.
    pub fn with_config(config: &CropConfig) -> Self {
        Self {
            aspect: AspectRatio::default(),
            min_crop_size: config.min_crop_size,
            initial_crop_fraction: config.initial_crop_fraction,
            geometry: None,
            crop: None,
            state: InteractionState::Idle,
        }
    }

    /// Start a session: compute the fit and a centered initial crop.
    pub fn begin(
        &mut self,
        image: ImageDimensions,
        viewport: ViewportDimensions,
        aspect: AspectRatio,
    ) {
        let geometry = SessionGeometry::new(image, viewport);
        let crop = initial_crop_scaled(&geometry.fit, aspect, image, self.initial_crop_fraction);

        tracing::debug!(
            image_width = image.width,
            image_height = image.height,
            viewport_width = viewport.width,
            viewport_height = viewport.height,
            scale = geometry.fit.scale,
            aspect = %aspect,
            "Crop session started"
        );

        self.aspect = aspect;
        self.geometry = Some(geometry);
        self.crop = Some(crop);
        self.state = InteractionState::Idle;
    }

    /// Recompute the fit for a new viewport size.
    ///
    /// The current crop keeps covering the same source region. Any drag in
    /// progress is dropped because its anchor is in the old display space.
    pub fn set_viewport(&mut self, viewport: ViewportDimensions) {
        let Some(old) = self.geometry else {
            return;
        };
        if old.viewport == viewport {
            return;
        }

        let geometry = SessionGeometry::new(old.image, viewport);
        if let Some(crop) = self.crop {
            let source = to_source(&crop, &old.fit);
            let remapped = to_display(&source, &geometry.fit);
            let bounds = geometry.bounds();
            let moved = move_crop(&remapped, Point::default(), &bounds);
            self.crop = Some(clamp_locked(moved, &bounds, self.aspect.ratio()));
        }
        self.geometry = Some(geometry);
        self.state = InteractionState::Idle;
    }

    /// Start a drag. Ignored until a crop rectangle exists.
    pub fn pointer_down(&mut self, point: Point, mode: DragMode) {
        let Some(crop) = self.crop else {
            return;
        };
        self.state = InteractionState::Dragging {
            mode,
            anchor: point,
            baseline: crop,
        };
    }

    /// Apply pointer motion. A no-op unless a drag is in progress.
    pub fn pointer_move(&mut self, point: Point) {
        let InteractionState::Dragging {
            mode,
            anchor,
            baseline,
        } = self.state
        else {
            return;
        };
        let Some(geometry) = self.geometry else {
            return;
        };

        let delta = Point::new(point.x - anchor.x, point.y - anchor.y);
        let bounds = geometry.bounds();
        let next = match mode {
            DragMode::Move => move_crop(&baseline, delta, &bounds),
            DragMode::Resize => resize_crop(
                &baseline,
                delta,
                &bounds,
                self.aspect.ratio(),
                self.min_crop_size,
            ),
        };
        self.crop = Some(next);
    }

    /// End the drag.
    pub fn pointer_up(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// The final display-space selection.
    pub fn confirm(&self) -> Result<CropRect, NotReadyError> {
        match (self.geometry, self.crop) {
            (Some(_), Some(crop)) => Ok(crop),
            _ => Err(NotReadyError),
        }
    }

    /// [`confirm`](Self::confirm) mapped back to source pixel space.
    pub fn confirm_source(&self) -> Result<SourceRect, NotReadyError> {
        let crop = self.confirm()?;
        let fit = self.fit().ok_or(NotReadyError)?;
        Ok(to_source(&crop, &fit))
    }

    /// Discard geometry and selection. Later pointer events are ignored.
    pub fn cancel(&mut self) {
        self.geometry = None;
        self.crop = None;
        self.state = InteractionState::Idle;
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn crop(&self) -> Option<CropRect> {
        self.crop
    }

    pub fn fit(&self) -> Option<FitTransform> {
        self.geometry.map(|g| g.fit)
    }

    /// Where the scaled image sits in the viewport.
    pub fn image_bounds(&self) -> Option<CropRect> {
        self.geometry.map(|g| g.bounds())
    }

    pub fn is_ready(&self) -> bool {
        self.geometry.is_some() && self.crop.is_some()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    fn aspect_strategy() -> impl Strategy<Value = AspectRatio> {
        prop_oneof![
            Just(AspectRatio::SQUARE),
            Just(AspectRatio::FOUR_THREE),
            Just(AspectRatio::SIXTEEN_NINE),
            (1u32..=20, 1u32..=20)
                .prop_map(|(w, h)| AspectRatio::new(w as f64, h as f64).unwrap_or_default()),
        ]
    }

    /// A drag: mode, pointer-down position, then a series of moves.
    fn drag_strategy() -> impl Strategy<Value = (DragMode, (f64, f64), Vec<(f64, f64)>)> {
        (
            prop_oneof![Just(DragMode::Move), Just(DragMode::Resize)],
            (0.0f64..=1920.0, 0.0f64..=1080.0),
            prop::collection::vec((-3000.0f64..=3000.0, -3000.0f64..=3000.0), 1..8),
        )
    }

    fn started(image: (u32, u32), aspect: AspectRatio) -> CropInteractionController {
        let mut controller = CropInteractionController::new();
        controller.begin(
            ImageDimensions::new(image.0, image.1),
            ViewportDimensions::new(1920.0, 1080.0),
            aspect,
        );
        controller
    }

    proptest! {
        /// Property: any drag sequence keeps the crop locked and inside the image.
        #[test]
        fn prop_drags_preserve_invariants(
            image in (200u32..=6000, 200u32..=6000),
            aspect in aspect_strategy(),
            drags in prop::collection::vec(drag_strategy(), 1..6),
        ) {
            let mut controller = started(image, aspect);
            let bounds = controller.image_bounds().unwrap();

            for (mode, (down_x, down_y), moves) in drags {
                controller.pointer_down(Point::new(down_x, down_y), mode);
                for (x, y) in moves {
                    controller.pointer_move(Point::new(x, y));
                    let crop = controller.crop().unwrap();
                    prop_assert!(crop.width > 0.0 && crop.height > 0.0);
                    prop_assert!((crop.aspect() - aspect.ratio()).abs() / aspect.ratio() < 0.01);
                    prop_assert!(crop.is_within(&bounds, EPS));
                }
                controller.pointer_up();
            }
        }

        /// Property: moves never change the crop size.
        #[test]
        fn prop_move_keeps_size(
            image in (200u32..=6000, 200u32..=6000),
            aspect in aspect_strategy(),
            moves in prop::collection::vec((-3000.0f64..=3000.0, -3000.0f64..=3000.0), 1..10),
        ) {
            let mut controller = started(image, aspect);
            let baseline = controller.crop().unwrap();

            controller.pointer_down(Point::new(960.0, 540.0), DragMode::Move);
            for (x, y) in moves {
                controller.pointer_move(Point::new(x, y));
                let crop = controller.crop().unwrap();
                prop_assert_eq!(crop.width, baseline.width);
                prop_assert_eq!(crop.height, baseline.height);
                prop_assert!(crop.is_within(&controller.image_bounds().unwrap(), EPS));
            }
        }

        /// Property: a shrinking resize on a large image bottoms out at exactly 20px.
        #[test]
        fn prop_resize_floor(shrink in 1000.0f64..=5000.0, aspect in aspect_strategy()) {
            let mut controller = started((4000, 4000), aspect);
            let baseline = controller.crop().unwrap();

            controller.pointer_down(
                Point::new(baseline.right(), baseline.bottom()),
                DragMode::Resize,
            );
            controller.pointer_move(Point::new(baseline.right() - shrink, baseline.bottom()));
            let crop = controller.crop().unwrap();

            prop_assert_eq!(crop.width, 20.0);
            prop_assert!((crop.height - 20.0 / aspect.ratio()).abs() < EPS);
        }
    }
}
