//! One begin-to-confirm cropping episode.
//!
//! A [`CropSession`] only exists once its image has been decoded, so pointer
//! input can never arrive before the geometry is known. Closing the session
//! (dropping it or calling [`CropSession::cancel`]) releases the decoded
//! buffer and the selection; nothing is persisted.

use std::sync::Arc;

use crate::aspect::AspectRatio;
use crate::config::CropConfig;
use crate::decode::DecodeError;
use crate::decode::DecodedImage;
use crate::error::CropError;
use crate::geometry::{CropRect, ImageDimensions, Point, ViewportDimensions};
use crate::interaction::{CropInteractionController, DragMode, InteractionState};
use crate::raster::ProcessedImage;
use crate::tasks;

/// An interactive crop of one source image.
#[derive(Debug)]
pub struct CropSession {
    source: Arc<DecodedImage>,
    controller: CropInteractionController,
    config: CropConfig,
}

impl CropSession {
    /// Decode `bytes` and start a session with the centered initial crop.
    ///
    /// `aspect` is a `"W:H"` token; malformed tokens crop at 1:1.
    ///
    /// # Errors
    ///
    /// Returns the decode failure; the caller may open a fresh session with
    /// a different image.
    pub async fn open(
        bytes: impl Into<Arc<[u8]>>,
        aspect: &str,
        viewport: ViewportDimensions,
        config: CropConfig,
    ) -> Result<Self, DecodeError> {
        let source = tasks::decode_source(bytes.into()).await?;
        let aspect = AspectRatio::parse(aspect);

        let mut controller = CropInteractionController::with_config(&config);
        controller.begin(source.dimensions(), viewport, aspect);

        Ok(Self {
            source,
            controller,
            config,
        })
    }

    pub fn image_dimensions(&self) -> ImageDimensions {
        self.source.dimensions()
    }

    pub fn aspect(&self) -> AspectRatio {
        self.controller.aspect()
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Read access to the geometry and current selection, for rendering.
    pub fn controller(&self) -> &CropInteractionController {
        &self.controller
    }

    /// Current display-space selection.
    pub fn crop(&self) -> Option<CropRect> {
        self.controller.crop()
    }

    pub fn state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn pointer_down(&mut self, point: Point, mode: DragMode) {
        self.controller.pointer_down(point, mode);
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.controller.pointer_move(point);
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    /// The host resized the preview area.
    pub fn set_viewport(&mut self, viewport: ViewportDimensions) {
        self.controller.set_viewport(viewport);
    }

    /// Map the selection to source pixels and produce the final raster.
    ///
    /// The session is left intact, so an `Encode` failure can be retried.
    pub async fn confirm(&self) -> Result<ProcessedImage, CropError> {
        let crop = self.controller.confirm_source()?;

        let processed = tasks::process_source(
            Arc::clone(&self.source),
            Some(crop),
            self.controller.aspect(),
            self.config.clone(),
        )
        .await?;

        tracing::debug!(
            width = processed.width,
            height = processed.height,
            bytes = processed.encoded_bytes.len(),
            "Crop session confirmed"
        );
        Ok(processed)
    }

    /// End the session without producing output.
    pub fn cancel(self) {
        tracing::debug!("Crop session cancelled");
    }
}
