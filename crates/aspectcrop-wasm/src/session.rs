//! WASM bindings for an interactive crop session.
//!
//! JavaScript owns the pointer events and the preview canvas; this type
//! owns the decoded image and the crop rectangle. Everything runs on the
//! calling thread; hosts that need a responsive UI create the session in a
//! Web Worker.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsCropSession(bytes, "16:9", 800, 600, undefined);
//! canvas.onpointerdown = (e) => session.pointer_down(e.offsetX, e.offsetY, onHandle(e));
//! canvas.onpointermove = (e) => session.pointer_move(e.offsetX, e.offsetY);
//! canvas.onpointerup = () => session.pointer_up();
//!
//! const out = session.confirm();
//! await upload(new Blob([out.bytes()], { type: out.mimeType }));
//! ```

use aspectcrop_core::decode::decode_image;
use aspectcrop_core::{
    process_image, AspectRatio, CropConfig, CropError, CropInteractionController, DecodeError,
    DecodedImage, DragMode, Point, ProcessedImage, ViewportDimensions,
};
use wasm_bindgen::prelude::*;

use crate::types::{js_error, JsProcessedImage};

/// One crop episode over a decoded image.
#[wasm_bindgen]
pub struct JsCropSession {
    source: DecodedImage,
    controller: CropInteractionController,
    config: CropConfig,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Decode `bytes` and place the initial crop.
    ///
    /// # Arguments
    /// * `bytes` - JPEG or PNG file contents
    /// * `aspect` - Ratio token such as `"16:9"`; malformed tokens crop at 1:1
    /// * `viewport_width`, `viewport_height` - Preview area in CSS pixels
    /// * `config` - Optional partial `CropConfig` object
    ///
    /// # Errors
    /// Returns an error if the config is malformed or the image cannot be
    /// decoded.
    #[wasm_bindgen(constructor)]
    pub fn new(
        bytes: &[u8],
        aspect: &str,
        viewport_width: f64,
        viewport_height: f64,
        config: JsValue,
    ) -> Result<JsCropSession, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid crop config: {}", e)))?
        };

        Self::open(
            bytes,
            aspect,
            ViewportDimensions::new(viewport_width, viewport_height),
            config,
        )
        .map_err(js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn image_width(&self) -> u32 {
        self.source.dimensions().width
    }

    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> u32 {
        self.source.dimensions().height
    }

    /// The locked ratio as a `"W:H"` token.
    #[wasm_bindgen(getter)]
    pub fn aspect(&self) -> String {
        self.controller.aspect().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_dragging(&self) -> bool {
        self.controller.state().is_dragging()
    }

    /// Start a drag. `resize` selects the corner handle instead of a move.
    pub fn pointer_down(&mut self, x: f64, y: f64, resize: bool) {
        let mode = if resize { DragMode::Resize } else { DragMode::Move };
        self.controller.pointer_down(Point::new(x, y), mode);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.controller.pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    /// Call when the preview area changes size.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.controller.set_viewport(ViewportDimensions::new(width, height));
    }

    /// Current selection as `{ x, y, width, height }` in viewport pixels.
    pub fn crop(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.crop()).map_err(js_error)
    }

    /// Where the scaled image sits, as `{ x, y, width, height }`.
    pub fn image_bounds(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.image_bounds()).map_err(js_error)
    }

    /// Produce the cropped JPEG. The session stays usable afterwards.
    pub fn confirm(&self) -> Result<JsProcessedImage, JsValue> {
        self.process().map(JsProcessedImage::from).map_err(js_error)
    }

    /// End the session without producing output.
    pub fn cancel(self) {}
}

impl JsCropSession {
    pub(crate) fn open(
        bytes: &[u8],
        aspect: &str,
        viewport: ViewportDimensions,
        config: CropConfig,
    ) -> Result<Self, DecodeError> {
        let source = decode_image(bytes)?;
        let mut controller = CropInteractionController::with_config(&config);
        controller.begin(source.dimensions(), viewport, AspectRatio::parse(aspect));

        Ok(Self {
            source,
            controller,
            config,
        })
    }

    pub(crate) fn process(&self) -> Result<ProcessedImage, CropError> {
        let crop = self.controller.confirm_source()?;
        Ok(process_image(
            &self.source,
            Some(crop),
            self.controller.aspect(),
            &self.config,
        )?)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};

    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .expect("fixture encoding");
        buffer.into_inner()
    }
}
