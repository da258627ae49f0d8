//! Async entry points for decoding and rasterization.
//!
//! Decoding and encoding are CPU-bound, so they run on tokio's blocking
//! pool. The pointer state machine never waits on them.
//!
//! # Cancellation
//!
//! Dropping a returned future abandons the task: the blocking work runs to
//! completion but its result is discarded, so nothing reaches a session
//! that has already been torn down.

use std::sync::Arc;

use tokio::task::{self, JoinError};

use crate::aspect::AspectRatio;
use crate::config::CropConfig;
use crate::decode::{decode_dimensions, decode_image, DecodeError, DecodedImage};
use crate::encode::EncodeError;
use crate::geometry::{ImageDimensions, SourceRect};
use crate::raster::{process_crop, process_image, ProcessError, ProcessedImage};

/// Read the displayed dimensions of `bytes` off the caller's thread.
pub async fn decode(bytes: Arc<[u8]>) -> Result<ImageDimensions, DecodeError> {
    task::spawn_blocking(move || decode_dimensions(&bytes))
        .await
        .map_err(decode_interrupted)?
}

/// Fully decode `bytes` off the caller's thread.
pub async fn decode_source(bytes: Arc<[u8]>) -> Result<Arc<DecodedImage>, DecodeError> {
    let image = task::spawn_blocking(move || decode_image(&bytes))
        .await
        .map_err(decode_interrupted)??;
    Ok(Arc::new(image))
}

/// Decode and crop `bytes`, limiting the output to `config.max_dimension`.
pub async fn process(
    bytes: Arc<[u8]>,
    crop: Option<SourceRect>,
    aspect: AspectRatio,
    config: CropConfig,
) -> Result<ProcessedImage, ProcessError> {
    task::spawn_blocking(move || process_crop(&bytes, crop, aspect, &config))
        .await
        .map_err(|e| ProcessError::Encode(encode_interrupted(e)))?
}

/// Crop an already decoded image.
pub async fn process_source(
    source: Arc<DecodedImage>,
    crop: Option<SourceRect>,
    aspect: AspectRatio,
    config: CropConfig,
) -> Result<ProcessedImage, EncodeError> {
    task::spawn_blocking(move || process_image(&source, crop, aspect, &config))
        .await
        .map_err(encode_interrupted)?
}

fn decode_interrupted(err: JoinError) -> DecodeError {
    DecodeError::Interrupted(err.to_string())
}

fn encode_interrupted(err: JoinError) -> EncodeError {
    EncodeError::Interrupted(err.to_string())
}
