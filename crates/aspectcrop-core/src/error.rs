//! Session-level error type.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::interaction::NotReadyError;
use crate::raster::ProcessError;

/// Any failure a crop session can report to its caller.
///
/// Aspect ratio problems never appear here: malformed ratios degrade to 1:1.
#[derive(Debug, Error)]
pub enum CropError {
    /// Confirm was called before the preview geometry existed.
    #[error(transparent)]
    NotReady(#[from] NotReadyError),

    /// The source image could not be read. The session cannot continue.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The output could not be produced. The session stays open for a retry.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl From<ProcessError> for CropError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Decode(e) => CropError::Decode(e),
            ProcessError::Encode(e) => CropError::Encode(e),
        }
    }
}

impl CropError {
    /// Whether the operator may retry `confirm` on the same session.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CropError::Encode(_))
    }
}
