//! Tunables for a crop session.

use serde::{Deserialize, Serialize};

use crate::decode::FilterType;
use crate::geometry::DEFAULT_INITIAL_CROP_FRACTION;

/// Settings shared by the interaction controller and the raster stage.
///
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropConfig {
    /// Longest allowed output edge in pixels (default 1600).
    pub max_dimension: u32,
    /// JPEG quality, 1-100 (default 90).
    pub jpeg_quality: u8,
    /// Smallest crop width a resize drag may produce, in display pixels.
    pub min_crop_size: f64,
    /// Size of the first crop relative to the largest one that fits (0-1).
    pub initial_crop_fraction: f64,
    /// Absolute deviation of width/height from the target ratio tolerated
    /// before the raster stage re-derives height from width.
    pub aspect_tolerance: f64,
    /// Resampling filter used when the crop is scaled to its target size.
    pub filter: FilterType,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1600,
            jpeg_quality: 90,
            min_crop_size: 20.0,
            initial_crop_fraction: DEFAULT_INITIAL_CROP_FRACTION,
            aspect_tolerance: 0.01,
            filter: FilterType::Bilinear,
        }
    }
}

impl CropConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same settings with a different output size limit.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }
}
