//! Aspect ratio tokens of the form `"W:H"`.
//!
//! The interactive flow must stay usable when a schema carries a malformed
//! ratio, so [`AspectRatio::parse`] never fails: anything it cannot read
//! becomes 1:1. Callers that need to know about the degraded case (schema
//! validation, for instance) use [`AspectRatio::try_parse`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Why an aspect ratio token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AspectRatioError {
    /// The token has no `:` separator.
    #[error("Aspect ratio '{0}' is not of the form W:H")]
    Malformed(String),

    /// A component is not a positive, finite number.
    #[error("Aspect ratio component '{0}' must be a positive number")]
    InvalidComponent(String),
}

/// A locked crop ratio, stored as a pair of positive finite components.
///
/// Components may be fractional (`"2.35:1"`); integer ratios display
/// without a decimal point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    w: f64,
    h: f64,
}

impl AspectRatio {
    /// 1:1, also the fallback for malformed tokens.
    pub const SQUARE: AspectRatio = AspectRatio { w: 1.0, h: 1.0 };
    /// 4:3
    pub const FOUR_THREE: AspectRatio = AspectRatio { w: 4.0, h: 3.0 };
    /// 16:9
    pub const SIXTEEN_NINE: AspectRatio = AspectRatio { w: 16.0, h: 9.0 };

    /// The ratios offered by the schema editor.
    pub const PRESETS: [AspectRatio; 3] = [Self::SQUARE, Self::FOUR_THREE, Self::SIXTEEN_NINE];

    /// Create a ratio from its components. Returns `None` unless both are
    /// positive and finite.
    pub fn new(w: f64, h: f64) -> Option<Self> {
        (is_valid_component(w) && is_valid_component(h)).then_some(Self { w, h })
    }

    /// Parse a `"W:H"` token, falling back to 1:1 on any malformed input.
    pub fn parse(token: &str) -> Self {
        match Self::try_parse(token) {
            Ok(ratio) => ratio,
            Err(e) => {
                tracing::warn!(token = %token, error = %e, "Falling back to 1:1 aspect ratio");
                Self::SQUARE
            }
        }
    }

    /// Parse a `"W:H"` token, reporting why it was rejected.
    ///
    /// Only the first two `:`-separated parts are read; anything after them
    /// is ignored.
    pub fn try_parse(token: &str) -> Result<Self, AspectRatioError> {
        let mut parts = token.trim().split(':');
        let (Some(w), Some(h)) = (parts.next(), parts.next()) else {
            return Err(AspectRatioError::Malformed(token.to_string()));
        };

        let w = parse_component(w)?;
        let h = parse_component(h)?;
        Ok(Self { w, h })
    }

    /// Width component.
    pub fn width(self) -> f64 {
        self.w
    }

    /// Height component.
    pub fn height(self) -> f64 {
        self.h
    }

    /// The scalar `w / h`.
    #[inline]
    pub fn ratio(self) -> f64 {
        self.w / self.h
    }
}

fn is_valid_component(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn parse_component(part: &str) -> Result<f64, AspectRatioError> {
    match part.trim().parse::<f64>() {
        Ok(value) if is_valid_component(value) => Ok(value),
        _ => Err(AspectRatioError::InvalidComponent(part.to_string())),
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::SQUARE
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.w, self.h)
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl Serialize for AspectRatio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AspectRatio {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::parse(&token))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
