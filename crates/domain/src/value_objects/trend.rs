//! Direction of change for a climate metric

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative direction derived from a fitted slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Stable,
    Falling,
}

impl Trend {
    /// Classify a slope, treating `|slope| <= tolerance` as stable
    #[must_use]
    pub fn from_slope(slope: f64, tolerance: f64) -> Self {
        if slope.is_nan() || slope.abs() <= tolerance {
            Self::Stable
        } else if slope > 0.0 {
            Self::Rising
        } else {
            Self::Falling
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Stable => "stable",
            Self::Falling => "falling",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
