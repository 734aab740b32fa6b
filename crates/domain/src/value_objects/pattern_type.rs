//! Seasonal pattern classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mean temperature (°C) at or above which a season counts as hot
pub const HOT_THRESHOLD_C: f64 = 22.0;

/// Mean temperature (°C) at or below which a season counts as cool
pub const COOL_THRESHOLD_C: f64 = 18.0;

/// Seasonal rainfall (mm) at or above which a season counts as wet
pub const WET_THRESHOLD_MM: f64 = 150.0;

/// Seasonal rainfall (mm) at or below which a season counts as dry
pub const DRY_THRESHOLD_MM: f64 = 50.0;

/// Temperature/rainfall character of a season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    HotWet,
    HotDry,
    CoolWet,
    CoolDry,
    /// Either axis falls between its thresholds
    Moderate,
}

impl PatternType {
    /// Classify a season from its mean temperature and total rainfall
    #[must_use]
    pub fn classify(average_temperature: f64, total_precipitation: f64) -> Self {
        let hot = average_temperature >= HOT_THRESHOLD_C;
        let cool = average_temperature <= COOL_THRESHOLD_C;
        let wet = total_precipitation >= WET_THRESHOLD_MM;
        let dry = total_precipitation <= DRY_THRESHOLD_MM;

        match (hot, cool, wet, dry) {
            (true, _, true, _) => Self::HotWet,
            (true, _, _, true) => Self::HotDry,
            (_, true, true, _) => Self::CoolWet,
            (_, true, _, true) => Self::CoolDry,
            _ => Self::Moderate,
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HotWet => "hot and wet",
            Self::HotDry => "hot and dry",
            Self::CoolWet => "cool and wet",
            Self::CoolDry => "cool and dry",
            Self::Moderate => "moderate",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
