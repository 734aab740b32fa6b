//! Monthly and seasonal forecast entities

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::PatternType;

/// Forecast temperatures for one month, in Celsius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureOutlook {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Climatological mean for the month at this site
    pub normal: f64,
}

impl TemperatureOutlook {
    /// Departure of the forecast mean from normal
    #[must_use]
    pub fn anomaly(&self) -> f64 {
        self.average - self.normal
    }
}

/// Forecast rainfall for one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainfallOutlook {
    /// Expected monthly total in mm
    pub total: f64,
    /// Coefficient of variation of the total
    pub variability: f64,
    /// Climatological total for the month in mm
    pub normal: f64,
}

impl RainfallOutlook {
    /// Forecast total as a fraction of normal (1.0 when normal is zero)
    #[must_use]
    pub fn percent_of_normal(&self) -> f64 {
        if self.normal <= f64::EPSILON {
            1.0
        } else {
            self.total / self.normal
        }
    }
}

/// Qualitative tag attached to a month's outlook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTag {
    Hot,
    Warm,
    Mild,
    Cool,
    Wet,
    Showers,
    Dry,
    FrostRisk,
    HeatStress,
}

impl ConditionTag {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Warm => "warm",
            Self::Mild => "mild",
            Self::Cool => "cool",
            Self::Wet => "wet",
            Self::Showers => "showers",
            Self::Dry => "dry",
            Self::FrostRisk => "frost risk",
            Self::HeatStress => "heat stress",
        }
    }
}

impl fmt::Display for ConditionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outlook for a single calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPrediction {
    /// Calendar month, 1-12
    pub month: u32,
    /// English month name
    pub month_name: String,
    /// Months ahead of the forecast's as-of month (0 = current month)
    pub lead: u32,
    pub temperature: TemperatureOutlook,
    pub rainfall: RainfallOutlook,
    /// Mean relative humidity in percent
    pub humidity: f64,
    /// Ordered condition tags
    pub conditions: Vec<ConditionTag>,
    /// Forecast confidence, 0.0-1.0, non-increasing with lead
    pub confidence: f64,
}

/// Reduction of a monthly outlook sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalSummary {
    /// Mean of monthly average temperatures
    pub average_temperature: f64,
    /// Sum of monthly rainfall totals
    pub total_rainfall: f64,
    /// Mean of monthly humidity
    pub average_humidity: f64,
    pub seasonal_type: PatternType,
    pub description: String,
}
