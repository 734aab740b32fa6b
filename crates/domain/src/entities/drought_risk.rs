//! Drought risk assessment entity

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::RiskLevel;

/// Driver that pushed the drought score up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroughtFactor {
    /// Forecast rainfall well below normal in the rainy months
    RainfallDeficit,
    /// Forecast temperatures above normal
    HeatStress,
    /// Unreliable, erratic rainfall
    RainfallVariability,
}

impl DroughtFactor {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RainfallDeficit => "rainfall deficit",
            Self::HeatStress => "heat stress",
            Self::RainfallVariability => "rainfall variability",
        }
    }
}

impl fmt::Display for DroughtFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Drought risk over a forecast window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroughtRiskAssessment {
    pub risk_level: RiskLevel,
    /// Combined score in [0, 1]
    pub overall_risk: f64,
    /// Component scores in [0, 1]
    pub deficit_score: f64,
    pub heat_score: f64,
    pub variability_score: f64,
    /// Factors above their trigger threshold, in fixed order
    pub factors: Vec<DroughtFactor>,
    /// Catalog recommendations for the level and factors
    pub recommendations: Vec<String>,
}

impl DroughtRiskAssessment {
    /// Assessment for an empty forecast window
    #[must_use]
    pub fn none() -> Self {
        Self {
            risk_level: RiskLevel::Low,
            overall_risk: 0.0,
            deficit_score: 0.0,
            heat_score: 0.0,
            variability_score: 0.0,
            factors: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Whether a factor contributed
    #[must_use]
    pub fn has_factor(&self, factor: DroughtFactor) -> bool {
        self.factors.contains(&factor)
    }
}
