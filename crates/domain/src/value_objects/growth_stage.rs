//! Crop growth stage value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Phenological stage of a field crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    /// Sowing to emergence
    Germination,
    /// Leaf and stem development
    Vegetative,
    /// Tasselling, silking, pod set
    Flowering,
    /// Grain or pod filling
    GrainFill,
    /// Physiological maturity and dry-down
    Maturity,
}

impl GrowthStage {
    /// All stages in the order a crop passes through them
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Germination,
            Self::Vegetative,
            Self::Flowering,
            Self::GrainFill,
            Self::Maturity,
        ]
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Germination => "Germination",
            Self::Vegetative => "Vegetative",
            Self::Flowering => "Flowering",
            Self::GrainFill => "Grain fill",
            Self::Maturity => "Maturity",
        }
    }

    /// Whether water stress at this stage costs the most yield
    #[must_use]
    pub const fn is_moisture_critical(self) -> bool {
        matches!(self, Self::Flowering | Self::GrainFill)
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for GrowthStage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "germination" | "planting" | "emergence" | "seedling" => Ok(Self::Germination),
            "vegetative" | "growth" => Ok(Self::Vegetative),
            "flowering" | "tasseling" | "tasselling" | "silking" => Ok(Self::Flowering),
            "grain_fill" | "grain_filling" | "pod_fill" | "fruiting" => Ok(Self::GrainFill),
            "maturity" | "mature" | "harvest" => Ok(Self::Maturity),
            _ => Err(DomainError::invalid_parameter(
                "growth_stage",
                format!("unrecognised value '{s}'"),
            )),
        }
    }
}
