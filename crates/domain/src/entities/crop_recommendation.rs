//! Crop recommendation entity

use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected yield band in tonnes per hectare
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldRange {
    pub low_t_per_ha: f64,
    pub high_t_per_ha: f64,
}

impl fmt::Display for YieldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}-{:.1} t/ha",
            self.low_t_per_ha, self.high_t_per_ha
        )
    }
}

/// Advice for growing one crop under the queried conditions
///
/// Built fresh per query from the crop profile table and the computed
/// suitability score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecommendation {
    /// Crop name (the input string for crops missing from the table)
    pub name: String,
    /// Recommended variety or seed class
    pub variety: String,
    /// Planting window, e.g. "Mid November - mid December"
    pub planting_date: String,
    /// Harvest window
    pub harvest_date: String,
    pub expected_yield: YieldRange,
    /// Suitability score, 0-100
    pub suitability_score: u8,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub challenges: Vec<String>,
}

impl CropRecommendation {
    /// Qualitative reading of the suitability score
    #[must_use]
    pub const fn suitability_label(&self) -> &'static str {
        match self.suitability_score {
            80..=100 => "highly suitable",
            60..=79 => "suitable",
            40..=59 => "marginal",
            _ => "unsuitable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yield_range_display() {
        let range = YieldRange {
            low_t_per_ha: 4.0,
            high_t_per_ha: 8.5,
        };
        assert_eq!(range.to_string(), "4.0-8.5 t/ha");
    }
}
