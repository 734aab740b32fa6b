//! Irrigation schedule entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{GrowthStage, Priority};

/// Watering plan for one crop at one growth stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationSchedule {
    pub crop: String,
    pub growth_stage: GrowthStage,
    /// e.g. "Every 3-4 days"
    pub frequency: String,
    /// e.g. "2-3 hours"
    pub duration: String,
    /// e.g. "25-30mm per application"
    pub amount: String,
    pub time_of_day: String,
    pub priority: Priority,
    pub description: String,
    /// Adjustments for soil and temperature conditions
    pub tips: Vec<String>,
}
