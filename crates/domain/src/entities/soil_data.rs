//! Soil snapshot entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Topsoil properties for a point, as reported by a soil-data source
///
/// Fields a source cannot provide are `None`. The engine only reads this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilData {
    /// Where the sample or grid cell lies
    pub location: GeoLocation,
    /// pH in water (0-14)
    pub ph: f64,
    /// Organic matter in percent
    pub organic_matter: f64,
    /// Total nitrogen in g/kg
    pub nitrogen: f64,
    /// Available phosphorus in mg/kg
    pub phosphorus: Option<f64>,
    /// Exchangeable potassium in cmol/kg
    pub potassium: Option<f64>,
    /// Volumetric soil moisture in percent
    pub soil_moisture: Option<f64>,
    /// Soil temperature at 10cm in Celsius
    pub soil_temperature: Option<f64>,
    /// Soil class, e.g. "Sandy loam (granite-derived)"
    pub soil_type: String,
    /// Drainage class, e.g. "well drained"
    pub drainage: String,
    /// USDA texture class
    pub texture: String,
    /// When the source last refreshed the values
    pub last_updated: DateTime<Utc>,
}

impl SoilData {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=14.0).contains(&self.ph) {
            return Err(DomainError::ValidationError(format!(
                "ph {} outside 0-14",
                self.ph
            )));
        }
        if !(0.0..=100.0).contains(&self.organic_matter) {
            return Err(DomainError::ValidationError(format!(
                "organic matter {}% outside 0-100",
                self.organic_matter
            )));
        }
        if self.nitrogen < 0.0 || self.nitrogen.is_nan() {
            return Err(DomainError::ValidationError(format!(
                "nitrogen {} is negative",
                self.nitrogen
            )));
        }
        Ok(())
    }

    /// Short acidity description used in recommendations
    #[must_use]
    pub fn acidity_label(&self) -> &'static str {
        match self.ph {
            p if p < 5.0 => "strongly acidic",
            p if p < 5.5 => "moderately acidic",
            p if p < 6.5 => "slightly acidic",
            p if p <= 7.5 => "neutral",
            _ => "alkaline",
        }
    }
}
