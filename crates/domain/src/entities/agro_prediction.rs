//! Composite agro-climatic prediction
//!
//! The top-level artifact returned for long-term predictions. Sub-results
//! that could not be derived are `None` rather than placeholder strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CropRecommendation, DroughtRiskAssessment, SoilData};
use crate::value_objects::{RiskSeverity, Trend};

/// Temperature over the prediction horizon, in Celsius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Mean departure from climatology
    pub anomaly: f64,
}

/// Rainfall over the prediction horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationSummary {
    /// Expected total in mm
    pub total: f64,
    /// Climatological total in mm
    pub normal: f64,
    /// Total as a fraction of normal
    pub percent_of_normal: f64,
}

/// Humidity over the prediction horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumiditySummary {
    pub average: f64,
}

/// Soil moisture estimate from the soil snapshot and rainfall outlook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilMoistureSummary {
    /// Volumetric moisture in percent
    pub estimated: f64,
    /// "dry", "adequate" or "saturated"
    pub status: String,
}

/// Pest or disease pressure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestDiseaseRisk {
    pub level: RiskSeverity,
    /// Numeric severity 0-3 for display-neutral consumers
    pub severity: u8,
    /// Threats whose weather windows are open, most severe first
    pub threats: Vec<String>,
}

/// Soil state as presented alongside the prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilConditions {
    pub ph: f64,
    pub organic_matter: f64,
    pub nitrogen: f64,
    pub texture: String,
    pub drainage: String,
    /// Plain-language fertility reading
    pub fertility: String,
}

impl From<&SoilData> for SoilConditions {
    fn from(soil: &SoilData) -> Self {
        let fertility = if soil.organic_matter >= 3.0 && soil.nitrogen >= 1.5 {
            "high"
        } else if soil.organic_matter >= 1.5 {
            "moderate"
        } else {
            "low"
        };
        Self {
            ph: soil.ph,
            organic_matter: soil.organic_matter,
            nitrogen: soil.nitrogen,
            texture: soil.texture.clone(),
            drainage: soil.drainage.clone(),
            fertility: fertility.to_string(),
        }
    }
}

/// Direction of change from recent history plus a combined climate risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateIndicators {
    pub temperature_trend: Option<Trend>,
    pub precipitation_trend: Option<Trend>,
    pub humidity_trend: Option<Trend>,
    /// Combined climate risk in [0, 1]
    pub climate_risk_index: f64,
}

/// Full long-range prediction for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgroClimaticPrediction {
    /// Location identifier
    pub location: String,
    /// Start of the prediction window
    pub date: NaiveDate,
    /// Days covered by the prediction
    pub days_ahead: u32,
    pub temperature: Option<TemperatureSummary>,
    pub precipitation: Option<PrecipitationSummary>,
    pub humidity: Option<HumiditySummary>,
    pub soil_moisture: Option<SoilMoistureSummary>,
    pub crop_recommendation: Option<CropRecommendation>,
    /// Expected yield as a percentage of potential
    pub yield_prediction: Option<f64>,
    pub planting_advice: Option<String>,
    pub harvesting_advice: Option<String>,
    pub pest_risk: Option<PestDiseaseRisk>,
    pub disease_risk: Option<PestDiseaseRisk>,
    pub weather_alerts: Vec<String>,
    pub soil_conditions: Option<SoilConditions>,
    pub climate_indicators: ClimateIndicators,
    pub drought_risk: Option<DroughtRiskAssessment>,
}
