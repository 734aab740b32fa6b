//! Application services - Use case implementations

pub mod drought_scorer;
pub mod insight_aggregator;
pub mod pattern_analyzer;
mod prediction_service;
pub mod seasonal_forecast;
mod statistics;
pub mod suitability;
pub mod weather_analysis;

pub use drought_scorer::compute_drought_risk;
pub use insight_aggregator::{build_agro_prediction, horizon_months};
pub use pattern_analyzer::analyze_patterns;
pub use prediction_service::{
    AgroPredictionService, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_HISTORY_DAYS, PredictionConfig,
};
pub use seasonal_forecast::{MAX_PREDICTION_MONTHS, PredictionBundle, build_prediction_bundle};
pub use suitability::{CropInsights, calculate_suitability, create_crop_recommendation};
pub use weather_analysis::{MAX_DAYS_AHEAD, WeatherAnalysis, analyze_weather};
