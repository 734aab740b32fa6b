//! Domain entities - Records produced and consumed by the prediction engine

mod agro_prediction;
mod crop_recommendation;
mod drought_risk;
mod irrigation_schedule;
mod location;
mod monthly_prediction;
mod seasonal_pattern;
mod soil_data;
mod weather_observation;

pub use agro_prediction::{
    AgroClimaticPrediction, ClimateIndicators, HumiditySummary, PestDiseaseRisk,
    PrecipitationSummary, SoilConditions, SoilMoistureSummary, TemperatureSummary,
};
pub use crop_recommendation::{CropRecommendation, YieldRange};
pub use drought_risk::{DroughtFactor, DroughtRiskAssessment};
pub use irrigation_schedule::IrrigationSchedule;
pub use location::Location;
pub use monthly_prediction::{
    ConditionTag, MonthlyPrediction, RainfallOutlook, SeasonalSummary, TemperatureOutlook,
};
pub use seasonal_pattern::SeasonalPattern;
pub use soil_data::SoilData;
pub use weather_observation::{Reading, WeatherObservation};
