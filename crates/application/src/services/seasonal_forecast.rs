//! Seasonal forecast generation
//!
//! Produces a month-by-month outlook from site climatology biased by the
//! ENSO phase. Every value depends only on the calendar month and its lead
//! from the as-of month, so shorter horizons are prefixes of longer ones.

use chrono::{Datelike, NaiveDate};
use domain::catalog::site_normal;
use domain::entities::{
    ConditionTag, DroughtRiskAssessment, Location, MonthlyPrediction, RainfallOutlook,
    SeasonalSummary, TemperatureOutlook,
};
use domain::value_objects::{ClimateZone, EnsoStatus, PatternType};
use serde::{Deserialize, Serialize};

use super::drought_scorer::compute_drought_risk;
use super::statistics::{mean, round_to};
use crate::error::ApplicationError;

/// Longest supported forecast horizon in months
pub const MAX_PREDICTION_MONTHS: u32 = 24;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weights for (previous, current, next) month when smoothing ENSO anomalies
const NEIGHBOUR_WEIGHTS: (f64, f64, f64) = (0.25, 0.5, 0.25);

/// Fraction of the rainfall anomaly carried into humidity
const HUMIDITY_COUPLING: f64 = 0.25;

/// Widening of rainfall variability per month of lead
const VARIABILITY_GROWTH_PER_MONTH: f64 = 0.03;

/// Everything produced by one seasonal forecast run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBundle {
    /// Location identifier
    pub location: String,
    pub climate_zone: ClimateZone,
    pub enso_status: EnsoStatus,
    /// Date the forecast was issued for
    pub as_of: NaiveDate,
    pub seasonal_summary: SeasonalSummary,
    pub monthly_predictions: Vec<MonthlyPrediction>,
    pub drought_risk: DroughtRiskAssessment,
    pub farming_recommendations: Vec<String>,
}

/// English name of a calendar month (1-12, wrapping)
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[((month + 11) % 12) as usize]
}

/// Reject horizons outside `1..=MAX_PREDICTION_MONTHS`
pub fn validate_prediction_months(months: u32) -> Result<(), ApplicationError> {
    if (1..=MAX_PREDICTION_MONTHS).contains(&months) {
        Ok(())
    } else {
        Err(ApplicationError::InvalidParameter(format!(
            "prediction_months must be between 1 and {MAX_PREDICTION_MONTHS}, got {months}"
        )))
    }
}

/// Forecast confidence for a lead in months
#[must_use]
pub fn confidence_for_lead(lead: u32) -> f64 {
    round_to((0.90 - 0.05 * f64::from(lead)).max(0.30), 2)
}

/// How much of the ENSO signal survives at a given lead
#[must_use]
pub fn damping_for_lead(lead: u32) -> f64 {
    (1.0 - 0.04 * f64::from(lead)).max(0.5)
}

/// ENSO rainfall anomaly for a month, blended with its calendar neighbours
fn smoothed_rainfall_anomaly(enso: EnsoStatus, month: u32) -> f64 {
    let prev = if month == 1 { 12 } else { month - 1 };
    let next = if month == 12 { 1 } else { month + 1 };
    let (w_prev, w_cur, w_next) = NEIGHBOUR_WEIGHTS;
    w_prev * (enso.rainfall_factor(prev) - 1.0)
        + w_cur * (enso.rainfall_factor(month) - 1.0)
        + w_next * (enso.rainfall_factor(next) - 1.0)
}

/// Outlook for one calendar month at a given lead
pub fn predict_month(
    location: &Location,
    zone: ClimateZone,
    enso: EnsoStatus,
    month: u32,
    lead: u32,
) -> MonthlyPrediction {
    let normal = site_normal(location, zone, month);
    let damping = damping_for_lead(lead);
    let rain_anomaly = damping * smoothed_rainfall_anomaly(enso, month);
    let temp_shift = damping * enso.temperature_offset();

    let temperature = TemperatureOutlook {
        average: round_to(normal.mean_temp() + temp_shift, 1),
        min: round_to(normal.min_temp + temp_shift, 1),
        max: round_to(normal.max_temp + temp_shift, 1),
        normal: round_to(normal.mean_temp(), 1),
    };
    let rainfall = RainfallOutlook {
        total: round_to((normal.rainfall_mm * (1.0 + rain_anomaly)).max(0.0), 1),
        variability: round_to(
            normal.rainfall_cv * (1.0 + VARIABILITY_GROWTH_PER_MONTH * f64::from(lead)),
            2,
        ),
        normal: round_to(normal.rainfall_mm, 1),
    };
    let humidity = round_to(
        (normal.humidity * (1.0 + HUMIDITY_COUPLING * rain_anomaly)).clamp(0.0, 100.0),
        1,
    );

    MonthlyPrediction {
        month,
        month_name: month_name(month).to_string(),
        lead,
        conditions: condition_tags(&temperature, &rainfall),
        temperature,
        rainfall,
        humidity,
        confidence: confidence_for_lead(lead),
    }
}

fn condition_tags(temperature: &TemperatureOutlook, rainfall: &RainfallOutlook) -> Vec<ConditionTag> {
    let mut tags = Vec::with_capacity(4);
    tags.push(match temperature.average {
        t if t >= 25.0 => ConditionTag::Hot,
        t if t >= 20.0 => ConditionTag::Warm,
        t if t >= 15.0 => ConditionTag::Mild,
        _ => ConditionTag::Cool,
    });
    tags.push(match rainfall.total {
        r if r >= 150.0 => ConditionTag::Wet,
        r if r >= 40.0 => ConditionTag::Showers,
        _ => ConditionTag::Dry,
    });
    if temperature.min <= 4.0 {
        tags.push(ConditionTag::FrostRisk);
    }
    if temperature.max >= 32.0 {
        tags.push(ConditionTag::HeatStress);
    }
    tags
}

/// Monthly outlooks starting at the as-of month
pub fn monthly_predictions(
    location: &Location,
    zone: ClimateZone,
    enso: EnsoStatus,
    as_of: NaiveDate,
    months: u32,
) -> Vec<MonthlyPrediction> {
    (0..months)
        .map(|lead| {
            let month = (as_of.month0() + lead) % 12 + 1;
            predict_month(location, zone, enso, month, lead)
        })
        .collect()
}

/// Reduce monthly outlooks to a seasonal summary
///
/// The seasonal type classifies rainfall normalised to a three-month season
/// so horizons of different lengths share the same thresholds.
pub fn summarize(months: &[MonthlyPrediction], enso: EnsoStatus) -> SeasonalSummary {
    let temps: Vec<f64> = months.iter().map(|m| m.temperature.average).collect();
    let humidity: Vec<f64> = months.iter().map(|m| m.humidity).collect();
    let average_temperature = round_to(mean(&temps).unwrap_or_default(), 1);
    let total_rainfall = round_to(months.iter().map(|m| m.rainfall.total).sum(), 1);
    let average_humidity = round_to(mean(&humidity).unwrap_or_default(), 1);

    let per_season = if months.is_empty() {
        0.0
    } else {
        total_rainfall / months.len() as f64 * 3.0
    };
    let seasonal_type = PatternType::classify(average_temperature, per_season);

    let description = match (months.first(), months.last()) {
        (Some(first), Some(last)) => format!(
            "{} to {}: {seasonal_type} outlook under {} conditions, averaging {average_temperature:.1}°C with {total_rainfall:.0}mm of rain",
            first.month_name,
            last.month_name,
            enso.label(),
        ),
        _ => "No forecast months".to_string(),
    };

    SeasonalSummary {
        average_temperature,
        total_rainfall,
        average_humidity,
        seasonal_type,
        description,
    }
}

/// ENSO-driven farming advice plus notes for frost and heat months
pub fn farming_recommendations(enso: EnsoStatus, months: &[MonthlyPrediction]) -> Vec<String> {
    let mut advice: Vec<String> = match enso {
        EnsoStatus::ElNino => vec![
            "Expect below-normal rainfall: favour drought-tolerant crops and short-season varieties".to_string(),
            "Adopt conservation agriculture with mulching to retain soil moisture".to_string(),
            "Plant in staggered batches rather than all at once".to_string(),
        ],
        EnsoStatus::LaNina => vec![
            "Expect above-normal rainfall: check drainage and avoid waterlogged fields".to_string(),
            "Scout regularly for fungal diseases in humid spells".to_string(),
            "Split nitrogen top-dressing to limit leaching losses".to_string(),
        ],
        EnsoStatus::Neutral => vec![
            "Near-normal season expected: plant with the first effective rains".to_string(),
            "Use certified seed and balanced basal fertiliser".to_string(),
        ],
    };

    let frost_months: Vec<&str> = months
        .iter()
        .filter(|m| m.conditions.contains(&ConditionTag::FrostRisk))
        .map(|m| m.month_name.as_str())
        .collect();
    if !frost_months.is_empty() {
        advice.push(format!(
            "Frost risk in {}: delay transplanting and protect nurseries",
            frost_months.join(", ")
        ));
    }

    let hot_months: Vec<&str> = months
        .iter()
        .filter(|m| m.conditions.contains(&ConditionTag::HeatStress))
        .map(|m| m.month_name.as_str())
        .collect();
    if !hot_months.is_empty() {
        advice.push(format!(
            "Heat stress likely in {}: irrigate early in the day and avoid flowering in these months",
            hot_months.join(", ")
        ));
    }

    advice
}

/// Build a full seasonal prediction bundle
///
/// Pure and deterministic for fixed inputs. `months` must already be
/// validated with [`validate_prediction_months`].
pub fn build_prediction_bundle(
    location: &Location,
    zone: ClimateZone,
    enso: EnsoStatus,
    as_of: NaiveDate,
    months: u32,
) -> PredictionBundle {
    let monthly = monthly_predictions(location, zone, enso, as_of, months);
    PredictionBundle {
        location: location.id.clone(),
        climate_zone: zone,
        enso_status: enso,
        as_of,
        seasonal_summary: summarize(&monthly, enso),
        drought_risk: compute_drought_risk(&monthly),
        farming_recommendations: farming_recommendations(enso, &monthly),
        monthly_predictions: monthly,
    }
}
