//! Long-term prediction assembly
//!
//! Combines the monthly forecast, drought score, soil snapshot, crop
//! suitability and recent history into one [`AgroClimaticPrediction`].
//! Pure composition: any piece that cannot be derived stays `None`.

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc};
use domain::catalog::days_in_month;
use domain::entities::{
    AgroClimaticPrediction, ClimateIndicators, ConditionTag, CropRecommendation,
    DroughtRiskAssessment, HumiditySummary, Location, MonthlyPrediction, PrecipitationSummary,
    SoilConditions, SoilData, SoilMoistureSummary, TemperatureSummary, WeatherObservation,
};
use domain::value_objects::RiskLevel;

use super::drought_scorer::compute_drought_risk;
use super::statistics::{mean, round_to, unit_clamp};
use super::suitability::{
    assess_disease_risk, assess_pest_risk, calculate_suitability, create_crop_recommendation,
    rank_crops,
};
use super::weather_analysis::{history_trends, weather_alerts};

/// Soil moisture (%) assumed when the soil source reports none
const DEFAULT_SOIL_MOISTURE_PCT: f64 = 25.0;
/// Moisture points gained per 10% of rainfall above normal
const MOISTURE_PER_RAIN_DEPARTURE: f64 = 10.0;
const DRY_SOIL_PCT: f64 = 15.0;
const SATURATED_SOIL_PCT: f64 = 40.0;

/// Share of potential yield lost at maximum drought risk
const DROUGHT_YIELD_PENALTY: f64 = 0.5;

const DROUGHT_RISK_WEIGHT: f64 = 0.5;
const EXTREMES_WEIGHT: f64 = 0.2;
const RAIN_DEPARTURE_WEIGHT: f64 = 0.3;

/// Last day of the horizon, clamped to the calendar's range
fn horizon_end(start: NaiveDate, days_ahead: u32) -> NaiveDate {
    start
        .checked_add_signed(Duration::days(i64::from(days_ahead.max(1)) - 1))
        .unwrap_or(NaiveDate::MAX)
}

/// Calendar months touched by `days_ahead` days starting at `start`
#[must_use]
pub fn horizon_months(start: NaiveDate, days_ahead: u32) -> u32 {
    let end = horizon_end(start, days_ahead);
    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    span.max(0) as u32 + 1
}

/// Fraction of each forecast month inside the horizon
fn coverage(start: NaiveDate, days_ahead: u32, months: &[MonthlyPrediction]) -> Vec<f64> {
    let end = horizon_end(start, days_ahead);
    let mut cursor = start;
    months
        .iter()
        .map(|_| {
            let (year, month) = (cursor.year(), cursor.month());
            let days = days_in_month(year, month);
            let month_end = NaiveDate::from_ymd_opt(year, month, days).unwrap_or(cursor);
            let last = month_end.min(end);
            let covered = (last - cursor).num_days() + 1;
            cursor = month_end.succ_opt().unwrap_or(month_end);
            (covered.max(0) as f64) / f64::from(days)
        })
        .collect()
}

fn temperature_summary(months: &[MonthlyPrediction]) -> Option<TemperatureSummary> {
    let averages: Vec<f64> = months.iter().map(|m| m.temperature.average).collect();
    let anomalies: Vec<f64> = months.iter().map(|m| m.temperature.anomaly()).collect();
    Some(TemperatureSummary {
        average: round_to(mean(&averages)?, 1),
        min: months.iter().map(|m| m.temperature.min).fold(f64::INFINITY, f64::min),
        max: months
            .iter()
            .map(|m| m.temperature.max)
            .fold(f64::NEG_INFINITY, f64::max),
        anomaly: round_to(mean(&anomalies)?, 1),
    })
}

fn precipitation_summary(months: &[MonthlyPrediction], weights: &[f64]) -> Option<PrecipitationSummary> {
    if months.is_empty() {
        return None;
    }
    let total: f64 = months.iter().zip(weights).map(|(m, w)| m.rainfall.total * w).sum();
    let normal: f64 = months.iter().zip(weights).map(|(m, w)| m.rainfall.normal * w).sum();
    let percent_of_normal = if normal <= f64::EPSILON { 1.0 } else { total / normal };
    Some(PrecipitationSummary {
        total: round_to(total, 1),
        normal: round_to(normal, 1),
        percent_of_normal: round_to(percent_of_normal, 2),
    })
}

fn soil_moisture_summary(
    soil: &SoilData,
    precipitation: Option<&PrecipitationSummary>,
) -> SoilMoistureSummary {
    let base = soil.soil_moisture.unwrap_or(DEFAULT_SOIL_MOISTURE_PCT);
    let departure = precipitation.map_or(0.0, |p| p.percent_of_normal - 1.0);
    let estimated = round_to(
        (base + departure * 10.0 * MOISTURE_PER_RAIN_DEPARTURE).clamp(0.0, 60.0),
        1,
    );
    let status = if estimated < DRY_SOIL_PCT {
        "dry"
    } else if estimated > SATURATED_SOIL_PCT {
        "saturated"
    } else {
        "adequate"
    };
    SoilMoistureSummary {
        estimated,
        status: status.to_string(),
    }
}

/// Typical day over the horizon, used to score crops and pests
fn representative_conditions(
    start: NaiveDate,
    months: &[MonthlyPrediction],
    days_ahead: u32,
    precipitation: Option<&PrecipitationSummary>,
) -> Option<WeatherObservation> {
    let temps: Vec<f64> = months.iter().map(|m| m.temperature.average).collect();
    let humidity: Vec<f64> = months.iter().map(|m| m.humidity).collect();
    Some(WeatherObservation {
        timestamp: Utc.from_utc_datetime(&start.and_hms_opt(12, 0, 0)?),
        temperature: Some(mean(&temps)?),
        humidity: Some(mean(&humidity)?),
        precipitation: Some(precipitation.map_or(0.0, |p| p.total / f64::from(days_ahead.max(1)))),
        wind_speed: None,
        pressure: None,
    })
}

fn best_crop(soil: &SoilData, conditions: &WeatherObservation) -> Option<CropRecommendation> {
    let (key, _) = rank_crops(soil, conditions).into_iter().next()?;
    Some(create_crop_recommendation(
        key,
        calculate_suitability(key, soil, conditions),
    ))
}

fn planting_advice(crop: &CropRecommendation, months: &[MonthlyPrediction], drought: &DroughtRiskAssessment) -> String {
    let in_planting_season = months.iter().any(|m| matches!(m.month, 10..=12));
    let mut advice = if in_planting_season {
        format!(
            "Plant {} ({}) {} once at least 25mm of rain has fallen",
            crop.name, crop.variety, crop.planting_date.to_lowercase()
        )
    } else {
        format!(
            "Prepare land and inputs now; {} is planted {}",
            crop.name,
            crop.planting_date.to_lowercase()
        )
    };
    if drought.risk_level == RiskLevel::High {
        advice.push_str(". Drought risk is high, so stagger planting and keep part of the seed in reserve");
    }
    advice
}

fn harvesting_advice(crop: &CropRecommendation, months: &[MonthlyPrediction]) -> String {
    let wet_harvest = months
        .iter()
        .any(|m| matches!(m.month, 4 | 5) && m.conditions.contains(&ConditionTag::Wet));
    let mut advice = format!(
        "Harvest {} in {}; dry produce well before storage",
        crop.name,
        crop.harvest_date.to_lowercase()
    );
    if wet_harvest {
        advice.push_str(". Late rains are likely, so arrange covered drying space");
    }
    advice
}

fn forecast_alerts(months: &[MonthlyPrediction], drought: Option<&DroughtRiskAssessment>) -> Vec<String> {
    let mut alerts = Vec::new();
    for m in months {
        if m.conditions.contains(&ConditionTag::FrostRisk) {
            alerts.push(format!(
                "Frost risk in {}: minimum near {:.0}°C",
                m.month_name, m.temperature.min
            ));
        }
        if m.conditions.contains(&ConditionTag::HeatStress) {
            alerts.push(format!(
                "Heat stress in {}: maximum near {:.0}°C",
                m.month_name, m.temperature.max
            ));
        }
    }
    if let Some(drought) = drought
        && drought.risk_level == RiskLevel::High
    {
        alerts.push(format!(
            "High drought risk ({:.0}%) over the forecast period",
            drought.overall_risk * 100.0
        ));
    }
    alerts
}

fn climate_risk_index(
    months: &[MonthlyPrediction],
    drought: Option<&DroughtRiskAssessment>,
    precipitation: Option<&PrecipitationSummary>,
) -> f64 {
    if months.is_empty() {
        return 0.0;
    }
    let extremes = months
        .iter()
        .filter(|m| {
            m.conditions.contains(&ConditionTag::FrostRisk)
                || m.conditions.contains(&ConditionTag::HeatStress)
        })
        .count() as f64
        / months.len() as f64;
    let departure = precipitation.map_or(0.0, |p| unit_clamp((p.percent_of_normal - 1.0).abs()));
    let drought = drought.map_or(0.0, |d| d.overall_risk);
    round_to(
        unit_clamp(
            DROUGHT_RISK_WEIGHT * drought
                + EXTREMES_WEIGHT * extremes
                + RAIN_DEPARTURE_WEIGHT * departure,
        ),
        2,
    )
}

/// Assemble a long-term prediction
///
/// `months` should be the forecast for [`horizon_months`] months starting at
/// `start`. Without soil data the crop-dependent fields stay empty.
pub fn build_agro_prediction(
    location: &Location,
    start: NaiveDate,
    days_ahead: u32,
    months: &[MonthlyPrediction],
    history: &[WeatherObservation],
    soil: Option<&SoilData>,
) -> AgroClimaticPrediction {
    let weights = coverage(start, days_ahead, months);
    let temperature = temperature_summary(months);
    let precipitation = precipitation_summary(months, &weights);
    let humidity = mean(&months.iter().map(|m| m.humidity).collect::<Vec<_>>())
        .map(|average| HumiditySummary {
            average: round_to(average, 1),
        });
    let drought = (!months.is_empty()).then(|| compute_drought_risk(months));

    let conditions = representative_conditions(start, months, days_ahead, precipitation.as_ref());
    let crop = soil.zip(conditions.as_ref()).and_then(|(s, c)| best_crop(s, c));

    let yield_prediction = crop.as_ref().map(|c| {
        let risk = drought.as_ref().map_or(0.0, |d| d.overall_risk);
        round_to(
            f64::from(c.suitability_score) * (1.0 - DROUGHT_YIELD_PENALTY * risk),
            1,
        )
    });
    let planting = crop
        .as_ref()
        .zip(drought.as_ref())
        .map(|(c, d)| planting_advice(c, months, d));
    let harvesting = crop.as_ref().map(|c| harvesting_advice(c, months));
    let pest_risk = crop
        .as_ref()
        .zip(conditions.as_ref())
        .map(|(c, w)| assess_pest_risk(&c.name, w));
    let disease_risk = crop
        .as_ref()
        .zip(conditions.as_ref())
        .map(|(c, w)| assess_disease_risk(&c.name, w));

    let mut alerts = forecast_alerts(months, drought.as_ref());
    alerts.extend(weather_alerts(history, &[]));

    let trends = history_trends(history);
    let climate_indicators = ClimateIndicators {
        temperature_trend: trends.temperature,
        precipitation_trend: trends.precipitation,
        humidity_trend: trends.humidity,
        climate_risk_index: climate_risk_index(months, drought.as_ref(), precipitation.as_ref()),
    };

    AgroClimaticPrediction {
        location: location.id.clone(),
        date: start,
        days_ahead,
        temperature,
        soil_moisture: soil.map(|s| soil_moisture_summary(s, precipitation.as_ref())),
        precipitation,
        humidity,
        crop_recommendation: crop,
        yield_prediction,
        planting_advice: planting,
        harvesting_advice: harvesting,
        pest_risk,
        disease_risk,
        weather_alerts: alerts,
        soil_conditions: soil.map(SoilConditions::from),
        climate_indicators,
        drought_risk: drought,
    }
}
