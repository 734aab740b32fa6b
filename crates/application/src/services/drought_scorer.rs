//! Drought risk scoring over a monthly outlook
//!
//! Combines three component scores, each in [0, 1]:
//! rainfall deficit over the rainy months, heat excess from positive
//! temperature anomalies, and rainfall variability. The weighted sum is
//! bucketed into a [`RiskLevel`] and paired with catalog recommendations.

use domain::entities::{DroughtFactor, DroughtRiskAssessment, MonthlyPrediction};
use domain::value_objects::RiskLevel;

use super::statistics::{mean, round_to, unit_clamp};

/// Months with at least this much normal rainfall count as rainy
pub const RAINY_MONTH_MIN_MM: f64 = 20.0;

/// Relative rainfall deficit that saturates the deficit score
const DEFICIT_SATURATION: f64 = 0.35;

/// Mean positive temperature anomaly (°C) that saturates the heat score
const HEAT_SATURATION_C: f64 = 3.0;

/// Coefficient of variation treated as reliable rainfall
const CV_BASELINE: f64 = 0.3;

/// Span of CV above the baseline that saturates the variability score
const CV_SPAN: f64 = 0.6;

const DEFICIT_WEIGHT: f64 = 0.6;
const HEAT_WEIGHT: f64 = 0.3;
const VARIABILITY_WEIGHT: f64 = 0.1;

const DEFICIT_TRIGGER: f64 = 0.3;
const HEAT_TRIGGER: f64 = 0.3;
const VARIABILITY_TRIGGER: f64 = 0.5;

const LOW_RISK_ADVICE: &[&str] = &[
    "Plant with the first effective rains (25mm or more over a few days)",
    "Keep monitoring seasonal updates from the Meteorological Services Department",
];

const MEDIUM_RISK_ADVICE: &[&str] = &[
    "Stagger planting over two to three weeks to spread the risk of dry spells",
    "Prefer medium-maturity varieties over long-season ones",
    "Prepare mulch and planting basins to conserve soil moisture",
];

const HIGH_RISK_ADVICE: &[&str] = &[
    "Shift part of the area to drought-tolerant crops such as sorghum and pearl millet",
    "Use short-season, drought-tolerant seed varieties",
    "Practise conservation agriculture with minimum tillage and permanent soil cover",
    "Secure supplementary water and plan irrigation for critical growth stages",
];

const DEFICIT_ADVICE: &[&str] = &[
    "Harvest rainwater with tied ridges, infiltration pits or farm ponds",
    "Reduce plant population to match expected soil moisture",
];

const HEAT_ADVICE: &[&str] = &[
    "Time planting so flowering avoids the hottest weeks",
    "Irrigate in the early morning or evening to cut evaporation losses",
];

const VARIABILITY_ADVICE: &[&str] = &[
    "Avoid committing all inputs at planting; top-dress once the season establishes",
    "Keep reserve seed for replanting after a false start",
];

/// Score drought risk for a sequence of monthly outlooks
///
/// An empty sequence yields [`DroughtRiskAssessment::none`].
pub fn compute_drought_risk(months: &[MonthlyPrediction]) -> DroughtRiskAssessment {
    if months.is_empty() {
        return DroughtRiskAssessment::none();
    }

    let rainy: Vec<&MonthlyPrediction> = months
        .iter()
        .filter(|m| m.rainfall.normal >= RAINY_MONTH_MIN_MM)
        .collect();

    let deficit_score = round_to(deficit_score(&rainy), 3);
    let heat_score = round_to(heat_score(months), 3);
    let variability_score = round_to(variability_score(&rainy), 3);

    let overall_risk = round_to(
        unit_clamp(
            DEFICIT_WEIGHT * deficit_score
                + HEAT_WEIGHT * heat_score
                + VARIABILITY_WEIGHT * variability_score,
        ),
        2,
    );
    let risk_level = RiskLevel::from_score(overall_risk);

    let mut factors = Vec::new();
    if deficit_score >= DEFICIT_TRIGGER {
        factors.push(DroughtFactor::RainfallDeficit);
    }
    if heat_score >= HEAT_TRIGGER {
        factors.push(DroughtFactor::HeatStress);
    }
    if variability_score >= VARIABILITY_TRIGGER {
        factors.push(DroughtFactor::RainfallVariability);
    }

    DroughtRiskAssessment {
        risk_level,
        overall_risk,
        deficit_score,
        heat_score,
        variability_score,
        recommendations: recommendations(risk_level, &factors),
        factors,
    }
}

fn deficit_score(rainy: &[&MonthlyPrediction]) -> f64 {
    let normal: f64 = rainy.iter().map(|m| m.rainfall.normal).sum();
    if normal <= f64::EPSILON {
        return 0.0;
    }
    let total: f64 = rainy.iter().map(|m| m.rainfall.total).sum();
    let deficit = unit_clamp((normal - total) / normal);
    unit_clamp(deficit / DEFICIT_SATURATION)
}

fn heat_score(months: &[MonthlyPrediction]) -> f64 {
    let excess: Vec<f64> = months
        .iter()
        .map(|m| m.temperature.anomaly().max(0.0))
        .collect();
    unit_clamp(mean(&excess).unwrap_or_default() / HEAT_SATURATION_C)
}

fn variability_score(rainy: &[&MonthlyPrediction]) -> f64 {
    let cvs: Vec<f64> = rainy.iter().map(|m| m.rainfall.variability).collect();
    mean(&cvs).map_or(0.0, |cv| unit_clamp((cv - CV_BASELINE) / CV_SPAN))
}

fn recommendations(level: RiskLevel, factors: &[DroughtFactor]) -> Vec<String> {
    let base = match level {
        RiskLevel::Low => LOW_RISK_ADVICE,
        RiskLevel::Medium => MEDIUM_RISK_ADVICE,
        RiskLevel::High => HIGH_RISK_ADVICE,
    };
    let per_factor = factors.iter().flat_map(|factor| match factor {
        DroughtFactor::RainfallDeficit => DEFICIT_ADVICE,
        DroughtFactor::HeatStress => HEAT_ADVICE,
        DroughtFactor::RainfallVariability => VARIABILITY_ADVICE,
    });
    base.iter()
        .chain(per_factor)
        .map(|s| (*s).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::entities::{RainfallOutlook, TemperatureOutlook};

    fn month(normal_rain: f64, total: f64, cv: f64, anomaly: f64) -> MonthlyPrediction {
        MonthlyPrediction {
            month: 1,
            month_name: "January".to_string(),
            lead: 0,
            temperature: TemperatureOutlook {
                average: 21.0 + anomaly,
                min: 16.0 + anomaly,
                max: 26.0 + anomaly,
                normal: 21.0,
            },
            rainfall: RainfallOutlook {
                total,
                variability: cv,
                normal: normal_rain,
            },
            humidity: 70.0,
            conditions: Vec::new(),
            confidence: 0.9,
        }
    }

    #[test]
    fn empty_window_is_low_risk() {
        let assessment = compute_drought_risk(&[]);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.overall_risk.abs() < f64::EPSILON);
        assert!(assessment.recommendations.is_empty());
    }

    #[test]
    fn normal_season_is_low_risk() {
        let months = vec![month(190.0, 190.0, 0.3, 0.0); 4];
        let assessment = compute_drought_risk(&months);

        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.overall_risk.abs() < f64::EPSILON);
        assert!(assessment.factors.is_empty());
        assert_eq!(assessment.recommendations.len(), LOW_RISK_ADVICE.len());
    }

    #[test]
    fn moderate_deficit_is_medium_risk() {
        // 25% deficit scores 0.714, weighted to 0.43
        let months = vec![month(100.0, 75.0, 0.3, 0.0); 3];
        let assessment = compute_drought_risk(&months);

        assert_eq!(assessment.risk_level, RiskLevel::Medium);
        assert!((assessment.overall_risk - 0.43).abs() < 1e-9);
        assert_eq!(assessment.factors, vec![DroughtFactor::RainfallDeficit]);
        assert_eq!(
            assessment.recommendations.len(),
            MEDIUM_RISK_ADVICE.len() + DEFICIT_ADVICE.len()
        );
    }

    #[test]
    fn dry_hot_erratic_season_saturates() {
        let months = vec![month(150.0, 75.0, 0.9, 3.0); 5];
        let assessment = compute_drought_risk(&months);

        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert!((assessment.overall_risk - 1.0).abs() < 1e-9);
        assert_eq!(
            assessment.factors,
            vec![
                DroughtFactor::RainfallDeficit,
                DroughtFactor::HeatStress,
                DroughtFactor::RainfallVariability,
            ]
        );
        assert_eq!(assessment.recommendations.len(), 10);
        assert_eq!(assessment.recommendations[0], HIGH_RISK_ADVICE[0]);
        assert_eq!(assessment.recommendations[4], DEFICIT_ADVICE[0]);
    }

    #[test]
    fn dry_season_months_do_not_count_towards_deficit() {
        let months = vec![month(3.0, 0.0, 1.5, 0.0), month(1.0, 0.0, 1.8, 0.0)];
        let assessment = compute_drought_risk(&months);

        assert!(assessment.deficit_score.abs() < f64::EPSILON);
        assert!(assessment.variability_score.abs() < f64::EPSILON);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn cooler_than_normal_adds_no_heat() {
        let months = vec![month(100.0, 100.0, 0.3, -2.0); 2];
        assert!(compute_drought_risk(&months).heat_score.abs() < f64::EPSILON);
    }

    #[test]
    fn surplus_rain_does_not_go_negative() {
        let months = vec![month(100.0, 160.0, 0.3, 0.0); 2];
        let assessment = compute_drought_risk(&months);
        assert!(assessment.deficit_score.abs() < f64::EPSILON);
        assert!(assessment.overall_risk >= 0.0);
    }
}
