//! Crop suitability and recommendation engine
//!
//! Scores a crop against soil and current weather using the crop table,
//! builds recommendations, and gathers irrigation and pest/disease advice
//! into a single insight record.

pub mod irrigation;
pub mod pest_disease;

use domain::catalog::{
    CropProfile, GENERIC_PROFILE, all_crops, crop_profile, crop_profile_or_generic,
};
use domain::entities::{
    CropRecommendation, IrrigationSchedule, Location, PestDiseaseRisk, SoilData,
    WeatherObservation, YieldRange,
};
use domain::value_objects::{GrowthStage, RiskSeverity};
use serde::{Deserialize, Serialize};

pub use irrigation::{irrigation_plan, irrigation_schedule};
pub use pest_disease::{ThreatKind, assess_disease_risk, assess_pest_risk};

/// Score every crop starts from before bonuses
pub const BASE_SUITABILITY: u8 = 50;

/// Alternatives must score at least this to be suggested
const ALTERNATIVE_MIN_SCORE: u8 = 60;

/// Number of alternative crops suggested alongside the requested one
const MAX_ALTERNATIVES: usize = 2;

/// Advice for one crop at one location and growth stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInsights {
    /// Location identifier
    pub location: String,
    pub crop: String,
    pub growth_stage: GrowthStage,
    /// Present only when both soil and weather were supplied
    pub suitability_score: Option<u8>,
    /// Requested crop first, then better-scoring alternatives
    pub crop_recommendations: Vec<CropRecommendation>,
    pub irrigation: IrrigationSchedule,
    pub pest_risk: Option<PestDiseaseRisk>,
    pub disease_risk: Option<PestDiseaseRisk>,
    /// Plain-language advice in priority order
    pub recommendations: Vec<String>,
}

fn score_profile(profile: &CropProfile, soil: &SoilData, weather: &WeatherObservation) -> u8 {
    let mut score = u32::from(BASE_SUITABILITY);
    if profile.ph.contains(soil.ph) {
        score += u32::from(profile.ph.bonus);
    }
    if soil.organic_matter >= profile.organic_matter.min {
        score += u32::from(profile.organic_matter.bonus);
    }
    if weather.temperature.is_some_and(|t| profile.temperature.contains(t)) {
        score += u32::from(profile.temperature.bonus);
    }
    score.min(100) as u8
}

/// Suitability of a crop for the given soil and weather, 0-100
///
/// Crops missing from the table are scored with the generic profile.
pub fn calculate_suitability(crop: &str, soil: &SoilData, weather: &WeatherObservation) -> u8 {
    score_profile(crop_profile_or_generic(crop), soil, weather)
}

/// Recommendation record for a crop with a precomputed score
///
/// Unknown crops get the generic template with the input as name.
pub fn create_crop_recommendation(crop: &str, suitability_score: u8) -> CropRecommendation {
    let profile = crop_profile(crop);
    let template = profile.unwrap_or(&GENERIC_PROFILE);
    let name = profile.map_or_else(|| crop.trim().to_string(), |p| p.display_name.to_string());
    let lines = |items: &[&str]| items.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();

    CropRecommendation {
        name,
        variety: template.variety.to_string(),
        planting_date: template.planting_window.to_string(),
        harvest_date: template.harvest_window.to_string(),
        expected_yield: YieldRange {
            low_t_per_ha: template.yield_range.0,
            high_t_per_ha: template.yield_range.1,
        },
        suitability_score: suitability_score.min(100),
        description: template.description.to_string(),
        requirements: lines(template.requirements),
        benefits: lines(template.benefits),
        challenges: lines(template.challenges),
    }
}

/// Every catalog crop scored against the conditions, best first
///
/// Ties keep catalog order.
pub fn rank_crops(soil: &SoilData, weather: &WeatherObservation) -> Vec<(&'static str, u8)> {
    let mut ranked: Vec<(&'static str, u8)> = all_crops()
        .iter()
        .map(|p| (p.key, score_profile(p, soil, weather)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// Assemble insights for one crop
///
/// Without both weather and soil there is nothing to score against, so the
/// recommendation lists come back empty and only the stage baseline
/// irrigation schedule is filled in.
pub fn crop_insights(
    location: &Location,
    weather: Option<&WeatherObservation>,
    soil: Option<&SoilData>,
    crop: &str,
    stage: GrowthStage,
) -> CropInsights {
    let irrigation = irrigation_schedule(crop, stage, soil, weather);
    let pest_risk = weather.map(|w| assess_pest_risk(crop, w));
    let disease_risk = weather.map(|w| assess_disease_risk(crop, w));

    let (Some(weather), Some(soil)) = (weather, soil) else {
        return CropInsights {
            location: location.id.clone(),
            crop: irrigation.crop.clone(),
            growth_stage: stage,
            suitability_score: None,
            crop_recommendations: Vec::new(),
            irrigation,
            pest_risk,
            disease_risk,
            recommendations: Vec::new(),
        };
    };

    let score = calculate_suitability(crop, soil, weather);
    let requested_key = crop_profile(crop).map(|p| p.key);

    let mut crop_recommendations = vec![create_crop_recommendation(crop, score)];
    crop_recommendations.extend(
        rank_crops(soil, weather)
            .into_iter()
            .filter(|(key, s)| Some(*key) != requested_key && *s > score && *s >= ALTERNATIVE_MIN_SCORE)
            .take(MAX_ALTERNATIVES)
            .map(|(key, s)| create_crop_recommendation(key, s)),
    );

    let recommendations = advice(
        &crop_recommendations[0],
        soil,
        stage,
        pest_risk.as_ref(),
        disease_risk.as_ref(),
    );

    CropInsights {
        location: location.id.clone(),
        crop: crop_recommendations[0].name.clone(),
        growth_stage: stage,
        suitability_score: Some(score),
        crop_recommendations,
        irrigation,
        pest_risk,
        disease_risk,
        recommendations,
    }
}

fn advice(
    requested: &CropRecommendation,
    soil: &SoilData,
    stage: GrowthStage,
    pest_risk: Option<&PestDiseaseRisk>,
    disease_risk: Option<&PestDiseaseRisk>,
) -> Vec<String> {
    let mut advice = vec![format!(
        "{} is {} here (score {}/100)",
        requested.name,
        requested.suitability_label(),
        requested.suitability_score
    )];

    for (label, risk) in [("Pest", pest_risk), ("Disease", disease_risk)] {
        if let Some(risk) = risk
            && risk.level >= RiskSeverity::High
        {
            advice.push(format!(
                "{label} pressure is {}: scout fields and prepare control for {}",
                risk.level.label().to_lowercase(),
                risk.threats.join(", ")
            ));
        }
    }

    if stage.is_moisture_critical() {
        advice.push(format!(
            "{} is the most water-sensitive stage: avoid any moisture stress",
            stage.label()
        ));
    }

    if soil.ph < 5.5 {
        advice.push(format!("Correct {} soil with lime", soil.acidity_label()));
    }
    if soil.organic_matter < 2.0 {
        advice.push("Build organic matter with crop residues, compost or manure".to_string());
    }

    advice
}
