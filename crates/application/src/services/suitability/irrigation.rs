//! Growth-stage irrigation scheduling
//!
//! Each stage carries a base frequency, duration, depth and priority. Crop
//! water demand scales the depth; soil and temperature conditions add tips
//! and, at the extremes, override the frequency outright.

use domain::catalog::{crop_profile, crop_profile_or_generic};
use domain::entities::{IrrigationSchedule, SoilData, WeatherObservation};
use domain::value_objects::{GrowthStage, Priority};

/// Above this air temperature (°C) irrigation switches to daily
pub const HEAT_OVERRIDE_C: f64 = 32.0;

/// Below this air temperature (°C) irrigation is stretched out
pub const COOL_OVERRIDE_C: f64 = 12.0;

/// Volumetric soil moisture (%) under which the schedule is escalated
const DRY_SOIL_MOISTURE_PCT: f64 = 15.0;

struct StagePlan {
    frequency: &'static str,
    duration: &'static str,
    /// Base application depth in mm for a moderate-demand crop
    depth_mm: f64,
    time_of_day: &'static str,
    priority: Priority,
    description: &'static str,
}

const fn stage_plan(stage: GrowthStage) -> StagePlan {
    match stage {
        GrowthStage::Germination => StagePlan {
            frequency: "Every 2-3 days",
            duration: "30-45 minutes",
            depth_mm: 10.0,
            time_of_day: "Early morning",
            priority: Priority::High,
            description: "Keep the seedbed evenly moist for uniform emergence",
        },
        GrowthStage::Vegetative => StagePlan {
            frequency: "Every 5-7 days",
            duration: "1-2 hours",
            depth_mm: 20.0,
            time_of_day: "Early morning",
            priority: Priority::Medium,
            description: "Water deeply and less often to encourage root growth",
        },
        GrowthStage::Flowering => StagePlan {
            frequency: "Every 3-4 days",
            duration: "2-3 hours",
            depth_mm: 30.0,
            time_of_day: "Early morning or late afternoon",
            priority: Priority::Critical,
            description: "Moisture stress now cuts pollination and yield the most",
        },
        GrowthStage::GrainFill => StagePlan {
            frequency: "Every 4-5 days",
            duration: "2-3 hours",
            depth_mm: 25.0,
            time_of_day: "Early morning",
            priority: Priority::High,
            description: "Maintain steady moisture while grain or pods fill",
        },
        GrowthStage::Maturity => StagePlan {
            frequency: "Every 10-14 days",
            duration: "1 hour",
            depth_mm: 10.0,
            time_of_day: "Morning",
            priority: Priority::Low,
            description: "Taper off irrigation to let the crop dry down for harvest",
        },
    }
}

/// Irrigation schedule for one crop at one growth stage
///
/// Soil and weather are optional; without them the stage baseline is
/// returned unchanged.
pub fn irrigation_schedule(
    crop: &str,
    stage: GrowthStage,
    soil: Option<&SoilData>,
    weather: Option<&WeatherObservation>,
) -> IrrigationSchedule {
    let plan = stage_plan(stage);
    let profile = crop_profile_or_generic(crop);
    let name = crop_profile(crop).map_or_else(|| crop.trim().to_string(), |p| p.display_name.to_string());

    let depth = plan.depth_mm * profile.water_need.amount_factor();
    let amount = format!("{:.0}-{:.0}mm per application", depth, depth * 1.25);

    let mut frequency = plan.frequency.to_string();
    let mut priority = plan.priority;
    let mut tips = Vec::new();

    if let Some(soil) = soil {
        if soil.ph < 5.5 {
            tips.push(format!(
                "Soil is {} (pH {:.1}): apply agricultural lime before planting to improve nutrient uptake",
                soil.acidity_label(),
                soil.ph
            ));
        } else if soil.ph > 7.5 {
            tips.push(format!(
                "Alkaline soil (pH {:.1}): use ammonium-based fertilisers and watch for zinc deficiency",
                soil.ph
            ));
        }
        if soil.organic_matter < 2.0 {
            tips.push(
                "Low organic matter: work in compost or manure and mulch to hold more water".to_string(),
            );
        }
        if soil.soil_moisture.is_some_and(|m| m < DRY_SOIL_MOISTURE_PCT) {
            priority = priority.escalate();
            tips.push("Soil moisture is low: irrigate at the next opportunity".to_string());
        }
    }

    if let Some(temperature) = weather.and_then(|w| w.temperature) {
        if temperature > HEAT_OVERRIDE_C {
            frequency = "Daily".to_string();
            priority = priority.escalate();
            tips.push(format!(
                "Extreme heat ({temperature:.0}°C): irrigate early and mulch to cut evaporation"
            ));
        } else if temperature < COOL_OVERRIDE_C {
            frequency = "Every 7-10 days".to_string();
            tips.push(format!(
                "Cool conditions ({temperature:.0}°C): reduce watering and avoid evening irrigation"
            ));
        }
    }

    IrrigationSchedule {
        crop: name,
        growth_stage: stage,
        frequency,
        duration: plan.duration.to_string(),
        amount,
        time_of_day: plan.time_of_day.to_string(),
        priority,
        description: plan.description.to_string(),
        tips,
    }
}

/// Schedules for every growth stage, in stage order
pub fn irrigation_plan(
    crop: &str,
    soil: Option<&SoilData>,
    weather: Option<&WeatherObservation>,
) -> Vec<IrrigationSchedule> {
    GrowthStage::all()
        .into_iter()
        .map(|stage| irrigation_schedule(crop, stage, soil, weather))
        .collect()
}
