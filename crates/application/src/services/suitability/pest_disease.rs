//! Pest and disease pressure from weather windows
//!
//! Each threat opens a window over a temperature band; humidity and
//! rainfall conditions inside the window add pressure. A threat outside its
//! temperature band contributes nothing.

use domain::catalog::{CropFamily, crop_profile_or_generic};
use domain::entities::{PestDiseaseRisk, WeatherObservation};
use domain::value_objects::RiskSeverity;

/// Pressure contributed once the temperature window opens
const TEMPERATURE_PRESSURE: f64 = 30.0;
/// Pressure added when humidity is inside the threat's band
const HUMIDITY_PRESSURE: f64 = 35.0;
/// Pressure added when rainfall is inside the threat's band
const RAIN_PRESSURE: f64 = 35.0;

/// Threats at or above this pressure are reported by name
const REPORT_THRESHOLD: f64 = 50.0;

/// Whether a threat is an insect pest or a pathogen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatKind {
    Pest,
    Disease,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    min: f64,
    max: f64,
}

impl Window {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug)]
struct Threat {
    name: &'static str,
    kind: ThreatKind,
    hosts: &'static [CropFamily],
    temperature: Window,
    humidity: Window,
    /// Daily rainfall in mm
    rain: Window,
}

const WET: f64 = 1000.0;

#[rustfmt::skip]
const THREATS: &[Threat] = &[
    Threat { name: "Fall armyworm", kind: ThreatKind::Pest, hosts: &[CropFamily::Cereal], temperature: Window::new(20.0, 32.0), humidity: Window::new(50.0, 100.0), rain: Window::new(0.0, 10.0) },
    Threat { name: "Maize stalk borer", kind: ThreatKind::Pest, hosts: &[CropFamily::Cereal], temperature: Window::new(18.0, 30.0), humidity: Window::new(40.0, 100.0), rain: Window::new(0.0, WET) },
    Threat { name: "Aphids", kind: ThreatKind::Pest, hosts: &[CropFamily::Legume, CropFamily::Oilseed, CropFamily::Solanaceous], temperature: Window::new(15.0, 27.0), humidity: Window::new(0.0, 70.0), rain: Window::new(0.0, 5.0) },
    Threat { name: "Red spider mite", kind: ThreatKind::Pest, hosts: &[CropFamily::Solanaceous, CropFamily::Fibre, CropFamily::Legume], temperature: Window::new(27.0, 40.0), humidity: Window::new(0.0, 50.0), rain: Window::new(0.0, 2.0) },
    Threat { name: "African bollworm", kind: ThreatKind::Pest, hosts: &[CropFamily::Fibre, CropFamily::Solanaceous, CropFamily::Legume, CropFamily::Oilseed], temperature: Window::new(22.0, 35.0), humidity: Window::new(40.0, 90.0), rain: Window::new(0.0, 10.0) },
    Threat { name: "Grey leaf spot", kind: ThreatKind::Disease, hosts: &[CropFamily::Cereal], temperature: Window::new(22.0, 30.0), humidity: Window::new(85.0, 100.0), rain: Window::new(5.0, WET) },
    Threat { name: "Northern corn leaf blight", kind: ThreatKind::Disease, hosts: &[CropFamily::Cereal], temperature: Window::new(18.0, 27.0), humidity: Window::new(80.0, 100.0), rain: Window::new(2.0, WET) },
    Threat { name: "Early leaf spot", kind: ThreatKind::Disease, hosts: &[CropFamily::Legume], temperature: Window::new(25.0, 30.0), humidity: Window::new(85.0, 100.0), rain: Window::new(2.0, WET) },
    Threat { name: "Soybean rust", kind: ThreatKind::Disease, hosts: &[CropFamily::Legume], temperature: Window::new(15.0, 28.0), humidity: Window::new(75.0, 100.0), rain: Window::new(2.0, WET) },
    Threat { name: "Blue mould", kind: ThreatKind::Disease, hosts: &[CropFamily::Solanaceous], temperature: Window::new(15.0, 23.0), humidity: Window::new(90.0, 100.0), rain: Window::new(1.0, WET) },
    Threat { name: "Bacterial wilt", kind: ThreatKind::Disease, hosts: &[CropFamily::Solanaceous], temperature: Window::new(25.0, 35.0), humidity: Window::new(70.0, 100.0), rain: Window::new(10.0, WET) },
    Threat { name: "Alternaria leaf spot", kind: ThreatKind::Disease, hosts: &[CropFamily::Oilseed], temperature: Window::new(25.0, 30.0), humidity: Window::new(80.0, 100.0), rain: Window::new(2.0, WET) },
    Threat { name: "Bacterial blight", kind: ThreatKind::Disease, hosts: &[CropFamily::Fibre], temperature: Window::new(28.0, 35.0), humidity: Window::new(85.0, 100.0), rain: Window::new(5.0, WET) },
];

impl Threat {
    /// Missing readings never satisfy a window
    fn pressure(&self, weather: &WeatherObservation) -> f64 {
        let within = |window: &Window, value: Option<f64>| value.is_some_and(|v| window.contains(v));
        if !within(&self.temperature, weather.temperature) {
            return 0.0;
        }
        let mut pressure = TEMPERATURE_PRESSURE;
        if within(&self.humidity, weather.humidity) {
            pressure += HUMIDITY_PRESSURE;
        }
        if within(&self.rain, weather.precipitation) {
            pressure += RAIN_PRESSURE;
        }
        pressure
    }
}

/// Assess pest or disease pressure for a crop under current conditions
///
/// Crops missing from the table are treated as cereals.
pub fn assess(kind: ThreatKind, crop: &str, weather: &WeatherObservation) -> PestDiseaseRisk {
    let family = crop_profile_or_generic(crop).family;

    let mut scored: Vec<(&Threat, f64)> = THREATS
        .iter()
        .filter(|t| t.kind == kind && t.hosts.contains(&family))
        .map(|t| (t, t.pressure(weather)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let peak = scored.first().map_or(0.0, |(_, p)| *p);
    let level = RiskSeverity::from_pressure(peak);

    PestDiseaseRisk {
        level,
        severity: level.severity(),
        threats: scored
            .iter()
            .filter(|(_, p)| *p >= REPORT_THRESHOLD)
            .map(|(t, _)| t.name.to_string())
            .collect(),
    }
}

/// Insect pest pressure for a crop
pub fn assess_pest_risk(crop: &str, weather: &WeatherObservation) -> PestDiseaseRisk {
    assess(ThreatKind::Pest, crop, weather)
}

/// Disease pressure for a crop
pub fn assess_disease_risk(crop: &str, weather: &WeatherObservation) -> PestDiseaseRisk {
    assess(ThreatKind::Disease, crop, weather)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn weather(temperature: f64, humidity: f64, precipitation: f64) -> WeatherObservation {
        WeatherObservation::complete(Utc::now(), temperature, humidity, precipitation, 5.0, 850.0)
    }

    #[test]
    fn warm_wet_humid_maize_weather_is_critical_for_disease() {
        let risk = assess_disease_risk("maize", &weather(25.0, 90.0, 12.0));
        assert_eq!(risk.level, RiskSeverity::Critical);
        assert_eq!(risk.severity, 3);
        assert_eq!(risk.threats, vec!["Grey leaf spot", "Northern corn leaf blight"]);
    }

    #[test]
    fn cold_weather_closes_every_window() {
        let risk = assess_disease_risk("maize", &weather(8.0, 95.0, 20.0));
        assert_eq!(risk.level, RiskSeverity::Low);
        assert_eq!(risk.severity, 0);
        assert!(risk.threats.is_empty());
    }

    #[test]
    fn temperature_alone_is_medium() {
        // Leaf disease windows open on temperature but the canopy stays dry
        let risk = assess_disease_risk("maize", &weather(24.0, 30.0, 0.0));
        assert_eq!(risk.level, RiskSeverity::Medium);
        assert!(risk.threats.is_empty());
    }

    #[test]
    fn hot_dry_weather_favours_mites_on_cotton() {
        let risk = assess_pest_risk("cotton", &weather(33.0, 30.0, 0.0));
        assert_eq!(risk.level, RiskSeverity::Critical);
        assert_eq!(risk.threats.first().map(String::as_str), Some("Red spider mite"));
    }

    #[test]
    fn unknown_crop_uses_cereal_threats() {
        let risk = assess_pest_risk("teff", &weather(25.0, 60.0, 1.0));
        assert!(risk.threats.iter().any(|t| t == "Fall armyworm"));
    }

    #[test]
    fn pests_and_diseases_are_separate() {
        let w = weather(25.0, 90.0, 12.0);
        let pests = assess_pest_risk("maize", &w);
        assert!(!pests.threats.iter().any(|t| t == "Grey leaf spot"));
    }

    #[test]
    fn missing_temperature_means_no_pressure() {
        let mut w = weather(25.0, 90.0, 12.0);
        w.temperature = None;
        let risk = assess_disease_risk("maize", &w);
        assert_eq!(risk.severity, 0);
        assert!(risk.threats.is_empty());
    }
}
