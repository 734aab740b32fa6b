//! Weather observation entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single weather reading, typically one day of station or reanalysis data
///
/// Measured values are `None` where the source reported nothing for the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// When the reading applies
    pub timestamp: DateTime<Utc>,
    /// Mean air temperature in Celsius
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Relative humidity in percent (0-100)
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Precipitation in mm
    #[serde(default)]
    pub precipitation: Option<f64>,
    /// Wind speed in km/h
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// Surface pressure in hPa
    #[serde(default)]
    pub pressure: Option<f64>,
}

/// Gap-free view of an observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub pressure: f64,
}

impl WeatherObservation {
    /// Observation with every measured value present
    #[must_use]
    pub const fn complete(
        timestamp: DateTime<Utc>,
        temperature: f64,
        humidity: f64,
        precipitation: f64,
        wind_speed: f64,
        pressure: f64,
    ) -> Self {
        Self {
            timestamp,
            temperature: Some(temperature),
            humidity: Some(humidity),
            precipitation: Some(precipitation),
            wind_speed: Some(wind_speed),
            pressure: Some(pressure),
        }
    }

    /// Calendar date of the reading (UTC)
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// All measured values, or `None` if any is missing or non-finite
    #[must_use]
    pub fn reading(&self) -> Option<Reading> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        Some(Reading {
            temperature: finite(self.temperature)?,
            humidity: finite(self.humidity)?,
            precipitation: finite(self.precipitation)?,
            wind_speed: finite(self.wind_speed)?,
            pressure: finite(self.pressure)?,
        })
    }

    /// Whether any measured value is missing
    #[must_use]
    pub fn has_gaps(&self) -> bool {
        self.reading().is_none()
    }

    /// Get a concise summary
    #[must_use]
    pub fn summary(&self) -> String {
        let show = |v: Option<f64>, decimals: usize| {
            v.map_or_else(|| "n/a".to_string(), |x| format!("{x:.decimals$}"))
        };
        format!(
            "{}°C, humidity {}%, rain {}mm, wind {} km/h",
            show(self.temperature, 1),
            show(self.humidity, 0),
            show(self.precipitation, 1),
            show(self.wind_speed, 1)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn observation() -> WeatherObservation {
        WeatherObservation::complete(
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            24.3,
            71.0,
            12.4,
            9.5,
            852.0,
        )
    }

    #[test]
    fn date_is_utc_calendar_day() {
        assert_eq!(
            observation().date(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn detects_gaps() {
        let mut obs = observation();
        assert!(!obs.has_gaps());
        assert_eq!(obs.reading().map(|r| r.precipitation), Some(12.4));

        obs.precipitation = None;
        assert!(obs.has_gaps());
        assert!(obs.reading().is_none());
    }

    #[test]
    fn non_finite_value_counts_as_gap() {
        let mut obs = observation();
        obs.temperature = Some(f64::INFINITY);
        assert!(obs.has_gaps());
    }

    #[test]
    fn gap_survives_json_round_trip() {
        let mut obs = observation();
        obs.precipitation = None;

        let json = serde_json::to_string(&obs).unwrap();
        assert!(json.contains(r#""precipitation":null"#));

        let back: WeatherObservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obs);
        assert!(back.has_gaps());
    }

    #[test]
    fn omitted_field_reads_as_gap() {
        let json = r#"{"timestamp":"2024-01-16T12:00:00Z","temperature":22.0,"humidity":60.0,"wind_speed":8.0,"pressure":851.0}"#;
        let obs: WeatherObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.precipitation, None);
        assert!(obs.has_gaps());
    }

    #[test]
    fn summary_formats_values() {
        assert_eq!(
            observation().summary(),
            "24.3°C, humidity 71%, rain 12.4mm, wind 9.5 km/h"
        );
        let mut obs = observation();
        obs.humidity = None;
        assert_eq!(obs.summary(), "24.3°C, humidity n/a%, rain 12.4mm, wind 9.5 km/h");
    }
}
