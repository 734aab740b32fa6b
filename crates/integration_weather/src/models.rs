//! Weather data models
//!
//! Types for daily history and current conditions from the Open-Meteo APIs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition derived from WMO weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// Clear sky (WMO 0)
    ClearSky,
    /// Mainly clear or partly cloudy (WMO 1, 2)
    PartlyCloudy,
    /// Overcast (WMO 3)
    Overcast,
    /// Fog (WMO 45, 48)
    Fog,
    /// Drizzle (WMO 51-57)
    Drizzle,
    /// Rain (WMO 61-67)
    Rain,
    /// Rain showers (WMO 80, 81, 82)
    RainShowers,
    /// Thunderstorm, with or without hail (WMO 95-99)
    Thunderstorm,
    /// Snow or any other code
    Other,
}

impl WeatherCondition {
    /// Convert WMO weather code to `WeatherCondition`
    ///
    /// See: <https://open-meteo.com/en/docs> for WMO code reference
    #[must_use]
    pub const fn from_wmo_code(code: u8) -> Self {
        match code {
            0 => Self::ClearSky,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51..=57 => Self::Drizzle,
            61..=67 => Self::Rain,
            80..=82 => Self::RainShowers,
            95..=99 => Self::Thunderstorm,
            _ => Self::Other,
        }
    }

    /// Whether the condition brings measurable rain
    #[must_use]
    pub const fn is_wet(self) -> bool {
        matches!(
            self,
            Self::Drizzle | Self::Rain | Self::RainShowers | Self::Thunderstorm
        )
    }

    /// Get a human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::RainShowers => "Rain showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// One day of reanalysis history
///
/// The archive leaves gaps as `null`; missing values stay `None` here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    /// Daily mean temperature in °C
    pub temperature_mean: Option<f64>,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    /// Total precipitation in mm
    pub precipitation_sum: Option<f64>,
    /// Mean relative humidity in percent
    pub humidity_mean: Option<f64>,
    /// Maximum wind speed in km/h
    pub wind_speed_max: Option<f64>,
    /// Mean surface pressure in hPa
    pub pressure_mean: Option<f64>,
}

impl DailyObservation {
    /// Whether every field the engine relies on is present
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.temperature_mean.is_some()
            && self.precipitation_sum.is_some()
            && self.humidity_mean.is_some()
    }
}

/// Current conditions at a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: DateTime<Utc>,
    /// Temperature in °C
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Precipitation over the preceding interval in mm
    pub precipitation: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Surface pressure in hPa
    pub pressure: f64,
    pub condition: WeatherCondition,
    pub weather_code: u8,
}

impl CurrentConditions {
    /// Get a concise summary
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}, {:.1}°C, humidity {:.0}%",
            self.condition, self.temperature, self.humidity
        )
    }
}

// ============================================================================
// Raw API shapes
// ============================================================================

/// Current block of a `/forecast` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CurrentData {
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    #[serde(default)]
    pub precipitation: f64,
    pub wind_speed_10m: f64,
    pub surface_pressure: f64,
    pub weather_code: u8,
}

/// Daily block of an `/archive` response, column-oriented
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DailyData {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    pub relative_humidity_2m_mean: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub surface_pressure_mean: Vec<Option<f64>>,
}

/// Envelope shared by the forecast and archive endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiResponse {
    pub current: Option<CurrentData>,
    pub daily: Option<DailyData>,
}

/// Error body returned with HTTP 400
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub reason: String,
}
