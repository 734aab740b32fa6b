//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo historical archive and current conditions.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{
    ApiErrorBody, ApiResponse, CurrentConditions, CurrentData, DailyData, DailyObservation,
    WeatherCondition,
};

const DAILY_VARIABLES: &str = "temperature_2m_mean,temperature_2m_max,temperature_2m_min,\
     precipitation_sum,relative_humidity_2m_mean,wind_speed_10m_max,surface_pressure_mean";

const CURRENT_VARIABLES: &str =
    "temperature_2m,relative_humidity_2m,precipitation,wind_speed_10m,surface_pressure,weather_code";

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// Date range rejected before or by the service
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl WeatherError {
    /// Whether the failure is caused by the caller's input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidCoordinates | Self::InvalidRange(_))
    }
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo forecast API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Open-Meteo archive API base URL (default: <https://archive-api.open-meteo.com/v1>)
    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_archive_url() -> String {
    "https://archive-api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            archive_url: default_archive_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching weather data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Daily history for `start..=end`, in date order
    async fn get_daily_history(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyObservation>, WeatherError>;

    /// Get current conditions for a location
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// Open-Meteo HTTP client implementation
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Build the API URL for an archive request
    fn build_archive_url(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> String {
        format!(
            "{}/archive?latitude={}&longitude={}&start_date={}&end_date={}&daily={}&timezone=UTC",
            self.config.archive_url,
            latitude,
            longitude,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            DAILY_VARIABLES
        )
    }

    /// Build the API URL for a current conditions request
    fn build_current_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current={}&timezone=UTC",
            self.config.base_url, latitude, longitude, CURRENT_VARIABLES
        )
    }

    async fn fetch(&self, url: &str) -> Result<ApiResponse, WeatherError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, WeatherError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if status == reqwest::StatusCode::BAD_REQUEST {
            let reason = response
                .json::<ApiErrorBody>()
                .await
                .map(|b| b.reason)
                .unwrap_or_default();
            return Err(WeatherError::InvalidRange(if reason.is_empty() {
                format!("HTTP {status}")
            } else {
                reason
            }));
        }
        Err(WeatherError::RequestFailed(format!("HTTP {status}")))
    }

    /// Parse current conditions from API response
    fn parse_current(data: &CurrentData) -> Result<CurrentConditions, WeatherError> {
        Ok(CurrentConditions {
            time: Self::parse_datetime(&data.time)?,
            temperature: data.temperature_2m,
            humidity: data.relative_humidity_2m,
            precipitation: data.precipitation,
            wind_speed: data.wind_speed_10m,
            pressure: data.surface_pressure,
            condition: WeatherCondition::from_wmo_code(data.weather_code),
            weather_code: data.weather_code,
        })
    }

    /// Parse the column-oriented daily block into rows
    ///
    /// Short value columns are padded with `None`.
    fn parse_daily(data: &DailyData) -> Result<Vec<DailyObservation>, WeatherError> {
        let at = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

        data.time
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
                    .map_err(|e| WeatherError::ParseError(format!("Invalid date: {e}")))?;
                Ok(DailyObservation {
                    date,
                    temperature_mean: at(&data.temperature_2m_mean, i),
                    temperature_max: at(&data.temperature_2m_max, i),
                    temperature_min: at(&data.temperature_2m_min, i),
                    precipitation_sum: at(&data.precipitation_sum, i),
                    humidity_mean: at(&data.relative_humidity_2m_mean, i),
                    wind_speed_max: at(&data.wind_speed_10m_max, i),
                    pressure_mean: at(&data.surface_pressure_mean, i),
                })
            })
            .collect()
    }

    /// Timestamps come back as `2024-01-15T12:00` in the requested UTC zone;
    /// full RFC 3339 is accepted for proxies that normalise them.
    fn parse_datetime(s: &str) -> Result<DateTime<Utc>, WeatherError> {
        chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .map(|naive| Utc.from_utc_datetime(&naive))
            .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc)))
            .map_err(|e| WeatherError::ParseError(format!("bad timestamp {s:?}: {e}")))
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude, %start, %end))]
    async fn get_daily_history(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyObservation>, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;
        if start > end {
            return Err(WeatherError::InvalidRange(format!(
                "start {start} is after end {end}"
            )));
        }

        let url = self.build_archive_url(latitude, longitude, start, end);
        debug!(url = %url, "Fetching daily history");

        let api_response = self.fetch(&url).await?;
        let Some(daily) = api_response.daily else {
            warn!("Archive response carried no daily block");
            return Ok(Vec::new());
        };

        let days = Self::parse_daily(&daily)?;
        let incomplete = days.iter().filter(|d| !d.is_complete()).count();
        if incomplete > 0 {
            debug!(days = days.len(), incomplete, "Archive history has gaps");
        }
        Ok(days)
    }

    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.build_current_url(latitude, longitude);
        debug!(url = %url, "Fetching current conditions");

        let api_response = self.fetch(&url).await?;
        let current = api_response.current.ok_or_else(|| {
            WeatherError::ParseError("No current weather data in response".to_string())
        })?;

        Self::parse_current(&current)
    }

    async fn is_healthy(&self) -> bool {
        // Harare
        self.get_current(-17.8292, 31.0522).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenMeteoClient {
        OpenMeteoClient::with_defaults().expect("client creation should succeed")
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_config_defaults() {
        let config = WeatherConfig::default();
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.archive_url, "https://archive-api.open-meteo.com/v1");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(OpenMeteoClient::validate_coordinates(-17.83, 31.05).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(-90.0, -180.0).is_ok());
        assert!(OpenMeteoClient::validate_coordinates(91.0, 0.0).is_err());
        assert!(OpenMeteoClient::validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_build_archive_url() {
        let url = client().build_archive_url(-17.83, 31.05, ymd(2024, 1, 1), ymd(2024, 3, 31));
        assert!(url.starts_with("https://archive-api.open-meteo.com/v1/archive?"));
        assert!(url.contains("latitude=-17.83"));
        assert!(url.contains("start_date=2024-01-01"));
        assert!(url.contains("end_date=2024-03-31"));
        assert!(url.contains("relative_humidity_2m_mean"));
    }

    #[test]
    fn test_build_current_url() {
        let url = client().build_current_url(-20.15, 28.58);
        assert!(url.contains("/forecast?"));
        assert!(url.contains("longitude=28.58"));
        assert!(url.contains("current=temperature_2m"));
    }

    #[test]
    fn test_parse_datetime() {
        let dt = OpenMeteoClient::parse_datetime("2024-01-15T12:00").expect("should parse");
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 12:00");
        let dt = OpenMeteoClient::parse_datetime("2024-01-15T12:00:00+02:00").expect("rfc3339");
        assert_eq!(dt.format("%H:%M").to_string(), "10:00");
        assert!(OpenMeteoClient::parse_datetime("2024-01-15").is_err());
    }

    #[test]
    fn test_parse_daily_pads_short_columns() {
        let data = DailyData {
            time: vec!["2024-01-01".into(), "2024-01-02".into()],
            temperature_2m_mean: vec![Some(22.1), Some(21.4)],
            temperature_2m_max: vec![],
            temperature_2m_min: vec![],
            precipitation_sum: vec![Some(0.0)],
            relative_humidity_2m_mean: vec![Some(70.0), None],
            wind_speed_10m_max: vec![],
            surface_pressure_mean: vec![],
        };
        let days = OpenMeteoClient::parse_daily(&data).expect("should parse");
        assert_eq!(days.len(), 2);
        assert!(days[0].is_complete());
        assert_eq!(days[1].precipitation_sum, None);
        assert!(!days[1].is_complete());
    }

    #[test]
    fn test_parse_daily_rejects_bad_date() {
        let data = DailyData {
            time: vec!["01/01/2024".into()],
            temperature_2m_mean: vec![],
            temperature_2m_max: vec![],
            temperature_2m_min: vec![],
            precipitation_sum: vec![],
            relative_humidity_2m_mean: vec![],
            wind_speed_10m_max: vec![],
            surface_pressure_mean: vec![],
        };
        assert!(matches!(
            OpenMeteoClient::parse_daily(&data),
            Err(WeatherError::ParseError(_))
        ));
    }

    #[test]
    fn test_error_classification() {
        assert!(WeatherError::InvalidCoordinates.is_client_error());
        assert!(WeatherError::InvalidRange("x".into()).is_client_error());
        assert!(!WeatherError::RateLimitExceeded.is_client_error());
    }

    #[test]
    fn test_config_serialization() {
        let config = WeatherConfig {
            base_url: "https://custom.api.com".to_string(),
            archive_url: "https://custom-archive.api.com".to_string(),
            timeout_secs: 60,
        };

        let json = serde_json::to_string(&config).expect("should serialize");
        let deserialized: WeatherConfig = serde_json::from_str(&json).expect("should deserialize");

        assert_eq!(deserialized.archive_url, "https://custom-archive.api.com");
        assert_eq!(deserialized.timeout_secs, 60);
    }

    #[test]
    fn test_config_partial_deserialization() {
        let config: WeatherConfig =
            serde_json::from_str(r#"{"timeout_secs": 5}"#).expect("should deserialize");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.base_url, "https://api.open-meteo.com/v1");
    }
}
