//! Weather history adapter - Implements `WeatherHistoryPort` using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherHistoryPort;
use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use domain::entities::WeatherObservation;
use domain::value_objects::GeoLocation;
use integration_weather::{
    CurrentConditions, DailyObservation, OpenMeteoClient, WeatherClient, WeatherConfig,
    WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for observed weather using the Open-Meteo archive
pub struct WeatherHistoryAdapter {
    client: OpenMeteoClient,
}

impl std::fmt::Debug for WeatherHistoryAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherHistoryAdapter")
            .field("client", &"OpenMeteoClient")
            .finish()
    }
}

impl WeatherHistoryAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(WeatherConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client =
            OpenMeteoClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::InvalidCoordinates => {
                ApplicationError::InvalidParameter("Invalid coordinates".into())
            },
            WeatherError::InvalidRange(reason) => ApplicationError::InvalidParameter(reason),
            WeatherError::RateLimitExceeded => {
                ApplicationError::DataUnavailable("Weather service rate limit exceeded".into())
            },
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ParseError(e)
            | WeatherError::ServiceUnavailable(e) => {
                ApplicationError::DataUnavailable(format!("Weather service: {e}"))
            },
        }
    }

    /// Convert one archive day; values the archive left null stay `None`
    fn map_daily(day: &DailyObservation) -> WeatherObservation {
        let noon = day
            .date
            .and_hms_opt(12, 0, 0)
            .map_or_else(Utc::now, |naive| Utc.from_utc_datetime(&naive));
        WeatherObservation {
            timestamp: noon,
            temperature: day.temperature_mean,
            humidity: day.humidity_mean,
            precipitation: day.precipitation_sum,
            wind_speed: day.wind_speed_max,
            pressure: day.pressure_mean,
        }
    }

    fn map_current(current: &CurrentConditions) -> WeatherObservation {
        WeatherObservation::complete(
            current.time,
            current.temperature,
            current.humidity,
            current.precipitation,
            current.wind_speed,
            current.pressure,
        )
    }
}

#[async_trait]
impl WeatherHistoryPort for WeatherHistoryAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_daily_history(
        &self,
        location: &GeoLocation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherObservation>, ApplicationError> {
        let days = self
            .client
            .get_daily_history(location.latitude(), location.longitude(), start, end)
            .await
            .map_err(Self::map_error)?;

        let gaps = days.iter().filter(|d| !d.is_complete()).count();
        debug!(days = days.len(), gaps, "Retrieved daily weather history");

        Ok(days.iter().map(Self::map_daily).collect())
    }

    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_current_conditions(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherObservation, ApplicationError> {
        let current = self
            .client
            .get_current(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;

        debug!(summary = %current.summary(), "Retrieved current conditions");
        Ok(Self::map_current(&current))
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
