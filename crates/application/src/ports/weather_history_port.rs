//! Weather history port
//!
//! Defines the interface for retrieving observed weather for a location.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::entities::WeatherObservation;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for historical and current weather observations
#[allow(clippy::struct_field_names)] // automock generates struct with `get_*` prefixes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherHistoryPort: Send + Sync {
    /// Daily observations for `start..=end`, ordered by date
    ///
    /// An empty vector means the source has no data for the range.
    async fn get_daily_history(
        &self,
        location: &GeoLocation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeatherObservation>, ApplicationError>;

    /// Latest observed conditions
    async fn get_current_conditions(
        &self,
        location: &GeoLocation,
    ) -> Result<WeatherObservation, ApplicationError>;

    /// Check if the weather source is available
    async fn is_available(&self) -> bool;
}
