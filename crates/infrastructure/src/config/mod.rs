//! Application configuration
//!
//! Split into focused sub-modules:
//! - `cache`: weather history cache TTL and size
//! - `prediction`: fetch timeout, history window, assumed ENSO phase
//!
//! Upstream client settings reuse the integration crates' own config types.

mod cache;
mod prediction;

use std::path::Path;

use integration_soil::SoilConfig;
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};

pub use cache::CacheConfig;
pub use prediction::PredictionAppConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix for environment overrides, e.g. `AGROCLIMATE_PREDICTION__HISTORY_DAYS`
pub const ENV_PREFIX: &str = "AGROCLIMATE";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Open-Meteo client settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// SoilGrids client settings
    #[serde(default)]
    pub soil: SoilConfig,

    /// Prediction service settings
    #[serde(default)]
    pub prediction: PredictionAppConfig,

    /// Weather history cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and the environment
    ///
    /// Nested keys use a double underscore, e.g.
    /// `AGROCLIMATE_WEATHER__TIMEOUT_SECS=10`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file plus the environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = AppConfig::default();
        assert_eq!(config.weather.archive_url, "https://archive-api.open-meteo.com/v1");
        assert_eq!(config.soil.depth, "0-5cm");
        assert_eq!(config.prediction.history_days, 365);
        assert!(config.cache.enabled);
        assert!(!config.telemetry.json);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let config = AppConfig::load().unwrap();
        assert_eq!(config.prediction.fetch_timeout_secs, 20);
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[weather]
timeout_secs = 12

[prediction]
history_days = 180
enso_status = "el_nino"

[cache]
enabled = false

[telemetry]
json = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.weather.timeout_secs, 12);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.prediction.history_days, 180);
        assert!(!config.cache.enabled);
        assert!(config.telemetry.json);

        let service = config.prediction.to_prediction_config().unwrap();
        assert_eq!(service.enso_status, domain::value_objects::EnsoStatus::ElNino);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(AppConfig::load_from(Path::new("/nonexistent/agroclimate.toml")).is_err());
    }

    #[test]
    fn serialization_round_trip_keeps_sections() {
        let json = serde_json::to_value(AppConfig::default()).unwrap();
        for section in ["weather", "soil", "prediction", "cache", "telemetry"] {
            assert!(json.get(section).is_some(), "missing {section}");
        }
    }
}
