//! Prediction service settings.

use std::time::Duration;

use application::{ApplicationError, PredictionConfig};
use domain::value_objects::EnsoStatus;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Settings for the prediction service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionAppConfig {
    /// Upper bound on each weather or soil fetch in seconds (default: 20)
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Days of history fetched for long-term predictions (default: 365)
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// ENSO phase assumed for long-term predictions (default: neutral)
    #[serde(default = "default_enso_status")]
    pub enso_status: String,

    /// Whether alerts are handed to the notifier
    #[serde(default = "default_true")]
    pub notifications: bool,
}

const fn default_fetch_timeout() -> u64 {
    application::DEFAULT_FETCH_TIMEOUT_SECS
}

const fn default_history_days() -> u32 {
    application::DEFAULT_HISTORY_DAYS
}

fn default_enso_status() -> String {
    "neutral".to_string()
}

impl Default for PredictionAppConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout(),
            history_days: default_history_days(),
            enso_status: default_enso_status(),
            notifications: true,
        }
    }
}

impl PredictionAppConfig {
    /// Convert to the service configuration
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the ENSO status or a bound is invalid.
    pub fn to_prediction_config(&self) -> Result<PredictionConfig, ApplicationError> {
        if self.fetch_timeout_secs == 0 {
            return Err(ApplicationError::Configuration(
                "prediction.fetch_timeout_secs must be positive".to_string(),
            ));
        }
        if self.history_days == 0 {
            return Err(ApplicationError::Configuration(
                "prediction.history_days must be positive".to_string(),
            ));
        }
        let enso_status = self
            .enso_status
            .parse::<EnsoStatus>()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(PredictionConfig {
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
            history_days: self.history_days,
            enso_status,
        })
    }
}
