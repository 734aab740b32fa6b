//! SoilGrids client
//!
//! HTTP client for the ISRIC SoilGrids v2 properties query.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiResponse, SoilProfile};

/// Properties requested from the query endpoint
const PROPERTIES: [&str; 7] = ["phh2o", "soc", "nitrogen", "cec", "clay", "sand", "silt"];

/// Soil client errors
#[derive(Debug, Error)]
pub enum SoilError {
    /// Connection to the soil service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the soil service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from soil service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// The grid cell has no soil values (water, urban or outside coverage)
    #[error("No soil data at {latitude}, {longitude}")]
    NoData { latitude: f64, longitude: f64 },

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Soil service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilConfig {
    /// SoilGrids API base URL (default: <https://rest.isric.org/soilgrids/v2.0>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Depth interval to read (default: 0-5cm)
    #[serde(default = "default_depth")]
    pub depth: String,
}

fn default_base_url() -> String {
    "https://rest.isric.org/soilgrids/v2.0".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_depth() -> String {
    "0-5cm".to_string()
}

impl Default for SoilConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            depth: default_depth(),
        }
    }
}

/// Soil client trait for fetching topsoil properties
#[async_trait]
pub trait SoilClient: Send + Sync {
    /// Get the topsoil profile for a point
    async fn get_profile(&self, latitude: f64, longitude: f64) -> Result<SoilProfile, SoilError>;

    /// Check if the soil service is healthy
    async fn is_healthy(&self) -> bool;
}

/// SoilGrids HTTP client implementation
#[derive(Debug)]
pub struct SoilGridsClient {
    client: Client,
    config: SoilConfig,
}

impl SoilGridsClient {
    /// Create a new SoilGrids client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: SoilConfig) -> Result<Self, SoilError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SoilError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, SoilError> {
        Self::new(SoilConfig::default())
    }

    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), SoilError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(SoilError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Build the properties query URL
    ///
    /// SoilGrids expects `property` repeated once per variable.
    fn build_query_url(&self, latitude: f64, longitude: f64) -> String {
        let properties: String = PROPERTIES
            .iter()
            .map(|p| format!("&property={p}"))
            .collect();
        format!(
            "{}/properties/query?lon={}&lat={}{}&depth={}&value=mean",
            self.config.base_url, longitude, latitude, properties, self.config.depth
        )
    }

    fn parse_profile(
        response: &ApiResponse,
        latitude: f64,
        longitude: f64,
        depth: &str,
    ) -> SoilProfile {
        let value = |name: &str| {
            response
                .properties
                .layers
                .iter()
                .find(|l| l.name == name)
                .and_then(|l| l.mean_at(depth))
        };

        SoilProfile {
            latitude,
            longitude,
            depth: depth.to_string(),
            ph: value("phh2o"),
            organic_carbon: value("soc"),
            nitrogen: value("nitrogen"),
            cec: value("cec"),
            clay: value("clay"),
            sand: value("sand"),
            silt: value("silt"),
        }
    }
}

#[async_trait]
impl SoilClient for SoilGridsClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_profile(&self, latitude: f64, longitude: f64) -> Result<SoilProfile, SoilError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.build_query_url(latitude, longitude);
        debug!(url = %url, "Fetching soil properties");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SoilError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SoilError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(SoilError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(SoilError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| SoilError::ParseError(e.to_string()))?;

        let profile = Self::parse_profile(&api_response, latitude, longitude, &self.config.depth);
        if !profile.is_usable() {
            debug!(?profile, "Soil cell has no usable chemistry");
            return Err(SoilError::NoData {
                latitude,
                longitude,
            });
        }
        Ok(profile)
    }

    async fn is_healthy(&self) -> bool {
        // Harare
        self.get_profile(-17.8292, 31.0522).await.is_ok()
    }
}
