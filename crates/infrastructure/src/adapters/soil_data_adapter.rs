//! Soil data adapter - Implements `SoilDataPort` using integration_soil

use application::error::ApplicationError;
use application::ports::SoilDataPort;
use async_trait::async_trait;
use chrono::Utc;
use domain::entities::SoilData;
use domain::value_objects::GeoLocation;
use integration_soil::{SoilClient, SoilConfig, SoilError, SoilGridsClient, SoilProfile};
use tracing::{debug, instrument};

/// Adapter for topsoil properties using SoilGrids
pub struct SoilDataAdapter {
    client: SoilGridsClient,
}

impl std::fmt::Debug for SoilDataAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoilDataAdapter")
            .field("client", &"SoilGridsClient")
            .finish()
    }
}

impl SoilDataAdapter {
    /// Create a new adapter with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(SoilConfig::default())
    }

    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: SoilConfig) -> Result<Self, ApplicationError> {
        let client =
            SoilGridsClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration soil error to application error
    fn map_error(err: SoilError) -> ApplicationError {
        match err {
            SoilError::InvalidCoordinates => {
                ApplicationError::InvalidParameter("Invalid coordinates".into())
            },
            SoilError::NoData { .. } => ApplicationError::DataUnavailable(err.to_string()),
            SoilError::RateLimitExceeded => {
                ApplicationError::DataUnavailable("Soil service rate limit exceeded".into())
            },
            SoilError::ConnectionFailed(e)
            | SoilError::RequestFailed(e)
            | SoilError::ParseError(e)
            | SoilError::ServiceUnavailable(e) => {
                ApplicationError::DataUnavailable(format!("Soil service: {e}"))
            },
        }
    }

    /// Convert a usable profile into the domain snapshot
    ///
    /// Phosphorus, potassium and moisture are not mapped by SoilGrids.
    fn map_profile(location: &GeoLocation, profile: &SoilProfile) -> SoilData {
        let texture = profile.texture();
        let soil_type = texture.map_or_else(
            || format!("Unclassified (SoilGrids {})", profile.depth),
            |t| {
                let label = t.label();
                let mut chars = label.chars();
                let capitalised: String = chars
                    .next()
                    .map(|c| c.to_uppercase().chain(chars).collect())
                    .unwrap_or_default();
                format!("{capitalised} (SoilGrids {})", profile.depth)
            },
        );

        SoilData {
            location: *location,
            ph: profile.ph.unwrap_or_default(),
            organic_matter: profile.organic_matter().unwrap_or_default(),
            nitrogen: profile.nitrogen.unwrap_or_default(),
            phosphorus: None,
            potassium: None,
            soil_moisture: None,
            soil_temperature: None,
            soil_type,
            drainage: profile.drainage().unwrap_or("unknown").to_string(),
            texture: texture.map_or_else(|| "unknown".to_string(), |t| t.label().to_string()),
            last_updated: Utc::now(),
        }
    }
}

#[async_trait]
impl SoilDataPort for SoilDataAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn get_soil_data(&self, location: &GeoLocation) -> Result<SoilData, ApplicationError> {
        let profile = self
            .client
            .get_profile(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error)?;

        let soil = Self::map_profile(location, &profile);
        debug!(ph = soil.ph, texture = %soil.texture, "Retrieved soil data");
        Ok(soil)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> SoilProfile {
        SoilProfile {
            latitude: -17.83,
            longitude: 31.05,
            depth: "0-5cm".into(),
            ph: Some(5.8),
            organic_carbon: Some(14.5),
            nitrogen: Some(1.2),
            cec: Some(9.0),
            clay: Some(28.0),
            sand: Some(60.0),
            silt: Some(12.0),
        }
    }

    #[test]
    fn new_creates_adapter() {
        assert!(SoilDataAdapter::new().is_ok());
    }

    #[test]
    fn map_profile_fills_domain_fields() {
        let soil = SoilDataAdapter::map_profile(&GeoLocation::harare(), &profile());
        assert!((soil.ph - 5.8).abs() < f64::EPSILON);
        assert!((soil.organic_matter - 2.4998).abs() < 1e-6);
        assert_eq!(soil.texture, "sandy clay loam");
        assert_eq!(soil.soil_type, "Sandy clay loam (SoilGrids 0-5cm)");
        assert_eq!(soil.drainage, "moderately well drained");
        assert!(soil.phosphorus.is_none());
        assert!(soil.validate().is_ok());
    }

    #[test]
    fn map_profile_without_fractions() {
        let mut p = profile();
        p.sand = None;
        let soil = SoilDataAdapter::map_profile(&GeoLocation::harare(), &p);
        assert_eq!(soil.texture, "unknown");
        assert_eq!(soil.drainage, "unknown");
        assert_eq!(soil.soil_type, "Unclassified (SoilGrids 0-5cm)");
    }

    #[test]
    fn map_error_no_data_is_retryable() {
        let err = SoilDataAdapter::map_error(SoilError::NoData {
            latitude: -16.5,
            longitude: 28.0,
        });
        assert!(matches!(err, ApplicationError::DataUnavailable(_)));
    }

    #[test]
    fn map_error_invalid_coordinates() {
        let err = SoilDataAdapter::map_error(SoilError::InvalidCoordinates);
        assert!(matches!(err, ApplicationError::InvalidParameter(_)));
    }
}
