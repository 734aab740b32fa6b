//! Soil data port

use async_trait::async_trait;
use domain::entities::SoilData;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for topsoil property lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SoilDataPort: Send + Sync {
    /// Soil snapshot for the point
    async fn get_soil_data(&self, location: &GeoLocation) -> Result<SoilData, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn SoilDataPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SoilDataPort>();
    }
}
