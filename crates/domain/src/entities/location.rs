//! Known farming location entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{ClimateZone, GeoLocation};

/// A named place the engine has climatology for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier, e.g. `victoria_falls`
    pub id: String,
    /// Display name
    pub name: String,
    /// Coordinates
    pub coordinates: GeoLocation,
    /// Elevation above sea level in metres
    pub elevation_m: f64,
    /// Zone whose climatology applies by default
    pub zone: ClimateZone,
}

impl Location {
    /// Temperature correction in °C for this site relative to a zone's
    /// reference elevation, using the standard 6.5°C/km lapse rate
    #[must_use]
    pub fn lapse_rate_offset(&self, zone: ClimateZone) -> f64 {
        const LAPSE_RATE_C_PER_KM: f64 = 6.5;
        (zone.reference_elevation_m() - self.elevation_m) / 1000.0 * LAPSE_RATE_C_PER_KM
    }
}
