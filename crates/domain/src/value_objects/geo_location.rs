//! WGS84 coordinates for catalog locations and upstream lookups

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Point on the WGS84 ellipsoid, in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    latitude: f64,
    longitude: f64,
}

/// Rejected coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180")]
pub struct InvalidCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoLocation {
    /// Validated constructor
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinates`] when either value is out of range or NaN.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        let lat_ok = (-90.0..=90.0).contains(&latitude);
        let lon_ok = (-180.0..=180.0).contains(&longitude);
        if lat_ok && lon_ok {
            Ok(Self { latitude, longitude })
        } else {
            Err(InvalidCoordinates { latitude, longitude })
        }
    }

    /// Constructor for compile-time catalog entries
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance in km (haversine)
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let (phi1, phi2) = (self.latitude.to_radians(), other.latitude.to_radians());
        let half_dphi = (phi2 - phi1) / 2.0;
        let half_dlambda = (other.longitude - self.longitude).to_radians() / 2.0;

        let h = (phi1.cos() * phi2.cos())
            .mul_add(half_dlambda.sin().powi(2), half_dphi.sin().powi(2));
        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Reference points used as defaults and health-check targets
impl GeoLocation {
    /// Harare, Zimbabwe
    #[must_use]
    pub const fn harare() -> Self {
        Self::new_unchecked(-17.8292, 31.0522)
    }

    /// Bulawayo, Zimbabwe
    #[must_use]
    pub const fn bulawayo() -> Self {
        Self::new_unchecked(-20.1325, 28.6265)
    }

    /// Whether the point lies within Zimbabwe's bounding box
    #[must_use]
    pub fn is_within_zimbabwe(&self) -> bool {
        (-22.5..=-15.5).contains(&self.latitude) && (25.0..=33.1).contains(&self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_harare() {
        let loc = GeoLocation::new(-17.8292, 31.0522).expect("valid coordinates");
        assert!((loc.latitude() + 17.8292).abs() < f64::EPSILON);
        assert!((loc.longitude() - 31.0522).abs() < f64::EPSILON);
    }

    #[test]
    fn range_edges_are_inclusive() {
        for (lat, lon) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            assert!(GeoLocation::new(lat, lon).is_ok(), "{lat}, {lon}");
        }
    }

    #[test]
    fn out_of_range_or_nan_is_rejected() {
        for (lat, lon) in [(91.0, 0.0), (-91.0, 0.0), (0.0, 181.0), (0.0, -181.0), (f64::NAN, 0.0)] {
            assert!(GeoLocation::new(lat, lon).is_err(), "{lat}, {lon}");
        }
    }

    #[test]
    fn error_reports_the_rejected_pair() {
        let err = GeoLocation::new(-95.0, 31.0).unwrap_err();
        assert!((err.latitude + 95.0).abs() < f64::EPSILON);
        assert!(err.to_string().starts_with("Invalid coordinates (-95, 31)"));
    }

    #[test]
    fn display_uses_six_decimals() {
        let loc = GeoLocation::new(-18.9707, 32.6709).expect("valid");
        assert_eq!(loc.to_string(), "-18.970700, 32.670900");
    }

    #[test]
    fn distance_to_self_is_zero() {
        let loc = GeoLocation::harare();
        assert!(loc.distance_km(&loc).abs() < 0.001);
    }

    #[test]
    fn harare_to_bulawayo() {
        let distance = GeoLocation::harare().distance_km(&GeoLocation::bulawayo());
        // roughly 365km great-circle; the road is longer
        assert!((distance - 365.0).abs() < 30.0);
    }

    #[test]
    fn serde_keeps_coordinates() {
        let loc = GeoLocation::new(-20.0637, 30.8277).expect("valid");
        let json = serde_json::to_string(&loc).expect("serialize");
        assert!(json.contains("-20.0637"));

        let back: GeoLocation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, back);
    }

    #[test]
    fn reference_points_inside_zimbabwe() {
        assert!(GeoLocation::harare().is_within_zimbabwe());
        assert!(GeoLocation::bulawayo().is_within_zimbabwe());
        // Cape Town
        assert!(!GeoLocation::new_unchecked(-33.9249, 18.4241).is_within_zimbabwe());
    }
}
