//! Known Zimbabwean farming locations

use crate::entities::Location;
use crate::errors::DomainError;
use crate::value_objects::{ClimateZone, GeoLocation};

struct Site {
    id: &'static str,
    name: &'static str,
    latitude: f64,
    longitude: f64,
    elevation_m: f64,
    zone: ClimateZone,
}

#[rustfmt::skip]
const SITES: &[Site] = &[
    Site { id: "harare", name: "Harare", latitude: -17.8292, longitude: 31.0522, elevation_m: 1490.0, zone: ClimateZone::Highveld },
    Site { id: "bulawayo", name: "Bulawayo", latitude: -20.1325, longitude: 28.6265, elevation_m: 1358.0, zone: ClimateZone::Middleveld },
    Site { id: "mutare", name: "Mutare", latitude: -18.9707, longitude: 32.6709, elevation_m: 1120.0, zone: ClimateZone::EasternHighlands },
    Site { id: "gweru", name: "Gweru", latitude: -19.4500, longitude: 29.8167, elevation_m: 1420.0, zone: ClimateZone::Highveld },
    Site { id: "masvingo", name: "Masvingo", latitude: -20.0637, longitude: 30.8277, elevation_m: 1095.0, zone: ClimateZone::Middleveld },
    Site { id: "chinhoyi", name: "Chinhoyi", latitude: -17.3667, longitude: 30.2000, elevation_m: 1140.0, zone: ClimateZone::Highveld },
    Site { id: "marondera", name: "Marondera", latitude: -18.1853, longitude: 31.5519, elevation_m: 1630.0, zone: ClimateZone::Highveld },
    Site { id: "kadoma", name: "Kadoma", latitude: -18.3333, longitude: 29.9167, elevation_m: 1160.0, zone: ClimateZone::Middleveld },
    Site { id: "kariba", name: "Kariba", latitude: -16.5167, longitude: 28.8000, elevation_m: 485.0, zone: ClimateZone::ZambeziValley },
    Site { id: "victoria_falls", name: "Victoria Falls", latitude: -17.9243, longitude: 25.8572, elevation_m: 915.0, zone: ClimateZone::ZambeziValley },
    Site { id: "hwange", name: "Hwange", latitude: -18.3645, longitude: 26.4988, elevation_m: 770.0, zone: ClimateZone::Lowveld },
    Site { id: "chipinge", name: "Chipinge", latitude: -20.1883, longitude: 32.6236, elevation_m: 1130.0, zone: ClimateZone::EasternHighlands },
    Site { id: "nyanga", name: "Nyanga", latitude: -18.2167, longitude: 32.7500, elevation_m: 1880.0, zone: ClimateZone::EasternHighlands },
    Site { id: "chiredzi", name: "Chiredzi", latitude: -21.0500, longitude: 31.6667, elevation_m: 430.0, zone: ClimateZone::Lowveld },
    Site { id: "beitbridge", name: "Beitbridge", latitude: -22.2167, longitude: 30.0000, elevation_m: 460.0, zone: ClimateZone::Lowveld },
];

impl Site {
    fn to_location(&self) -> Location {
        Location {
            id: self.id.to_string(),
            name: self.name.to_string(),
            coordinates: GeoLocation::new_unchecked(self.latitude, self.longitude),
            elevation_m: self.elevation_m,
            zone: self.zone,
        }
    }
}

/// Normalise user input such as "Victoria Falls, Zimbabwe" to `victoria_falls`
#[must_use]
pub fn normalize_location_id(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let place = lowered
        .strip_suffix(", zimbabwe")
        .or_else(|| lowered.strip_suffix(",zimbabwe"))
        .unwrap_or(&lowered);
    place
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Look up a known location by identifier or display name
pub fn find_location(input: &str) -> Result<Location, DomainError> {
    let id = normalize_location_id(input);
    SITES
        .iter()
        .find(|site| site.id == id)
        .map(Site::to_location)
        .ok_or_else(|| DomainError::UnknownLocation(input.to_string()))
}

/// All known locations in catalog order
#[must_use]
pub fn known_locations() -> Vec<Location> {
    SITES.iter().map(Site::to_location).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_display_name() {
        let location = find_location("Victoria Falls, Zimbabwe").expect("known");
        assert_eq!(location.id, "victoria_falls");
        assert_eq!(location.zone, ClimateZone::ZambeziValley);
    }

    #[test]
    fn finds_case_insensitively() {
        assert_eq!(find_location("  HARARE ").expect("known").name, "Harare");
    }

    #[test]
    fn unknown_location_errors() {
        let err = find_location("Atlantis").unwrap_err();
        assert!(matches!(err, DomainError::UnknownLocation(ref s) if s == "Atlantis"));
    }

    #[test]
    fn catalog_is_inside_zimbabwe() {
        for location in known_locations() {
            assert!(
                location.coordinates.is_within_zimbabwe(),
                "{} outside bounds",
                location.id
            );
        }
    }

    #[test]
    fn ids_are_unique_and_normalized() {
        let locations = known_locations();
        for location in &locations {
            assert_eq!(normalize_location_id(&location.id), location.id);
            assert_eq!(
                locations.iter().filter(|l| l.id == location.id).count(),
                1
            );
        }
    }
}
