//! Agro-climatic zone value object
//!
//! Zimbabwe's farming regions grouped by altitude band. Each zone selects a
//! twelve-month climatology table in [`crate::catalog::climatology`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Broad climate zone used to pick the baseline climatology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateZone {
    /// Central plateau above roughly 1200m (Harare, Gweru, Marondera)
    Highveld,
    /// 900-1200m transition belt (Bulawayo, Masvingo, Kadoma)
    Middleveld,
    /// Hot, dry south-east below 600m (Chiredzi, Beitbridge, Hwange)
    Lowveld,
    /// Wet, cool eastern mountain range (Nyanga, Chipinge, Mutare)
    EasternHighlands,
    /// Hot northern valley floor around Lake Kariba
    ZambeziValley,
}

impl ClimateZone {
    /// Elevation in metres the zone's climatology table was compiled for
    #[must_use]
    pub const fn reference_elevation_m(self) -> f64 {
        match self {
            Self::Highveld => 1500.0,
            Self::Middleveld => 1100.0,
            Self::Lowveld => 450.0,
            Self::EasternHighlands => 1700.0,
            Self::ZambeziValley => 500.0,
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Highveld => "Highveld",
            Self::Middleveld => "Middleveld",
            Self::Lowveld => "Lowveld",
            Self::EasternHighlands => "Eastern Highlands",
            Self::ZambeziValley => "Zambezi Valley",
        }
    }

    /// All zones in catalog order
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Highveld,
            Self::Middleveld,
            Self::Lowveld,
            Self::EasternHighlands,
            Self::ZambeziValley,
        ]
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ClimateZone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "highveld" | "high_veld" => Ok(Self::Highveld),
            "middleveld" | "middle_veld" | "midveld" => Ok(Self::Middleveld),
            "lowveld" | "low_veld" => Ok(Self::Lowveld),
            "eastern_highlands" | "eastern" | "highlands" => Ok(Self::EasternHighlands),
            "zambezi_valley" | "zambezi" | "valley" => Ok(Self::ZambeziValley),
            _ => Err(DomainError::invalid_parameter(
                "climate_zone",
                format!("unrecognised value '{s}'"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        for zone in ClimateZone::all() {
            let json = serde_json::to_string(&zone).expect("serialize");
            let name = json.trim_matches('"');
            assert_eq!(name.parse::<ClimateZone>().expect("parse"), zone);
        }
    }

    #[test]
    fn parses_loose_spellings() {
        assert_eq!(
            "Eastern Highlands".parse::<ClimateZone>().expect("parse"),
            ClimateZone::EasternHighlands
        );
        assert_eq!(
            " HIGHVELD ".parse::<ClimateZone>().expect("parse"),
            ClimateZone::Highveld
        );
        assert_eq!(
            "zambezi-valley".parse::<ClimateZone>().expect("parse"),
            ClimateZone::ZambeziValley
        );
    }

    #[test]
    fn rejects_unknown_zone() {
        let err = "tundra".parse::<ClimateZone>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter { .. }));
        assert!(err.to_string().contains("tundra"));
    }

    #[test]
    fn lowveld_sits_below_highveld() {
        assert!(
            ClimateZone::Lowveld.reference_elevation_m()
                < ClimateZone::Highveld.reference_elevation_m()
        );
    }
}
