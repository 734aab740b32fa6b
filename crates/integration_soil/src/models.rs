//! Soil data models
//!
//! Topsoil properties from the SoilGrids properties query, converted from
//! the mapped integer units into conventional ones.

use serde::{Deserialize, Serialize};

/// Van Bemmelen factor from soil organic carbon to organic matter
pub const ORGANIC_CARBON_TO_MATTER: f64 = 1.724;

/// USDA soil texture class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureClass {
    Sand,
    LoamySand,
    SandyLoam,
    Loam,
    SiltLoam,
    Silt,
    SandyClayLoam,
    ClayLoam,
    SiltyClayLoam,
    SandyClay,
    SiltyClay,
    Clay,
}

impl TextureClass {
    /// Classify from particle-size fractions in percent
    ///
    /// Follows the USDA texture triangle; fractions need not sum to exactly
    /// 100 since gridded products are rounded independently.
    #[must_use]
    pub fn from_fractions(sand: f64, silt: f64, clay: f64) -> Self {
        if sand >= 85.0 && silt + 1.5 * clay < 15.0 {
            Self::Sand
        } else if sand >= 70.0 && silt + 2.0 * clay < 30.0 {
            Self::LoamySand
        } else if clay >= 40.0 {
            if silt >= 40.0 {
                Self::SiltyClay
            } else if sand > 45.0 {
                Self::SandyClay
            } else {
                Self::Clay
            }
        } else if clay >= 35.0 && sand > 45.0 {
            Self::SandyClay
        } else if clay >= 27.0 {
            if sand > 45.0 {
                Self::SandyClayLoam
            } else if sand <= 20.0 {
                Self::SiltyClayLoam
            } else {
                Self::ClayLoam
            }
        } else if clay >= 20.0 && silt < 28.0 && sand > 45.0 {
            Self::SandyClayLoam
        } else if silt >= 80.0 && clay < 12.0 {
            Self::Silt
        } else if silt >= 50.0 {
            Self::SiltLoam
        } else if clay >= 7.0 && silt >= 28.0 && sand <= 52.0 {
            Self::Loam
        } else {
            Self::SandyLoam
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sand => "sand",
            Self::LoamySand => "loamy sand",
            Self::SandyLoam => "sandy loam",
            Self::Loam => "loam",
            Self::SiltLoam => "silt loam",
            Self::Silt => "silt",
            Self::SandyClayLoam => "sandy clay loam",
            Self::ClayLoam => "clay loam",
            Self::SiltyClayLoam => "silty clay loam",
            Self::SandyClay => "sandy clay",
            Self::SiltyClay => "silty clay",
            Self::Clay => "clay",
        }
    }
}

impl std::fmt::Display for TextureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Topsoil profile for one grid cell and depth interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    pub latitude: f64,
    pub longitude: f64,
    /// Depth interval label, e.g. "0-5cm"
    pub depth: String,
    /// pH in water
    pub ph: Option<f64>,
    /// Soil organic carbon in g/kg
    pub organic_carbon: Option<f64>,
    /// Total nitrogen in g/kg
    pub nitrogen: Option<f64>,
    /// Cation exchange capacity in cmol(c)/kg
    pub cec: Option<f64>,
    /// Particle-size fractions in percent
    pub clay: Option<f64>,
    pub sand: Option<f64>,
    pub silt: Option<f64>,
}

impl SoilProfile {
    /// Organic matter in percent, estimated from organic carbon
    #[must_use]
    pub fn organic_matter(&self) -> Option<f64> {
        self.organic_carbon
            .map(|soc| soc / 10.0 * ORGANIC_CARBON_TO_MATTER)
    }

    /// Texture class when all three fractions are known
    #[must_use]
    pub fn texture(&self) -> Option<TextureClass> {
        Some(TextureClass::from_fractions(self.sand?, self.silt?, self.clay?))
    }

    /// Drainage class inferred from texture fractions
    #[must_use]
    pub fn drainage(&self) -> Option<&'static str> {
        let (sand, clay) = (self.sand?, self.clay?);
        Some(if clay >= 40.0 {
            "poorly drained"
        } else if sand >= 70.0 {
            "excessively drained"
        } else if clay >= 27.0 {
            "moderately well drained"
        } else {
            "well drained"
        })
    }

    /// Whether the chemistry the engine scores against is present
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.ph.is_some() && self.organic_carbon.is_some() && self.nitrogen.is_some()
    }
}

// ============================================================================
// Raw API shapes
// ============================================================================

/// GeoJSON feature returned by the properties query
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiResponse {
    pub properties: ApiProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiProperties {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// One soil property with its values per depth
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Layer {
    pub name: String,
    pub unit_measure: UnitMeasure,
    #[serde(default)]
    pub depths: Vec<Depth>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UnitMeasure {
    /// Divide mapped values by this to get conventional units
    pub d_factor: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Depth {
    pub label: String,
    pub values: DepthValues,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DepthValues {
    pub mean: Option<f64>,
}

impl Layer {
    /// Conventional-unit mean for a depth label
    pub(crate) fn mean_at(&self, depth: &str) -> Option<f64> {
        if self.unit_measure.d_factor <= 0.0 {
            return None;
        }
        self.depths
            .iter()
            .find(|d| d.label == depth)
            .and_then(|d| d.values.mean)
            .map(|v| v / self.unit_measure.d_factor)
    }
}
