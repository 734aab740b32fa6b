//! Crop knowledge table
//!
//! Suitability bands, agronomic windows and descriptive text per crop, tuned
//! for Zimbabwean smallholder and commercial production.

use serde::{Deserialize, Serialize};

/// Botanical grouping that shares pests and diseases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropFamily {
    Cereal,
    Legume,
    Solanaceous,
    Fibre,
    Oilseed,
}

/// Relative seasonal water demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterNeed {
    Low,
    Moderate,
    High,
}

impl WaterNeed {
    /// Multiplier applied to the stage's base application depth
    #[must_use]
    pub const fn amount_factor(self) -> f64 {
        match self {
            Self::Low => 0.8,
            Self::Moderate => 1.0,
            Self::High => 1.2,
        }
    }
}

/// Closed interval with a suitability bonus awarded when a value falls inside
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub max: f64,
    pub bonus: u8,
}

impl Band {
    /// Whether `value` lies within the band (inclusive)
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Static agronomic profile for one crop
#[derive(Debug, Clone, PartialEq)]
pub struct CropProfile {
    /// Canonical identifier
    pub key: &'static str,
    pub display_name: &'static str,
    /// Extra spellings accepted on lookup, including Shona names
    pub aliases: &'static [&'static str],
    pub family: CropFamily,
    pub water_need: WaterNeed,
    pub variety: &'static str,
    pub planting_window: &'static str,
    pub harvest_window: &'static str,
    /// Typical yield in t/ha under reasonable management
    pub yield_range: (f64, f64),
    /// Optimal topsoil pH
    pub ph: Band,
    /// Organic matter threshold in percent; `bonus` applies at or above `min`
    pub organic_matter: Band,
    /// Optimal mean air temperature in Celsius
    pub temperature: Band,
    pub description: &'static str,
    pub requirements: &'static [&'static str],
    pub benefits: &'static [&'static str],
    pub challenges: &'static [&'static str],
}

const OPEN: f64 = 100.0;

/// Profile used for crops missing from the table
pub const GENERIC_PROFILE: CropProfile = CropProfile {
    key: "generic",
    display_name: "Generic crop",
    aliases: &[],
    family: CropFamily::Cereal,
    water_need: WaterNeed::Moderate,
    variety: "Local variety",
    planting_window: "Start of the rains (November - December)",
    harvest_window: "End of season (March - May)",
    yield_range: (1.0, 3.0),
    ph: Band { min: 5.5, max: 7.5, bonus: 15 },
    organic_matter: Band { min: 1.5, max: OPEN, bonus: 10 },
    temperature: Band { min: 15.0, max: 30.0, bonus: 10 },
    description: "General guidance for a crop without a dedicated profile",
    requirements: &[
        "Well-drained soil with moderate fertility",
        "Reliable rainfall or supplementary irrigation",
    ],
    benefits: &["Diversifies household production"],
    challenges: &["Seek local extension advice on variety and timing"],
};

const CROPS: &[CropProfile] = &[
    CropProfile {
        key: "maize",
        display_name: "Maize",
        aliases: &["corn", "chibage"],
        family: CropFamily::Cereal,
        water_need: WaterNeed::High,
        variety: "SC 719 (medium-maturity hybrid)",
        planting_window: "Mid November - mid December",
        harvest_window: "April - May",
        yield_range: (4.0, 8.0),
        ph: Band { min: 5.5, max: 7.0, bonus: 20 },
        organic_matter: Band { min: 2.0, max: OPEN, bonus: 15 },
        temperature: Band { min: 18.0, max: 30.0, bonus: 15 },
        description: "Staple cereal; yield is most sensitive to moisture at tasselling",
        requirements: &[
            "500-800mm well-distributed rainfall",
            "Basal compound D and top-dressing with ammonium nitrate",
            "Deep, well-drained soils",
        ],
        benefits: &[
            "Household food security staple",
            "Strong GMB and private market demand",
            "Stover for livestock feed",
        ],
        challenges: &[
            "Fall armyworm",
            "Mid-season dry spells during tasselling",
            "High fertiliser cost",
        ],
    },
    CropProfile {
        key: "sorghum",
        display_name: "Sorghum",
        aliases: &["mapfunde"],
        family: CropFamily::Cereal,
        water_need: WaterNeed::Low,
        variety: "Macia (open-pollinated)",
        planting_window: "November - December",
        harvest_window: "April - May",
        yield_range: (2.0, 4.0),
        ph: Band { min: 5.5, max: 8.0, bonus: 15 },
        organic_matter: Band { min: 1.5, max: OPEN, bonus: 15 },
        temperature: Band { min: 20.0, max: 35.0, bonus: 20 },
        description: "Drought-tolerant small grain suited to regions IV and V",
        requirements: &[
            "350-600mm rainfall",
            "Bird scaring at grain fill",
        ],
        benefits: &[
            "Tolerates mid-season drought",
            "Brewing industry contracts",
        ],
        challenges: &["Quelea bird damage", "Stalk borer"],
    },
    CropProfile {
        key: "pearl_millet",
        display_name: "Pearl millet",
        aliases: &["millet", "mhunga"],
        family: CropFamily::Cereal,
        water_need: WaterNeed::Low,
        variety: "Okashana 1",
        planting_window: "November - mid December",
        harvest_window: "March - April",
        yield_range: (1.0, 2.5),
        ph: Band { min: 5.0, max: 8.0, bonus: 15 },
        organic_matter: Band { min: 1.0, max: OPEN, bonus: 15 },
        temperature: Band { min: 22.0, max: 36.0, bonus: 20 },
        description: "Hardiest cereal for hot, sandy, low-rainfall areas",
        requirements: &["300-500mm rainfall", "Light sandy soils acceptable"],
        benefits: &["Very drought and heat tolerant", "Nutritious grain"],
        challenges: &["Bird damage", "Low market prices"],
    },
    CropProfile {
        key: "groundnuts",
        display_name: "Groundnuts",
        aliases: &["groundnut", "peanuts", "nzungu"],
        family: CropFamily::Legume,
        water_need: WaterNeed::Moderate,
        variety: "Nyanda (Virginia bunch)",
        planting_window: "Early November - mid December",
        harvest_window: "March - April",
        yield_range: (1.5, 3.0),
        ph: Band { min: 5.5, max: 7.0, bonus: 20 },
        organic_matter: Band { min: 1.5, max: OPEN, bonus: 10 },
        temperature: Band { min: 20.0, max: 30.0, bonus: 20 },
        description: "Legume for light, well-drained soils; fixes nitrogen",
        requirements: &[
            "Gypsum at flowering on sandy soils",
            "500-700mm rainfall",
        ],
        benefits: &[
            "Improves soil nitrogen for the following cereal",
            "High-value protein and oil",
        ],
        challenges: &["Aflatoxin if harvest is delayed", "Rosette virus"],
    },
    CropProfile {
        key: "soybeans",
        display_name: "Soybeans",
        aliases: &["soybean", "soya", "soya_beans"],
        family: CropFamily::Legume,
        water_need: WaterNeed::Moderate,
        variety: "SC Squire",
        planting_window: "Mid November - mid December",
        harvest_window: "April - May",
        yield_range: (2.0, 4.0),
        ph: Band { min: 6.0, max: 7.0, bonus: 20 },
        organic_matter: Band { min: 2.0, max: OPEN, bonus: 15 },
        temperature: Band { min: 20.0, max: 30.0, bonus: 15 },
        description: "Cash legume in rotation with maize on the highveld",
        requirements: &[
            "Rhizobium inoculant at planting",
            "600-900mm rainfall",
        ],
        benefits: &["Strong processor demand", "Breaks cereal disease cycles"],
        challenges: &["Soybean rust in wet seasons", "Pod shattering if harvest is late"],
    },
    CropProfile {
        key: "tobacco",
        display_name: "Tobacco",
        aliases: &["fcv_tobacco", "fodya"],
        family: CropFamily::Solanaceous,
        water_need: WaterNeed::High,
        variety: "KRK 26R (flue-cured Virginia)",
        planting_window: "Transplant October - November",
        harvest_window: "January - March (reaping)",
        yield_range: (2.5, 3.5),
        ph: Band { min: 5.0, max: 6.0, bonus: 20 },
        organic_matter: Band { min: 1.0, max: OPEN, bonus: 10 },
        temperature: Band { min: 18.0, max: 28.0, bonus: 20 },
        description: "High-value export crop for sandy highveld soils",
        requirements: &[
            "Early irrigation for transplant establishment",
            "Curing barn and fuel wood",
        ],
        benefits: &["Highest gross margin per hectare", "Contract financing available"],
        challenges: &["Nematodes", "Labour-intensive reaping and curing"],
    },
    CropProfile {
        key: "cotton",
        display_name: "Cotton",
        aliases: &["donje"],
        family: CropFamily::Fibre,
        water_need: WaterNeed::Moderate,
        variety: "CRI MS2",
        planting_window: "Mid November - early December",
        harvest_window: "April - June (picking)",
        yield_range: (1.0, 2.5),
        ph: Band { min: 5.8, max: 8.0, bonus: 15 },
        organic_matter: Band { min: 1.5, max: OPEN, bonus: 10 },
        temperature: Band { min: 21.0, max: 35.0, bonus: 25 },
        description: "Heat-loving fibre crop for the middleveld and lowveld",
        requirements: &["Long hot season", "Regular pest scouting"],
        benefits: &["Contract inputs from ginners", "Tolerates heat"],
        challenges: &["Bollworm and aphid pressure", "Volatile lint prices"],
    },
    CropProfile {
        key: "wheat",
        display_name: "Wheat",
        aliases: &["winter_wheat"],
        family: CropFamily::Cereal,
        water_need: WaterNeed::High,
        variety: "SC Nduna (winter, irrigated)",
        planting_window: "May - early June",
        harvest_window: "September - October",
        yield_range: (5.0, 8.0),
        ph: Band { min: 5.5, max: 7.5, bonus: 20 },
        organic_matter: Band { min: 2.0, max: OPEN, bonus: 15 },
        temperature: Band { min: 10.0, max: 25.0, bonus: 15 },
        description: "Winter cereal grown under full irrigation",
        requirements: &["450-650mm irrigation water", "Cold winter nights for tillering"],
        benefits: &["Import substitution", "Uses land idle in winter"],
        challenges: &["Electricity and pumping costs", "Harvest rains in October"],
    },
    CropProfile {
        key: "sugar_beans",
        display_name: "Sugar beans",
        aliases: &["beans", "sugar_bean", "common_beans"],
        family: CropFamily::Legume,
        water_need: WaterNeed::Moderate,
        variety: "NUA 45 (iron-biofortified)",
        planting_window: "February (late summer) or July - August (winter, irrigated)",
        harvest_window: "May or November",
        yield_range: (1.5, 2.5),
        ph: Band { min: 5.8, max: 7.0, bonus: 20 },
        organic_matter: Band { min: 2.0, max: OPEN, bonus: 15 },
        temperature: Band { min: 16.0, max: 27.0, bonus: 15 },
        description: "Short-season legume avoiding peak summer rains",
        requirements: &["Avoid waterlogging", "Moderate temperatures at flowering"],
        benefits: &["Quick cash turnover", "Household protein"],
        challenges: &["Bean stem maggot", "Angular leaf spot in humid weather"],
    },
    CropProfile {
        key: "sunflower",
        display_name: "Sunflower",
        aliases: &["sunflowers"],
        family: CropFamily::Oilseed,
        water_need: WaterNeed::Low,
        variety: "PAN 7355",
        planting_window: "December - mid January",
        harvest_window: "April - May",
        yield_range: (1.0, 2.5),
        ph: Band { min: 6.0, max: 7.5, bonus: 15 },
        organic_matter: Band { min: 1.5, max: OPEN, bonus: 10 },
        temperature: Band { min: 18.0, max: 33.0, bonus: 20 },
        description: "Deep-rooted oilseed that tolerates late planting",
        requirements: &["Boron on sandy soils", "400-600mm rainfall"],
        benefits: &["Drought tolerant", "Local oil pressing demand"],
        challenges: &["Bird damage at maturity", "Sclerotinia head rot in wet years"],
    },
];

fn normalize(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Look up a crop profile by key or alias
#[must_use]
pub fn crop_profile(name: &str) -> Option<&'static CropProfile> {
    let key = normalize(name);
    CROPS
        .iter()
        .find(|crop| crop.key == key || crop.aliases.contains(&key.as_str()))
}

/// Profile for a crop, falling back to [`GENERIC_PROFILE`]
#[must_use]
pub fn crop_profile_or_generic(name: &str) -> &'static CropProfile {
    crop_profile(name).unwrap_or(&GENERIC_PROFILE)
}

/// All crops with a dedicated profile
#[must_use]
pub fn all_crops() -> &'static [CropProfile] {
    CROPS
}
