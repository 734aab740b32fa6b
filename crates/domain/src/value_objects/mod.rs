//! Value Objects - Immutable, identity-less domain primitives

mod climate_zone;
mod enso_status;
mod geo_location;
mod growth_stage;
mod pattern_type;
mod priority;
mod risk;
mod season;
mod trend;

pub use climate_zone::ClimateZone;
pub use enso_status::EnsoStatus;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use growth_stage::GrowthStage;
pub use pattern_type::{
    COOL_THRESHOLD_C, DRY_THRESHOLD_MM, HOT_THRESHOLD_C, PatternType, WET_THRESHOLD_MM,
};
pub use priority::Priority;
pub use risk::{LOW_RISK_CEILING, MEDIUM_RISK_CEILING, RiskLevel, RiskSeverity};
pub use season::{Season, SeasonPeriod};
pub use trend::Trend;
