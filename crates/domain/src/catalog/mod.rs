//! Static knowledge tables: zone climatology, known locations, crop profiles

pub mod climatology;
pub mod crops;
pub mod locations;

pub use climatology::{MonthlyNormal, days_in_month, site_normal, zone_normal, zone_normals};
pub use crops::{
    Band, CropFamily, CropProfile, GENERIC_PROFILE, WaterNeed, all_crops, crop_profile,
    crop_profile_or_generic,
};
pub use locations::{find_location, known_locations, normalize_location_id};
