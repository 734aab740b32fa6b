//! Long-run monthly climate normals per zone
//!
//! Values are 1991-2020 style station normals rounded for each zone's
//! reference elevation. Site values apply a lapse-rate correction.

use crate::entities::Location;
use crate::value_objects::ClimateZone;

/// Climate normal for one calendar month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyNormal {
    /// Mean daily minimum in Celsius
    pub min_temp: f64,
    /// Mean daily maximum in Celsius
    pub max_temp: f64,
    /// Mean monthly rainfall total in mm
    pub rainfall_mm: f64,
    /// Mean relative humidity in percent
    pub humidity: f64,
    /// Inter-annual coefficient of variation of the rainfall total
    pub rainfall_cv: f64,
}

impl MonthlyNormal {
    const fn new(min_temp: f64, max_temp: f64, rainfall_mm: f64, humidity: f64, cv: f64) -> Self {
        Self {
            min_temp,
            max_temp,
            rainfall_mm,
            humidity,
            rainfall_cv: cv,
        }
    }

    /// Mean daily temperature
    #[must_use]
    pub fn mean_temp(&self) -> f64 {
        (self.min_temp + self.max_temp) / 2.0
    }

    /// Copy with temperatures shifted by `offset` °C
    #[must_use]
    pub fn shifted(self, offset: f64) -> Self {
        Self {
            min_temp: self.min_temp + offset,
            max_temp: self.max_temp + offset,
            ..self
        }
    }
}

type Table = [MonthlyNormal; 12];

const HIGHVELD: Table = [
    MonthlyNormal::new(16.0, 26.0, 190.0, 76.0, 0.35),
    MonthlyNormal::new(15.8, 25.8, 175.0, 76.0, 0.38),
    MonthlyNormal::new(14.8, 25.6, 100.0, 71.0, 0.50),
    MonthlyNormal::new(12.5, 24.8, 35.0, 65.0, 0.80),
    MonthlyNormal::new(9.0, 23.0, 10.0, 58.0, 1.20),
    MonthlyNormal::new(6.8, 21.0, 3.0, 55.0, 1.50),
    MonthlyNormal::new(6.5, 21.0, 1.0, 50.0, 1.80),
    MonthlyNormal::new(8.5, 23.5, 3.0, 43.0, 1.50),
    MonthlyNormal::new(11.8, 26.5, 6.0, 38.0, 1.20),
    MonthlyNormal::new(14.5, 28.3, 30.0, 40.0, 0.80),
    MonthlyNormal::new(15.8, 27.2, 95.0, 57.0, 0.50),
    MonthlyNormal::new(16.0, 26.0, 175.0, 72.0, 0.38),
];

const MIDDLEVELD: Table = [
    MonthlyNormal::new(17.2, 28.0, 150.0, 72.0, 0.40),
    MonthlyNormal::new(17.0, 27.6, 130.0, 73.0, 0.42),
    MonthlyNormal::new(15.8, 27.0, 80.0, 70.0, 0.55),
    MonthlyNormal::new(12.8, 26.0, 30.0, 64.0, 0.85),
    MonthlyNormal::new(8.8, 24.2, 8.0, 58.0, 1.30),
    MonthlyNormal::new(6.0, 22.0, 3.0, 56.0, 1.60),
    MonthlyNormal::new(5.8, 22.0, 1.0, 52.0, 1.90),
    MonthlyNormal::new(8.0, 24.6, 2.0, 45.0, 1.60),
    MonthlyNormal::new(11.8, 27.8, 5.0, 40.0, 1.30),
    MonthlyNormal::new(15.2, 29.8, 25.0, 42.0, 0.85),
    MonthlyNormal::new(16.6, 29.0, 80.0, 55.0, 0.55),
    MonthlyNormal::new(17.0, 28.0, 135.0, 68.0, 0.42),
];

const LOWVELD: Table = [
    MonthlyNormal::new(21.0, 32.5, 105.0, 68.0, 0.50),
    MonthlyNormal::new(20.8, 32.0, 95.0, 70.0, 0.55),
    MonthlyNormal::new(19.5, 31.0, 60.0, 69.0, 0.65),
    MonthlyNormal::new(16.0, 29.5, 25.0, 66.0, 0.95),
    MonthlyNormal::new(11.5, 27.5, 8.0, 62.0, 1.40),
    MonthlyNormal::new(8.0, 25.0, 5.0, 60.0, 1.70),
    MonthlyNormal::new(7.5, 25.0, 3.0, 56.0, 1.90),
    MonthlyNormal::new(10.0, 27.5, 3.0, 50.0, 1.70),
    MonthlyNormal::new(14.0, 30.5, 8.0, 46.0, 1.40),
    MonthlyNormal::new(17.5, 32.5, 25.0, 48.0, 0.95),
    MonthlyNormal::new(19.5, 33.0, 60.0, 55.0, 0.65),
    MonthlyNormal::new(20.5, 32.5, 90.0, 63.0, 0.55),
];

const EASTERN_HIGHLANDS: Table = [
    MonthlyNormal::new(13.5, 24.0, 280.0, 82.0, 0.30),
    MonthlyNormal::new(13.4, 23.8, 240.0, 83.0, 0.32),
    MonthlyNormal::new(12.4, 23.0, 180.0, 81.0, 0.38),
    MonthlyNormal::new(10.0, 21.6, 70.0, 78.0, 0.60),
    MonthlyNormal::new(7.0, 19.8, 30.0, 74.0, 0.80),
    MonthlyNormal::new(4.8, 17.8, 20.0, 72.0, 0.95),
    MonthlyNormal::new(4.5, 17.6, 20.0, 70.0, 0.95),
    MonthlyNormal::new(6.0, 19.8, 18.0, 65.0, 0.95),
    MonthlyNormal::new(8.8, 22.8, 20.0, 60.0, 0.90),
    MonthlyNormal::new(11.4, 24.8, 50.0, 62.0, 0.70),
    MonthlyNormal::new(12.8, 24.4, 140.0, 72.0, 0.45),
    MonthlyNormal::new(13.4, 24.0, 250.0, 80.0, 0.32),
];

const ZAMBEZI_VALLEY: Table = [
    MonthlyNormal::new(22.0, 31.5, 200.0, 72.0, 0.38),
    MonthlyNormal::new(21.8, 31.2, 170.0, 73.0, 0.40),
    MonthlyNormal::new(21.0, 31.5, 100.0, 68.0, 0.55),
    MonthlyNormal::new(18.8, 31.0, 25.0, 60.0, 0.95),
    MonthlyNormal::new(15.0, 29.0, 3.0, 52.0, 1.50),
    MonthlyNormal::new(12.0, 26.5, 1.0, 50.0, 1.90),
    MonthlyNormal::new(11.5, 26.5, 0.0, 46.0, 2.00),
    MonthlyNormal::new(14.0, 29.5, 0.0, 40.0, 2.00),
    MonthlyNormal::new(18.0, 33.5, 1.0, 35.0, 1.90),
    MonthlyNormal::new(21.5, 36.0, 15.0, 36.0, 1.10),
    MonthlyNormal::new(22.5, 34.5, 75.0, 50.0, 0.60),
    MonthlyNormal::new(22.3, 32.0, 180.0, 66.0, 0.40),
];

/// The twelve monthly normals for a zone, January first
#[must_use]
pub const fn zone_normals(zone: ClimateZone) -> &'static [MonthlyNormal; 12] {
    match zone {
        ClimateZone::Highveld => &HIGHVELD,
        ClimateZone::Middleveld => &MIDDLEVELD,
        ClimateZone::Lowveld => &LOWVELD,
        ClimateZone::EasternHighlands => &EASTERN_HIGHLANDS,
        ClimateZone::ZambeziValley => &ZAMBEZI_VALLEY,
    }
}

/// Zone normal for a calendar month; months outside 1-12 wrap around
#[must_use]
pub fn zone_normal(zone: ClimateZone, month: u32) -> MonthlyNormal {
    let index = (month + 11) % 12;
    zone_normals(zone)[index as usize]
}

/// Normal for a site, lapse-rate corrected from the zone's reference elevation
#[must_use]
pub fn site_normal(location: &Location, zone: ClimateZone, month: u32) -> MonthlyNormal {
    zone_normal(zone, month).shifted(location.lapse_rate_offset(zone))
}

/// Number of days in a calendar month of a given year
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    chrono::NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(30, |d| chrono::Datelike::day(&d))
}
