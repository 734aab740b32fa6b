//! Southern-hemisphere calendar seasons

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Meteorological season with fixed calendar boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// December to February, peak rains
    Summer,
    /// March to May, rains tail off
    Autumn,
    /// June to August, cool and dry
    Winter,
    /// September to November, hot and dry until the rains break
    Spring,
}

impl Season {
    /// Season a calendar month (1-12) belongs to
    #[must_use]
    pub const fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Self::Summer,
            3..=5 => Self::Autumn,
            6..=8 => Self::Winter,
            _ => Self::Spring,
        }
    }

    /// First calendar month of the season
    #[must_use]
    pub const fn first_month(self) -> u32 {
        match self {
            Self::Summer => 12,
            Self::Autumn => 3,
            Self::Winter => 6,
            Self::Spring => 9,
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
            Self::Spring => "Spring",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One concrete season instance, e.g. the summer starting December 2023
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeasonPeriod {
    /// Calendar year of the season's first month
    start_year: i32,
    /// Month the season starts in, kept for ordering within a year
    start_month: u32,
}

impl SeasonPeriod {
    /// Season period containing the given date
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let season = Season::from_month(date.month());
        let start_year = if season == Season::Summer && date.month() != 12 {
            date.year() - 1
        } else {
            date.year()
        };
        Self {
            start_year,
            start_month: season.first_month(),
        }
    }

    /// The season kind
    #[must_use]
    pub const fn season(&self) -> Season {
        Season::from_month(self.start_month)
    }

    /// Calendar year of the season's first month
    #[must_use]
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    /// First day of the season
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start_year, self.start_month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the season
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        let (year, month) = if self.start_month == 12 {
            (self.start_year + 1, 3)
        } else {
            (self.start_year, self.start_month + 3)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Label such as `Summer 2023/24` or `Winter 2024`
    #[must_use]
    pub fn label(&self) -> String {
        match self.season() {
            Season::Summer => format!(
                "Summer {}/{:02}",
                self.start_year,
                (self.start_year + 1).rem_euclid(100)
            ),
            season => format!("{season} {}", self.start_year),
        }
    }
}

impl fmt::Display for SeasonPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
