//! Seasonal pattern entity

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::value_objects::{PatternType, Season};

/// Aggregate weather statistics for one season inside an analysis window
///
/// Recomputed per query; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPattern {
    /// Label such as `Summer 2023/24`
    pub season_label: String,
    /// Season kind
    pub season: Season,
    /// First observed day inside the season
    pub start_date: NaiveDate,
    /// Last observed day inside the season
    pub end_date: NaiveDate,
    /// Number of observations aggregated
    pub observation_count: usize,
    /// Mean temperature in Celsius
    pub average_temperature: f64,
    /// Summed precipitation in mm
    pub total_precipitation: f64,
    /// Mean relative humidity in percent
    pub average_humidity: f64,
    /// Classification of (average_temperature, total_precipitation)
    pub pattern_type: PatternType,
    /// Anomaly flags such as `temperature_above_normal`
    pub anomalies: BTreeSet<String>,
    /// Least-squares slope per day, keyed by metric name
    pub trends: BTreeMap<String, f64>,
    /// One-line description
    pub summary: String,
}

impl SeasonalPattern {
    /// Whether any metric was flagged as anomalous
    #[must_use]
    pub fn is_anomalous(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// Slope for a metric, if one was fitted
    #[must_use]
    pub fn trend(&self, metric: &str) -> Option<f64> {
        self.trends.get(metric).copied()
    }
}
