//! Historical pattern analysis
//!
//! Partitions daily observations into southern-hemisphere calendar seasons
//! and summarises each one: means, totals, fitted trends, and anomaly flags
//! against the site climatology.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use domain::catalog::{days_in_month, site_normal};
use domain::entities::{Location, Reading, SeasonalPattern, WeatherObservation};
use domain::value_objects::{PatternType, SeasonPeriod};

use super::statistics::{linear_slope, mean, round_to};

/// Standard deviations a season's metric must depart from normal to be flagged
pub const ANOMALY_SIGMA: f64 = 2.0;

/// Inter-annual standard deviation of a seasonal mean temperature
const TEMPERATURE_SIGMA_C: f64 = 1.2;

/// Inter-annual standard deviation of seasonal mean humidity
const HUMIDITY_SIGMA_PCT: f64 = 8.0;

/// Standard deviation of a rainfall total as a fraction of the expected total
const PRECIPITATION_SIGMA_FRACTION: f64 = 0.35;

/// Lower bound on the rainfall standard deviation, so dry-season drizzle
/// does not register as an anomaly
const PRECIPITATION_SIGMA_FLOOR_MM: f64 = 10.0;

/// Metric keys used for trends and anomaly flags
pub const TEMPERATURE: &str = "temperature";
pub const PRECIPITATION: &str = "precipitation";
pub const HUMIDITY: &str = "humidity";

/// Climatological expectation over the days a season was observed
#[derive(Debug, Clone, Copy)]
struct Baseline {
    temperature: f64,
    precipitation_total: f64,
    humidity: f64,
}

impl Baseline {
    fn for_days(location: &Location, dates: &[NaiveDate]) -> Self {
        let mut temperature = 0.0;
        let mut precipitation_total = 0.0;
        let mut humidity = 0.0;
        for date in dates {
            let normal = site_normal(location, location.zone, date.month());
            temperature += normal.mean_temp();
            humidity += normal.humidity;
            precipitation_total +=
                normal.rainfall_mm / f64::from(days_in_month(date.year(), date.month()));
        }
        let n = dates.len().max(1) as f64;
        Self {
            temperature: temperature / n,
            precipitation_total,
            humidity: humidity / n,
        }
    }
}

/// Summarise observations between `start` and `end` (inclusive) per season
///
/// Observations outside the range or with missing values are ignored.
/// No usable observations yields an empty vector. Seasons are returned in
/// chronological order.
pub fn analyze_patterns(
    location: &Location,
    observations: &[WeatherObservation],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<SeasonalPattern> {
    let mut by_season: BTreeMap<SeasonPeriod, Vec<(NaiveDate, Reading)>> = BTreeMap::new();
    let mut sorted: Vec<&WeatherObservation> = observations.iter().collect();
    sorted.sort_by_key(|obs| obs.timestamp);
    for obs in sorted {
        let date = obs.date();
        if date < start || date > end {
            continue;
        }
        let Some(reading) = obs.reading() else {
            continue;
        };
        by_season
            .entry(SeasonPeriod::containing(date))
            .or_default()
            .push((date, reading));
    }

    by_season
        .into_iter()
        .map(|(period, group)| summarise_season(location, period, &group))
        .collect()
}

fn summarise_season(
    location: &Location,
    period: SeasonPeriod,
    observations: &[(NaiveDate, Reading)],
) -> SeasonalPattern {
    let dates: Vec<NaiveDate> = observations.iter().map(|(date, _)| *date).collect();
    let temperatures: Vec<f64> = observations.iter().map(|(_, r)| r.temperature).collect();
    let precipitation: Vec<f64> = observations.iter().map(|(_, r)| r.precipitation).collect();
    let humidity: Vec<f64> = observations.iter().map(|(_, r)| r.humidity).collect();

    let average_temperature = round_to(mean(&temperatures).unwrap_or_default(), 2);
    let total_precipitation = round_to(precipitation.iter().sum(), 1);
    let average_humidity = round_to(mean(&humidity).unwrap_or_default(), 1);
    let pattern_type = PatternType::classify(average_temperature, total_precipitation);

    let baseline = Baseline::for_days(location, &dates);
    let anomalies = detect_anomalies(
        &baseline,
        average_temperature,
        total_precipitation,
        average_humidity,
    );

    let start_date = dates.first().copied().unwrap_or_else(|| period.first_day());
    let end_date = dates.last().copied().unwrap_or_else(|| period.last_day());
    let xs: Vec<f64> = dates
        .iter()
        .map(|d| (*d - start_date).num_days() as f64)
        .collect();

    let mut trends = BTreeMap::new();
    for (metric, values) in [
        (TEMPERATURE, &temperatures),
        (PRECIPITATION, &precipitation),
        (HUMIDITY, &humidity),
    ] {
        if let Some(slope) = linear_slope(&xs, values) {
            trends.insert(metric.to_string(), round_to(slope, 4));
        }
    }

    let season_label = period.label();
    let summary = describe(
        &season_label,
        pattern_type,
        average_temperature,
        total_precipitation,
        observations.len(),
        &anomalies,
    );

    SeasonalPattern {
        season_label,
        season: period.season(),
        start_date,
        end_date,
        observation_count: observations.len(),
        average_temperature,
        total_precipitation,
        average_humidity,
        pattern_type,
        anomalies,
        trends,
        summary,
    }
}

fn detect_anomalies(
    baseline: &Baseline,
    temperature: f64,
    precipitation: f64,
    humidity: f64,
) -> BTreeSet<String> {
    let precipitation_sigma = (baseline.precipitation_total * PRECIPITATION_SIGMA_FRACTION)
        .max(PRECIPITATION_SIGMA_FLOOR_MM);

    [
        (TEMPERATURE, temperature, baseline.temperature, TEMPERATURE_SIGMA_C),
        (
            PRECIPITATION,
            precipitation,
            baseline.precipitation_total,
            precipitation_sigma,
        ),
        (HUMIDITY, humidity, baseline.humidity, HUMIDITY_SIGMA_PCT),
    ]
    .into_iter()
    .filter_map(|(metric, actual, expected, sigma)| {
        let z = (actual - expected) / sigma;
        if z > ANOMALY_SIGMA {
            Some(format!("{metric}_above_normal"))
        } else if z < -ANOMALY_SIGMA {
            Some(format!("{metric}_below_normal"))
        } else {
            None
        }
    })
    .collect()
}

fn describe(
    label: &str,
    pattern_type: PatternType,
    temperature: f64,
    precipitation: f64,
    days: usize,
    anomalies: &BTreeSet<String>,
) -> String {
    let mut summary = format!(
        "{label}: {pattern_type} season, mean {temperature:.1}°C and {precipitation:.0}mm rain over {days} days"
    );
    if !anomalies.is_empty() {
        let flags: Vec<String> = anomalies.iter().map(|a| a.replace('_', " ")).collect();
        summary.push_str(&format!(" ({})", flags.join(", ")));
    }
    summary
}
