//! Weather history analysis and short-range outlook
//!
//! Summarises a run of observations, fits trends, detects seasonal patterns
//! and projects a daily outlook that relaxes from the recent week towards
//! climatology over two weeks.

use chrono::{Datelike, Duration, NaiveDate};
use domain::catalog::{days_in_month, site_normal};
use domain::entities::{Location, Reading, SeasonalPattern, WeatherObservation};
use domain::value_objects::Trend;
use serde::{Deserialize, Serialize};

use super::pattern_analyzer::analyze_patterns;
use super::statistics::{linear_slope, mean, round_to};
use crate::error::ApplicationError;

/// Longest supported outlook in days
pub const MAX_DAYS_AHEAD: u32 = 365;

/// Observations averaged as the "recent" state
const RECENT_WINDOW_DAYS: usize = 7;

/// Days over which the recent state fades into climatology
const BLEND_HORIZON_DAYS: f64 = 14.0;

/// Daily slopes within these bands read as stable
const TEMPERATURE_TREND_TOLERANCE: f64 = 0.02;
const PRECIPITATION_TREND_TOLERANCE: f64 = 0.05;
const HUMIDITY_TREND_TOLERANCE: f64 = 0.05;

/// Precipitation (mm) on a day that counts as rain
const RAIN_DAY_MM: f64 = 1.0;

const HEAT_ALERT_C: f64 = 30.0;
const FROST_ALERT_C: f64 = 4.0;
const HEAVY_RAIN_MM: f64 = 50.0;
const DRY_SPELL_DAYS: usize = 14;

/// Aggregate statistics over the supplied observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherStatistics {
    pub observation_count: usize,
    pub average_temperature: f64,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub total_precipitation: f64,
    pub average_humidity: f64,
    pub average_wind_speed: f64,
    /// Days with at least 1mm of rain
    pub rain_days: usize,
}

/// Direction of each metric over the observed period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeatherTrends {
    pub temperature: Option<Trend>,
    pub precipitation: Option<Trend>,
    pub humidity: Option<Trend>,
}

/// Projected conditions for one future day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyOutlook {
    pub date: NaiveDate,
    /// Days after the as-of date
    pub lead_days: u32,
    pub temperature: f64,
    pub precipitation: f64,
    pub humidity: f64,
    pub confidence: f64,
}

/// Full weather analysis for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherAnalysis {
    /// Location identifier
    pub location: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    /// `None` when no usable observations were supplied
    pub statistics: Option<WeatherStatistics>,
    pub trends: WeatherTrends,
    pub patterns: Vec<SeasonalPattern>,
    pub outlook: Vec<DailyOutlook>,
    pub alerts: Vec<String>,
}

/// Reject outlook lengths outside `1..=MAX_DAYS_AHEAD`
pub fn validate_days_ahead(days_ahead: u32) -> Result<(), ApplicationError> {
    if (1..=MAX_DAYS_AHEAD).contains(&days_ahead) {
        Ok(())
    } else {
        Err(ApplicationError::InvalidParameter(format!(
            "days_ahead must be between 1 and {MAX_DAYS_AHEAD}, got {days_ahead}"
        )))
    }
}

/// Outlook confidence for a lead in days
#[must_use]
pub fn outlook_confidence(lead_days: u32) -> f64 {
    round_to((0.85 - 0.03 * f64::from(lead_days)).max(0.30), 2)
}

/// Gap-free readings with their dates, oldest first
fn usable(history: &[WeatherObservation]) -> Vec<(NaiveDate, Reading)> {
    let mut obs: Vec<&WeatherObservation> = history.iter().collect();
    obs.sort_by_key(|o| o.timestamp);
    obs.into_iter()
        .filter_map(|o| o.reading().map(|r| (o.date(), r)))
        .collect()
}

fn statistics(obs: &[(NaiveDate, Reading)]) -> Option<WeatherStatistics> {
    if obs.is_empty() {
        return None;
    }
    let temps: Vec<f64> = obs.iter().map(|(_, r)| r.temperature).collect();
    let humidity: Vec<f64> = obs.iter().map(|(_, r)| r.humidity).collect();
    let wind: Vec<f64> = obs.iter().map(|(_, r)| r.wind_speed).collect();

    Some(WeatherStatistics {
        observation_count: obs.len(),
        average_temperature: round_to(mean(&temps)?, 1),
        min_temperature: temps.iter().copied().fold(f64::INFINITY, f64::min),
        max_temperature: temps.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        total_precipitation: round_to(obs.iter().map(|(_, r)| r.precipitation).sum(), 1),
        average_humidity: round_to(mean(&humidity)?, 1),
        average_wind_speed: round_to(mean(&wind)?, 1),
        rain_days: obs.iter().filter(|(_, r)| r.precipitation >= RAIN_DAY_MM).count(),
    })
}

/// Fit daily trends over the observations
///
/// Metrics with fewer than two distinct days have no trend.
pub fn history_trends(history: &[WeatherObservation]) -> WeatherTrends {
    let obs = usable(history);
    let Some(&(first, _)) = obs.first() else {
        return WeatherTrends::default();
    };
    let xs: Vec<f64> = obs
        .iter()
        .map(|(date, _)| (*date - first).num_days() as f64)
        .collect();
    let fit = |values: Vec<f64>, tolerance: f64| {
        linear_slope(&xs, &values).map(|slope| Trend::from_slope(slope, tolerance))
    };

    WeatherTrends {
        temperature: fit(
            obs.iter().map(|(_, r)| r.temperature).collect(),
            TEMPERATURE_TREND_TOLERANCE,
        ),
        precipitation: fit(
            obs.iter().map(|(_, r)| r.precipitation).collect(),
            PRECIPITATION_TREND_TOLERANCE,
        ),
        humidity: fit(
            obs.iter().map(|(_, r)| r.humidity).collect(),
            HUMIDITY_TREND_TOLERANCE,
        ),
    }
}

#[derive(Debug, Clone, Copy)]
struct RecentState {
    temperature: f64,
    precipitation: f64,
    humidity: f64,
}

fn recent_state(obs: &[(NaiveDate, Reading)]) -> Option<RecentState> {
    let recent = &obs[obs.len().saturating_sub(RECENT_WINDOW_DAYS)..];
    let temps: Vec<f64> = recent.iter().map(|(_, r)| r.temperature).collect();
    let rain: Vec<f64> = recent.iter().map(|(_, r)| r.precipitation).collect();
    let humidity: Vec<f64> = recent.iter().map(|(_, r)| r.humidity).collect();
    Some(RecentState {
        temperature: mean(&temps)?,
        precipitation: mean(&rain)?,
        humidity: mean(&humidity)?,
    })
}

/// Daily outlook blending the recent week into site climatology
///
/// Day `d` carries weight `max(0, 1 - d/14)` on the recent mean; without
/// recent observations the outlook is pure climatology.
pub fn daily_outlook(
    location: &Location,
    history: &[WeatherObservation],
    as_of: NaiveDate,
    days_ahead: u32,
) -> Vec<DailyOutlook> {
    let obs = usable(history);
    let recent = recent_state(&obs);

    (1..=days_ahead)
        .map(|lead| {
            let date = as_of + Duration::days(i64::from(lead));
            let normal = site_normal(location, location.zone, date.month());
            let normal_rain =
                normal.rainfall_mm / f64::from(days_in_month(date.year(), date.month()));
            let weight = recent.map_or(0.0, |_| {
                (1.0 - f64::from(lead) / BLEND_HORIZON_DAYS).max(0.0)
            });
            let blend = |recent_value: Option<f64>, climate: f64| {
                recent_value.map_or(climate, |r| weight * r + (1.0 - weight) * climate)
            };

            DailyOutlook {
                date,
                lead_days: lead,
                temperature: round_to(
                    blend(recent.map(|r| r.temperature), normal.mean_temp()),
                    1,
                ),
                precipitation: round_to(blend(recent.map(|r| r.precipitation), normal_rain), 1),
                humidity: round_to(blend(recent.map(|r| r.humidity), normal.humidity), 1),
                confidence: outlook_confidence(lead),
            }
        })
        .collect()
}

/// Longest run of consecutive calendar days below [`RAIN_DAY_MM`]
///
/// A missing day breaks the run.
fn longest_dry_run(obs: &[(NaiveDate, Reading)]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;
    for &(date, reading) in obs {
        let follows = previous.is_some_and(|p| date - p == Duration::days(1));
        if !follows {
            current = 0;
        }
        if reading.precipitation < RAIN_DAY_MM {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
        previous = Some(date);
    }
    longest
}

/// Weather alerts from recent observations and the outlook
pub fn weather_alerts(history: &[WeatherObservation], outlook: &[DailyOutlook]) -> Vec<String> {
    let obs = usable(history);
    let recent = &obs[obs.len().saturating_sub(RECENT_WINDOW_DAYS)..];
    let mut alerts = Vec::new();

    if let Some(hot) = outlook.iter().find(|d| d.temperature >= HEAT_ALERT_C) {
        alerts.push(format!(
            "Heat alert: mean temperature near {:.0}°C expected from {}",
            hot.temperature, hot.date
        ));
    }
    if let Some(cold) = outlook.iter().find(|d| d.temperature <= FROST_ALERT_C) {
        alerts.push(format!(
            "Frost alert: mean temperature near {:.0}°C expected from {}",
            cold.temperature, cold.date
        ));
    }
    if let Some((date, storm)) = recent.iter().find(|(_, r)| r.precipitation >= HEAVY_RAIN_MM) {
        alerts.push(format!(
            "Heavy rain: {:.0}mm fell on {date}, check for waterlogging and erosion",
            storm.precipitation
        ));
    }

    let in_rainy_season = obs
        .last()
        .is_some_and(|(date, _)| matches!(date.month(), 11 | 12 | 1 | 2 | 3));
    let dry_run = longest_dry_run(&obs);
    if in_rainy_season && dry_run >= DRY_SPELL_DAYS {
        alerts.push(format!(
            "Dry spell: {dry_run} consecutive days without meaningful rain during the rainy season"
        ));
    }

    alerts
}

/// Analyse history and project an outlook
///
/// `days_ahead` must already be validated with [`validate_days_ahead`].
pub fn analyze_weather(
    location: &Location,
    history: &[WeatherObservation],
    as_of: NaiveDate,
    days_ahead: u32,
) -> WeatherAnalysis {
    let obs = usable(history);
    let period_start = obs.first().map(|(date, _)| *date);
    let period_end = obs.last().map(|(date, _)| *date);

    let patterns = match (period_start, period_end) {
        (Some(start), Some(end)) => analyze_patterns(location, history, start, end),
        _ => Vec::new(),
    };
    let outlook = daily_outlook(location, history, as_of, days_ahead);
    let alerts = weather_alerts(history, &outlook);

    WeatherAnalysis {
        location: location.id.clone(),
        period_start,
        period_end,
        statistics: statistics(&obs),
        trends: history_trends(history),
        patterns,
        outlook,
        alerts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domain::catalog::find_location;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(start: NaiveDate, days: i64, f: impl Fn(i64) -> (f64, f64)) -> Vec<WeatherObservation> {
        (0..days)
            .map(|i| {
                let date = start + Duration::days(i);
                let (temperature, precipitation) = f(i);
                WeatherObservation::complete(
                    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap()),
                    temperature,
                    60.0,
                    precipitation,
                    10.0,
                    850.0,
                )
            })
            .collect()
    }

    #[test]
    fn days_ahead_bounds() {
        assert!(validate_days_ahead(0).is_err());
        assert!(validate_days_ahead(1).is_ok());
        assert!(validate_days_ahead(365).is_ok());
        assert!(validate_days_ahead(366).is_err());
    }

    #[test]
    fn confidence_decays_to_floor() {
        assert!((outlook_confidence(1) - 0.82).abs() < 1e-9);
        assert!((outlook_confidence(10) - 0.55).abs() < 1e-9);
        assert!((outlook_confidence(30) - 0.30).abs() < 1e-9);
    }

    #[test]
    fn outlook_relaxes_to_climatology() {
        let harare = find_location("harare").unwrap();
        let history = series(ymd(2024, 6, 1), 14, |_| (25.0, 0.0));
        let outlook = daily_outlook(&harare, &history, ymd(2024, 6, 14), 20);

        let normal = site_normal(&harare, harare.zone, 6).mean_temp();
        // Day 7 is an even blend of the recent week and climatology
        assert!((outlook[6].temperature - round_to(0.5 * 25.0 + 0.5 * normal, 1)).abs() < 1e-9);
        // From day 14 on only climatology remains
        assert!((outlook[13].temperature - round_to(normal, 1)).abs() < 1e-9);
        assert!((outlook[15].temperature - round_to(normal, 1)).abs() < 1e-9);
        assert_eq!(outlook[0].date, ymd(2024, 6, 15));
    }

    #[test]
    fn empty_history_gives_climatology_only() {
        let harare = find_location("harare").unwrap();
        let analysis = analyze_weather(&harare, &[], ymd(2024, 1, 1), 3);

        assert!(analysis.statistics.is_none());
        assert!(analysis.patterns.is_empty());
        assert_eq!(analysis.trends, WeatherTrends::default());
        assert_eq!(analysis.outlook.len(), 3);
        let normal = site_normal(&harare, harare.zone, 1).mean_temp();
        assert!((analysis.outlook[0].temperature - round_to(normal, 1)).abs() < 1e-9);
    }

    #[test]
    fn statistics_and_trends() {
        let harare = find_location("harare").unwrap();
        let history = series(ymd(2024, 9, 1), 20, |i| (15.0 + 0.5 * i as f64, if i % 4 == 0 { 3.0 } else { 0.0 }));
        let analysis = analyze_weather(&harare, &history, ymd(2024, 9, 20), 5);

        let stats = analysis.statistics.unwrap();
        assert_eq!(stats.observation_count, 20);
        assert!((stats.min_temperature - 15.0).abs() < 1e-9);
        assert!((stats.max_temperature - 24.5).abs() < 1e-9);
        assert_eq!(stats.rain_days, 5);
        assert_eq!(analysis.trends.temperature, Some(Trend::Rising));
        assert_eq!(analysis.trends.humidity, Some(Trend::Stable));
        assert_eq!(analysis.patterns.len(), 1);
        assert_eq!(analysis.period_start, Some(ymd(2024, 9, 1)));
    }

    #[test]
    fn heat_and_heavy_rain_alerts() {
        let history = series(ymd(2024, 11, 1), 7, |i| (33.0, if i == 5 { 80.0 } else { 2.0 }));
        let harare = find_location("harare").unwrap();
        let analysis = analyze_weather(&harare, &history, ymd(2024, 11, 7), 3);

        assert!(analysis.alerts.iter().any(|a| a.starts_with("Heat alert")));
        assert!(analysis.alerts.iter().any(|a| a.starts_with("Heavy rain")));
        assert!(!analysis.alerts.iter().any(|a| a.starts_with("Dry spell")));
    }

    #[test]
    fn dry_spell_in_rainy_season() {
        let history = series(ymd(2024, 12, 1), 20, |_| (24.0, 0.0));
        let alerts = weather_alerts(&history, &[]);
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].starts_with("Dry spell: 20"));
    }

    #[test]
    fn missing_days_break_a_dry_spell() {
        // 10 dry days, a 5-day hole in the record, then 10 more dry days
        let mut history = series(ymd(2024, 12, 1), 10, |_| (24.0, 0.0));
        history.extend(series(ymd(2024, 12, 16), 10, |_| (24.0, 0.0)));

        assert_eq!(longest_dry_run(&usable(&history)), 10);
        assert!(weather_alerts(&history, &[]).is_empty());
    }

    #[test]
    fn gap_day_breaks_a_dry_spell() {
        let mut history = series(ymd(2025, 1, 1), 20, |_| (24.0, 0.0));
        history[8].precipitation = None;

        assert_eq!(longest_dry_run(&usable(&history)), 11);
    }

    #[test]
    fn dry_winter_is_not_a_dry_spell() {
        let history = series(ymd(2024, 7, 1), 20, |_| (14.0, 0.0));
        assert!(weather_alerts(&history, &[]).is_empty());
    }
}
