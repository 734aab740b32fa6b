//! Agro-climatic prediction service
//!
//! Async entry points over the pure analysis services. Resolves and
//! validates inputs, fetches observations and soil data through ports under
//! a timeout, and hands alerts to an optional notifier.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use domain::catalog::find_location;
use domain::entities::{
    AgroClimaticPrediction, IrrigationSchedule, SeasonalPattern, SoilData, WeatherObservation,
};
use domain::value_objects::{ClimateZone, EnsoStatus, GrowthStage, Priority, RiskLevel, RiskSeverity};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use super::insight_aggregator::{build_agro_prediction, horizon_months};
use super::pattern_analyzer::analyze_patterns;
use super::seasonal_forecast::{
    PredictionBundle, build_prediction_bundle, monthly_predictions, validate_prediction_months,
};
use super::suitability::{CropInsights, crop_insights, irrigation_plan};
use super::weather_analysis::{WeatherAnalysis, analyze_weather, validate_days_ahead};
use crate::error::ApplicationError;
use crate::ports::{
    AgroNotification, NotificationKind, NotificationPort, SoilDataPort, WeatherHistoryPort,
};

/// Default upstream fetch timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Default days of history fetched for long-term predictions
pub const DEFAULT_HISTORY_DAYS: u32 = 365;

/// Tunables for [`AgroPredictionService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionConfig {
    /// Upper bound on each upstream fetch
    pub fetch_timeout: Duration,
    /// Days of history fetched before the start date
    pub history_days: u32,
    /// ENSO phase assumed for long-term predictions
    pub enso_status: EnsoStatus,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            history_days: DEFAULT_HISTORY_DAYS,
            enso_status: EnsoStatus::default(),
        }
    }
}

/// Orchestrates pattern analysis, forecasting and crop insights
pub struct AgroPredictionService {
    weather: Arc<dyn WeatherHistoryPort>,
    soil: Arc<dyn SoilDataPort>,
    notifier: Option<Arc<dyn NotificationPort>>,
    config: PredictionConfig,
}

impl std::fmt::Debug for AgroPredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgroPredictionService")
            .field("config", &self.config)
            .field("weather", &"<WeatherHistoryPort>")
            .field("soil", &"<SoilDataPort>")
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

fn parse_param<T>(name: &str, value: &str) -> Result<T, ApplicationError>
where
    T: std::str::FromStr<Err = domain::DomainError>,
{
    value.parse::<T>().map_err(|err| {
        debug!(parameter = name, value, "Rejected parameter");
        ApplicationError::from(err)
    })
}

/// `date` shifted by `days`, or `InvalidParameter` when that leaves the calendar
fn shift_days(date: NaiveDate, days: i64, what: &str) -> Result<NaiveDate, ApplicationError> {
    date.checked_add_signed(chrono::Duration::days(days))
        .ok_or_else(|| {
            ApplicationError::InvalidParameter(format!(
                "{what} is out of the supported date range ({date} {days:+} days)"
            ))
        })
}

fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), ApplicationError> {
    if start > end {
        return Err(ApplicationError::InvalidParameter(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok(())
}

impl AgroPredictionService {
    /// Create a new prediction service
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherHistoryPort>, soil: Arc<dyn SoilDataPort>) -> Self {
        Self {
            weather,
            soil,
            notifier: None,
            config: PredictionConfig::default(),
        }
    }

    /// Set the service configuration
    #[must_use]
    pub fn with_config(mut self, config: PredictionConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a notifier for weather alerts and drought warnings
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationPort>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &PredictionConfig {
        &self.config
    }

    async fn fetch<T>(
        &self,
        source: &'static str,
        request: impl Future<Output = Result<T, ApplicationError>> + Send,
    ) -> Result<T, ApplicationError> {
        match timeout(self.config.fetch_timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    source,
                    timeout_ms = self.config.fetch_timeout.as_millis() as u64,
                    "Upstream fetch timed out"
                );
                Err(ApplicationError::DataUnavailable(format!(
                    "{source} did not respond within {}s",
                    self.config.fetch_timeout.as_secs_f64()
                )))
            },
        }
    }

    /// Seasonal patterns observed at a location between two dates
    #[instrument(skip(self))]
    pub async fn analyze_sequential_patterns(
        &self,
        location: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SeasonalPattern>, ApplicationError> {
        let site = find_location(location)?;
        validate_range(start, end)?;

        let history = self
            .fetch(
                "weather history",
                self.weather.get_daily_history(&site.coordinates, start, end),
            )
            .await?;
        let patterns = analyze_patterns(&site, &history, start, end);

        info!(
            location = %site.id,
            observations = history.len(),
            seasons = patterns.len(),
            "Analyzed seasonal patterns"
        );
        Ok(patterns)
    }

    /// Seasonal forecast issued today
    pub async fn generate_seasonal_prediction(
        &self,
        location: &str,
        climate_zone: Option<&str>,
        prediction_months: u32,
        enso_status: &str,
    ) -> Result<PredictionBundle, ApplicationError> {
        self.generate_seasonal_prediction_as_of(
            location,
            climate_zone,
            prediction_months,
            enso_status,
            Utc::now().date_naive(),
        )
        .await
    }

    /// Seasonal forecast issued on a given date
    ///
    /// Without a climate zone the location's own zone is used.
    #[instrument(skip(self))]
    pub async fn generate_seasonal_prediction_as_of(
        &self,
        location: &str,
        climate_zone: Option<&str>,
        prediction_months: u32,
        enso_status: &str,
        as_of: NaiveDate,
    ) -> Result<PredictionBundle, ApplicationError> {
        let site = find_location(location)?;
        validate_prediction_months(prediction_months)?;
        let zone = match climate_zone {
            Some(zone) => parse_param::<ClimateZone>("climate_zone", zone)?,
            None => site.zone,
        };
        let enso = parse_param::<EnsoStatus>("enso_status", enso_status)?;

        let bundle = build_prediction_bundle(&site, zone, enso, as_of, prediction_months);
        info!(
            location = %site.id,
            zone = %zone,
            enso = %enso,
            months = prediction_months,
            drought = %bundle.drought_risk.risk_level,
            "Generated seasonal prediction"
        );
        Ok(bundle)
    }

    /// Long-range prediction combining history, soil and the seasonal outlook
    ///
    /// Both upstream fetches must succeed and the history must hold at least
    /// one complete day; no partial prediction is returned.
    #[instrument(skip(self))]
    pub async fn generate_long_term_prediction(
        &self,
        location: &str,
        start_date: NaiveDate,
        days_ahead: u32,
    ) -> Result<AgroClimaticPrediction, ApplicationError> {
        let site = find_location(location)?;
        validate_days_ahead(days_ahead)?;
        shift_days(start_date, i64::from(days_ahead), "prediction horizon")?;
        let history_start =
            shift_days(start_date, -i64::from(self.config.history_days), "history window")?;
        let history_end = shift_days(start_date, -1, "history window")?;

        let (history, soil) = tokio::try_join!(
            self.fetch(
                "weather history",
                self.weather
                    .get_daily_history(&site.coordinates, history_start, history_end),
            ),
            self.fetch("soil data", self.soil.get_soil_data(&site.coordinates)),
        )?;
        if history.iter().all(WeatherObservation::has_gaps) {
            warn!(
                location = %site.id,
                observations = history.len(),
                "Weather history has no complete days"
            );
            return Err(ApplicationError::DataUnavailable(format!(
                "no complete weather history for {} between {history_start} and {history_end}",
                site.id
            )));
        }
        soil.validate()?;

        let months = monthly_predictions(
            &site,
            site.zone,
            self.config.enso_status,
            start_date,
            horizon_months(start_date, days_ahead),
        );
        let prediction =
            build_agro_prediction(&site, start_date, days_ahead, &months, &history, Some(&soil));

        info!(
            location = %site.id,
            days_ahead,
            months = months.len(),
            alerts = prediction.weather_alerts.len(),
            "Generated long-term prediction"
        );

        self.notify(&site.id, &prediction).await;
        Ok(prediction)
    }

    /// Crop insights from caller-supplied weather and soil
    ///
    /// Missing weather or soil yields insights with empty recommendation
    /// lists rather than an error.
    #[instrument(skip(self, current_weather, soil))]
    pub async fn get_ai_insights(
        &self,
        location: &str,
        current_weather: Option<WeatherObservation>,
        soil: Option<SoilData>,
        crop: &str,
        growth_stage: &str,
    ) -> Result<CropInsights, ApplicationError> {
        let site = find_location(location)?;
        let stage = parse_param::<GrowthStage>("growth_stage", growth_stage)?;
        if let Some(soil) = &soil {
            soil.validate()?;
        }

        let insights = crop_insights(
            &site,
            current_weather.as_ref(),
            soil.as_ref(),
            crop,
            stage,
        );
        debug!(
            location = %site.id,
            crop = %insights.crop,
            score = ?insights.suitability_score,
            "Computed crop insights"
        );
        Ok(insights)
    }

    /// Crop insights using live conditions and soil from the ports
    #[instrument(skip(self))]
    pub async fn fetch_ai_insights(
        &self,
        location: &str,
        crop: &str,
        growth_stage: &str,
    ) -> Result<CropInsights, ApplicationError> {
        let site = find_location(location)?;
        let (weather, soil) = tokio::try_join!(
            self.fetch(
                "current conditions",
                self.weather.get_current_conditions(&site.coordinates),
            ),
            self.fetch("soil data", self.soil.get_soil_data(&site.coordinates)),
        )?;
        self.get_ai_insights(&site.id, Some(weather), Some(soil), crop, growth_stage)
            .await
    }

    /// Irrigation schedules for every growth stage, adjusted to live
    /// conditions and soil at the location
    #[instrument(skip(self))]
    pub async fn fetch_irrigation_plan(
        &self,
        location: &str,
        crop: &str,
    ) -> Result<Vec<IrrigationSchedule>, ApplicationError> {
        let site = find_location(location)?;
        let (weather, soil) = tokio::try_join!(
            self.fetch(
                "current conditions",
                self.weather.get_current_conditions(&site.coordinates),
            ),
            self.fetch("soil data", self.soil.get_soil_data(&site.coordinates)),
        )?;
        soil.validate()?;

        let plan = irrigation_plan(crop, Some(&soil), Some(&weather));
        debug!(location = %site.id, crop, stages = plan.len(), "Built irrigation plan");
        Ok(plan)
    }

    /// Weather analysis over caller-supplied history
    ///
    /// The outlook starts the day after the latest observation, or after
    /// today when no history is given.
    #[instrument(skip(self, historical_data), fields(observations = historical_data.len()))]
    pub async fn get_ai_weather_analysis(
        &self,
        location: &str,
        historical_data: &[WeatherObservation],
        days_ahead: u32,
    ) -> Result<WeatherAnalysis, ApplicationError> {
        let site = find_location(location)?;
        validate_days_ahead(days_ahead)?;

        let as_of = historical_data
            .iter()
            .filter(|o| !o.has_gaps())
            .map(WeatherObservation::date)
            .max()
            .unwrap_or_else(|| Utc::now().date_naive());
        shift_days(as_of, i64::from(days_ahead), "outlook")?;
        let analysis = analyze_weather(&site, historical_data, as_of, days_ahead);

        info!(
            location = %site.id,
            days_ahead,
            alerts = analysis.alerts.len(),
            "Analyzed weather"
        );
        Ok(analysis)
    }

    /// Weather analysis over the last `history_days` fetched from the port
    #[instrument(skip(self))]
    pub async fn fetch_weather_analysis(
        &self,
        location: &str,
        history_days: u32,
        days_ahead: u32,
    ) -> Result<WeatherAnalysis, ApplicationError> {
        let site = find_location(location)?;
        validate_days_ahead(days_ahead)?;
        if history_days == 0 {
            return Err(ApplicationError::InvalidParameter(
                "history_days must be at least 1".to_string(),
            ));
        }

        let end = shift_days(Utc::now().date_naive(), -1, "history window")?;
        let start = shift_days(end, 1 - i64::from(history_days), "history window")?;
        let history = self
            .fetch(
                "weather history",
                self.weather.get_daily_history(&site.coordinates, start, end),
            )
            .await?;
        self.get_ai_weather_analysis(&site.id, &history, days_ahead)
            .await
    }

    /// Check if the weather source answers
    pub async fn is_weather_available(&self) -> bool {
        timeout(self.config.fetch_timeout, self.weather.is_available())
            .await
            .unwrap_or(false)
    }

    async fn notify(&self, location: &str, prediction: &AgroClimaticPrediction) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        for notification in notifications_for(location, prediction) {
            if let Err(e) = notifier.dispatch(&notification).await {
                warn!(
                    error = %e,
                    kind = ?notification.kind,
                    "Failed to dispatch notification"
                );
            }
        }
    }
}

/// Notifications warranted by a prediction
fn notifications_for(location: &str, prediction: &AgroClimaticPrediction) -> Vec<AgroNotification> {
    let mut out: Vec<AgroNotification> = prediction
        .weather_alerts
        .iter()
        .map(|alert| AgroNotification {
            title: format!("Weather alert for {location}"),
            body: alert.clone(),
            kind: NotificationKind::WeatherAlert,
            priority: Priority::High,
            location: location.to_string(),
        })
        .collect();

    if let Some(drought) = &prediction.drought_risk
        && drought.risk_level == RiskLevel::High
    {
        out.push(AgroNotification {
            title: format!("Drought warning for {location}"),
            body: drought.recommendations.join("\n"),
            kind: NotificationKind::DroughtWarning,
            priority: Priority::Critical,
            location: location.to_string(),
        });
    }

    for risk in [&prediction.pest_risk, &prediction.disease_risk]
        .into_iter()
        .flatten()
    {
        if risk.level >= RiskSeverity::High {
            out.push(AgroNotification {
                title: format!("{} pest and disease pressure at {location}", risk.level),
                body: risk.threats.join(", "),
                kind: NotificationKind::PestWarning,
                priority: if risk.level == RiskSeverity::Critical {
                    Priority::Critical
                } else {
                    Priority::High
                },
                location: location.to_string(),
            });
        }
    }

    out
}
