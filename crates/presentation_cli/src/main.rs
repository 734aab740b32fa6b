//! Agro-climatic prediction CLI
//!
//! Runs the prediction entry points against Open-Meteo and SoilGrids and
//! prints the result as JSON on stdout. Logs go to stderr.

#![allow(clippy::print_stdout)]

mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use application::AgroPredictionService;
use application::services::suitability::irrigation_plan;
use chrono::Utc;
use clap::Parser;
use domain::catalog::{all_crops, known_locations};
use domain::entities::{SoilData, WeatherObservation};
use infrastructure::{
    AppConfig, CachedWeatherHistoryAdapter, LogNotificationAdapter, SoilDataAdapter,
    WeatherHistoryAdapter, init_telemetry,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::info;

use crate::cli::{Cli, Commands, log_filter_from_verbosity, render};

/// Wire the service to the configured upstream adapters
fn build_service(config: &AppConfig) -> anyhow::Result<AgroPredictionService> {
    let weather = WeatherHistoryAdapter::with_config(config.weather.clone())?;
    let weather = CachedWeatherHistoryAdapter::new(weather, &config.cache);
    let soil = SoilDataAdapter::with_config(config.soil.clone())?;

    let service = AgroPredictionService::new(Arc::new(weather), Arc::new(soil))
        .with_config(config.prediction.to_prediction_config()?);

    Ok(if config.prediction.notifications {
        service.with_notifier(Arc::new(LogNotificationAdapter::new()))
    } else {
        service
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Commands that need no upstream service
fn run_offline(command: &Commands) -> Option<Value> {
    match command {
        Commands::Locations => Some(json!(known_locations())),
        Commands::Crops => Some(Value::Array(
            all_crops()
                .iter()
                .map(|crop| {
                    json!({
                        "key": crop.key,
                        "name": crop.display_name,
                        "family": crop.family,
                        "water_need": crop.water_need,
                        "variety": crop.variety,
                        "planting_window": crop.planting_window,
                        "harvest_window": crop.harvest_window,
                        "yield_t_per_ha": [crop.yield_range.0, crop.yield_range.1],
                    })
                })
                .collect(),
        )),
        Commands::Irrigation {
            crop,
            location: None,
        } => Some(json!(irrigation_plan(crop, None, None))),
        _ => None,
    }
}

async fn run(command: Commands, service: &AgroPredictionService) -> anyhow::Result<Value> {
    let today = Utc::now().date_naive();

    let value = match command {
        Commands::Patterns {
            location,
            start,
            end,
        } => json!(
            service
                .analyze_sequential_patterns(&location, start, end)
                .await?
        ),

        Commands::Seasonal {
            location,
            zone,
            months,
            enso,
            as_of,
        } => json!(
            service
                .generate_seasonal_prediction_as_of(
                    &location,
                    zone.as_deref(),
                    months,
                    &enso,
                    as_of.unwrap_or(today),
                )
                .await?
        ),

        Commands::LongTerm {
            location,
            start,
            days,
        } => json!(
            service
                .generate_long_term_prediction(&location, start.unwrap_or(today), days)
                .await?
        ),

        Commands::Insights {
            location,
            crop,
            stage,
            weather_file: Some(weather_file),
            soil_file: Some(soil_file),
        } => {
            let weather: WeatherObservation = read_json(&weather_file)?;
            let soil: SoilData = read_json(&soil_file)?;
            json!(
                service
                    .get_ai_insights(&location, Some(weather), Some(soil), &crop, &stage)
                    .await?
            )
        },

        Commands::Insights {
            location,
            crop,
            stage,
            ..
        } => json!(service.fetch_ai_insights(&location, &crop, &stage).await?),

        Commands::Analysis {
            location,
            days,
            history_file: Some(history_file),
            ..
        } => {
            let history: Vec<WeatherObservation> = read_json(&history_file)?;
            json!(
                service
                    .get_ai_weather_analysis(&location, &history, days)
                    .await?
            )
        },

        Commands::Analysis {
            location,
            days,
            history_days,
            history_file: None,
        } => json!(
            service
                .fetch_weather_analysis(&location, history_days, days)
                .await?
        ),

        Commands::Irrigation {
            crop,
            location: Some(location),
        } => json!(service.fetch_irrigation_plan(&location, &crop).await?),

        Commands::Health => json!({ "weather_available": service.is_weather_available().await }),

        Commands::Locations | Commands::Crops | Commands::Irrigation { location: None, .. } => {
            run_offline(&command).unwrap_or(Value::Null)
        },
    };

    Ok(value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("Failed to load configuration")?;

    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.telemetry.log_filter = filter.to_string();
    }
    init_telemetry(&config.telemetry)?;
    info!(command = ?cli.command, "Running command");

    let output = match run_offline(&cli.command) {
        Some(value) => value,
        None => run(cli.command, &build_service(&config)?).await?,
    };

    println!("{}", render(&output, cli.pretty)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_listed_offline() {
        let value = run_offline(&Commands::Locations).unwrap();
        let ids: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|l| l["id"].as_str())
            .collect();
        assert!(ids.contains(&"harare"));
        assert!(ids.contains(&"bulawayo"));
    }

    #[test]
    fn crops_listed_offline() {
        let value = run_offline(&Commands::Crops).unwrap();
        let crops = value.as_array().unwrap();
        assert!(!crops.is_empty());
        assert!(crops.iter().any(|c| c["key"] == "maize"));
    }

    #[test]
    fn baseline_irrigation_is_offline() {
        let value = run_offline(&Commands::Irrigation {
            crop: "maize".into(),
            location: None,
        })
        .unwrap();
        assert_eq!(value.as_array().unwrap().len(), 5);
    }

    #[test]
    fn located_irrigation_needs_service() {
        assert!(
            run_offline(&Commands::Irrigation {
                crop: "maize".into(),
                location: Some("harare".into()),
            })
            .is_none()
        );
        assert!(run_offline(&Commands::Health).is_none());
    }

    #[test]
    fn service_builds_from_default_config() {
        assert!(build_service(&AppConfig::default()).is_ok());
    }

    #[test]
    fn read_json_reports_missing_file() {
        let err = read_json::<SoilData>(Path::new("/nonexistent/soil.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/soil.json"));
    }
}
