//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo archive and forecast APIs (<https://open-meteo.com>).
//! Provides daily reanalysis history and current conditions without requiring an API key.

pub mod client;
mod models;

pub use client::{OpenMeteoClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{CurrentConditions, DailyObservation, WeatherCondition};
