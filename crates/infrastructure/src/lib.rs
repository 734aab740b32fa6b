//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the Open-Meteo and SoilGrids adapters, configuration loading and
//! logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, CacheConfig, ENV_PREFIX, PredictionAppConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
