//! Command-line argument definitions

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;

/// Agro-climatic prediction CLI
#[derive(Debug, Parser)]
#[command(name = "agroclimate-cli")]
#[command(author, version, about = "Seasonal agro-climatic predictions for Zimbabwe", long_about = None)]
pub struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./config.toml when present)
    #[arg(short, long, global = true, env = "AGROCLIMATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect seasonal patterns in observed weather
    ///
    /// Example: agroclimate-cli patterns harare --start 2023-10-01 --end 2024-04-30
    Patterns {
        /// Location identifier (e.g. harare, bulawayo)
        location: String,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },

    /// Monthly seasonal forecast with drought risk
    Seasonal {
        /// Location identifier
        location: String,

        /// Climate zone override (defaults to the location's zone)
        #[arg(long)]
        zone: Option<String>,

        /// Number of months to forecast (1-24)
        #[arg(short, long, default_value_t = 6)]
        months: u32,

        /// ENSO phase: el_nino, la_nina or neutral
        #[arg(long, default_value = "neutral")]
        enso: String,

        /// Issue date (default: today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Long-range prediction from history, soil and the seasonal outlook
    LongTerm {
        /// Location identifier
        location: String,

        /// Start date (default: today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Horizon in days (1-365)
        #[arg(short, long, default_value_t = 90)]
        days: u32,
    },

    /// Crop suitability, irrigation and pest/disease insights
    ///
    /// Uses live conditions and soil unless both files are given.
    Insights {
        /// Location identifier
        location: String,

        /// Crop name (e.g. maize, sorghum, tobacco)
        #[arg(long)]
        crop: String,

        /// Growth stage
        #[arg(long, default_value = "vegetative")]
        stage: String,

        /// JSON file with one weather observation
        #[arg(long, requires = "soil_file")]
        weather_file: Option<PathBuf>,

        /// JSON file with a soil snapshot
        #[arg(long, requires = "weather_file")]
        soil_file: Option<PathBuf>,
    },

    /// Statistics, trends and a short daily outlook
    Analysis {
        /// Location identifier
        location: String,

        /// Outlook length in days (1-365)
        #[arg(short, long, default_value_t = 7)]
        days: u32,

        /// Days of history to fetch when no file is given
        #[arg(long, default_value_t = 30)]
        history_days: u32,

        /// JSON file with an array of weather observations
        #[arg(long)]
        history_file: Option<PathBuf>,
    },

    /// Irrigation schedule for every growth stage
    Irrigation {
        /// Crop name
        crop: String,

        /// Adjust to live conditions and soil at this location
        #[arg(long)]
        location: Option<String>,
    },

    /// List known locations
    Locations,

    /// List crops with dedicated profiles
    Crops,

    /// Check whether the weather source answers
    Health,
}

/// Log filter for a verbosity count; `None` keeps the configured filter
pub const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Render a result as JSON
pub fn render<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
