//! Adapters implementing application ports
//!
//! Each adapter wraps an integration client and maps its types and errors
//! into the application's vocabulary.

mod cached_weather_adapter;
mod log_notification_adapter;
mod soil_data_adapter;
mod weather_history_adapter;

pub use cached_weather_adapter::CachedWeatherHistoryAdapter;
pub use log_notification_adapter::LogNotificationAdapter;
pub use soil_data_adapter::SoilDataAdapter;
pub use weather_history_adapter::WeatherHistoryAdapter;
