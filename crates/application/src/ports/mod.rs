//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod notification_port;
mod soil_data_port;
mod weather_history_port;

#[cfg(test)]
pub use notification_port::MockNotificationPort;
pub use notification_port::{AgroNotification, NotificationKind, NotificationPort};
#[cfg(test)]
pub use soil_data_port::MockSoilDataPort;
pub use soil_data_port::SoilDataPort;
#[cfg(test)]
pub use weather_history_port::MockWeatherHistoryPort;
pub use weather_history_port::WeatherHistoryPort;
