//! Notification dispatch port
//!
//! The engine hands alerts to a dispatcher; delivery (push, SMS, e-mail)
//! is the adapter's concern.

use async_trait::async_trait;
use domain::value_objects::Priority;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// What kind of event a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Frost, heat or heavy-rain alert
    WeatherAlert,
    /// Elevated drought risk for the coming season
    DroughtWarning,
    /// Pest or disease outbreak conditions
    PestWarning,
}

/// A notification ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgroNotification {
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    pub priority: Priority,
    /// Location identifier the notification concerns
    pub location: String,
}

/// Port for handing notifications to a delivery channel
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Queue a notification for asynchronous delivery
    async fn dispatch(&self, notification: &AgroNotification) -> Result<(), ApplicationError>;
}
