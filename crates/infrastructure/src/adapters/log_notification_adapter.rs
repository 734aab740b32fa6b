//! Notification adapter that writes alerts to the log

use application::error::ApplicationError;
use application::ports::{AgroNotification, NotificationPort};
use async_trait::async_trait;
use domain::value_objects::Priority;
use tracing::{info, warn};

/// Delivers notifications as structured log events
///
/// High and critical notifications log at `warn`, the rest at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotificationAdapter;

impl LogNotificationAdapter {
    /// Create a new log notifier
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationPort for LogNotificationAdapter {
    async fn dispatch(&self, notification: &AgroNotification) -> Result<(), ApplicationError> {
        match notification.priority {
            Priority::High | Priority::Critical => warn!(
                kind = ?notification.kind,
                priority = notification.priority.label(),
                location = %notification.location,
                title = %notification.title,
                body = %notification.body,
                "Agro notification"
            ),
            Priority::Low | Priority::Medium => info!(
                kind = ?notification.kind,
                priority = notification.priority.label(),
                location = %notification.location,
                title = %notification.title,
                body = %notification.body,
                "Agro notification"
            ),
        }
        Ok(())
    }
}
