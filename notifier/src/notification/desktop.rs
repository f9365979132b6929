//! Notification sinks: native desktop toasts and the log.

use std::time::Duration;

use super::NotificationSink;
use super::types::Severity;

/// Shows notifications through the platform notification service.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
    timeout: Duration,
}

impl DesktopNotifier {
    pub fn new(app_name: impl Into<String>, timeout: Duration) -> Self {
        Self {
            app_name: app_name.into(),
            timeout,
        }
    }
}

impl NotificationSink for DesktopNotifier {
    fn display(&self, title: &str, body: &str, severity: Severity) {
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(&self.app_name)
            .summary(title)
            .body(body)
            .timeout(notify_rust::Timeout::Milliseconds(
                u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX),
            ));

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.urgency(urgency(severity));

        match notification.show() {
            Ok(_) => tracing::debug!(%severity, title, "Desktop notification shown"),
            Err(e) => tracing::warn!(error = %e, title, "Failed to show desktop notification"),
        }
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn urgency(severity: Severity) -> notify_rust::Urgency {
    match severity {
        Severity::Info => notify_rust::Urgency::Normal,
        Severity::Warning => notify_rust::Urgency::Normal,
        Severity::Error => notify_rust::Urgency::Critical,
    }
}

/// Writes notifications to the log only (headless or disabled mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn display(&self, title: &str, body: &str, severity: Severity) {
        match severity {
            Severity::Info => tracing::info!(title, body, "Notification"),
            Severity::Warning => tracing::warn!(title, body, "Notification"),
            Severity::Error => tracing::error!(title, body, "Notification"),
        }
    }
}
