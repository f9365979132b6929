//! Desktop notification delivery for live transitions.
//!
//! The engine only sees [`NotificationSink`]; the host decides whether
//! notifications reach the desktop, the log, or both through the queue.

pub mod desktop;
pub mod queue;
pub mod types;

pub use desktop::{DesktopNotifier, LogNotifier};
pub use queue::NotificationQueue;
pub use types::{Notification, Severity};

/// Fire-and-forget notification target.
pub trait NotificationSink: Send + Sync {
    fn display(&self, title: &str, body: &str, severity: Severity);
}

impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    fn display(&self, title: &str, body: &str, severity: Severity) {
        (**self).display(title, body, severity);
    }
}
