//! Notification queue and worker.
//!
//! Decouples the poll cycle from the platform notification call, which
//! may block. Notifications are shown one at a time in arrival order.

use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::NotificationSink;
use super::types::{Notification, Severity};

const QUEUE_CAPACITY: usize = 100;

/// Cloneable handle feeding the notification worker.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: Arc<RwLock<Option<mpsc::Sender<Notification>>>>,
}

impl NotificationQueue {
    /// Start the worker that hands queued notifications to `sink`.
    pub fn start<S>(sink: S) -> (Self, JoinHandle<()>)
    where
        S: NotificationSink + 'static,
    {
        let (tx, rx) = mpsc::channel::<Notification>(QUEUE_CAPACITY);
        let handle = tokio::spawn(worker_loop(Arc::new(sink), rx));
        tracing::info!("Notification queue worker started");

        (
            Self {
                tx: Arc::new(RwLock::new(Some(tx))),
            },
            handle,
        )
    }

    /// Enqueue a notification for display.
    pub fn enqueue(&self, notification: Notification) -> Result<(), String> {
        let guard = self
            .tx
            .read()
            .map_err(|_| "Notification queue lock poisoned".to_string())?;
        let tx = guard
            .as_ref()
            .ok_or_else(|| "Notification queue closed".to_string())?;

        tx.try_send(notification)
            .map_err(|e| format!("Notification queue full or closed: {e}"))
    }

    /// Drop the sender so the worker exits once the queue drains.
    pub fn close(&self) {
        if let Ok(mut slot) = self.tx.write() {
            *slot = None;
        }
    }
}

impl NotificationSink for NotificationQueue {
    fn display(&self, title: &str, body: &str, severity: Severity) {
        if let Err(e) = self.enqueue(Notification::new(title, body, severity)) {
            tracing::warn!(title, "Dropping notification: {e}");
        }
    }
}

async fn worker_loop<S>(sink: Arc<S>, mut rx: mpsc::Receiver<Notification>)
where
    S: NotificationSink + 'static,
{
    while let Some(notif) = rx.recv().await {
        let sink = Arc::clone(&sink);
        let shown = tokio::task::spawn_blocking(move || {
            sink.display(&notif.title, &notif.body, notif.severity);
        })
        .await;

        if let Err(e) = shown {
            tracing::error!(error = %e, "Notification worker task failed");
        }
    }

    tracing::info!("Notification queue worker stopped");
}
