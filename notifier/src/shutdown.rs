use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::timeout;
use twitch_client::{Fetcher, ResponseParser};

use crate::channels::ChannelSource;
use crate::monitor::LiveMonitor;
use crate::notification::{NotificationQueue, NotificationSink};

/// How long an in-flight poll cycle may keep shutdown waiting.
const POLL_STOP_GRACE: Duration = Duration::from_secs(5);
const NOTIFICATION_DRAIN_GRACE: Duration = Duration::from_secs(2);

pub async fn graceful_shutdown<C, F, P, N>(
    monitor: &LiveMonitor<C, F, P, N>,
    notifications: &NotificationQueue,
    notification_worker: JoinHandle<()>,
) where
    C: ChannelSource,
    F: Fetcher + 'static,
    P: ResponseParser + 'static,
    N: NotificationSink + 'static,
{
    tracing::info!("Shutdown sequence started");

    if timeout(POLL_STOP_GRACE, monitor.stop()).await.is_ok() {
        tracing::info!("Shutdown: polling stopped");
    } else {
        tracing::warn!("Shutdown: poll cycle still running, not waiting any longer");
    }

    notifications.close();
    tracing::info!("Shutdown: notification queue closed");

    if timeout(NOTIFICATION_DRAIN_GRACE, notification_worker)
        .await
        .is_err()
    {
        tracing::warn!("Shutdown: notification worker did not drain in time");
    }

    tracing::info!("Shutdown sequence completed");
}
