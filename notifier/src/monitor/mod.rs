//! Live stream monitor: polls channels and notifies once per go-live.
//!
//! [`LiveMonitor`] is the engine the host talks to. It pairs a
//! [`ChannelSource`] with a [`Scheduler`] and exposes start, reload and
//! stop; everything else stays private to the polling loop.

pub mod cycle;
pub mod liveness;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod tests;

use twitch_client::{ChannelId, Fetcher, ResponseParser};

pub use cycle::{CycleReport, format_message, run_once};
pub use liveness::{LivenessState, LivenessStore};
pub use scheduler::Scheduler;

use crate::channels::{ChannelSource, SourceUnavailable};
use crate::notification::NotificationSink;

pub struct LiveMonitor<C, F, P, N> {
    source: C,
    scheduler: Scheduler<F, P, N>,
}

impl<C, F, P, N> LiveMonitor<C, F, P, N>
where
    C: ChannelSource,
    F: Fetcher + 'static,
    P: ResponseParser + 'static,
    N: NotificationSink + 'static,
{
    pub fn new(source: C, scheduler: Scheduler<F, P, N>) -> Self {
        Self { source, scheduler }
    }

    /// Load the channel list and begin polling.
    ///
    /// Returns the number of channels scheduled.
    pub async fn start(&self) -> Result<usize, SourceUnavailable> {
        let channels = self.source.load_channel_ids()?;
        if channels.is_empty() {
            tracing::warn!("Channel list is empty; nothing to poll");
        }
        let count = channels.len();
        self.scheduler.start(channels).await;
        Ok(count)
    }

    /// Re-read the channel list and restart polling with a fresh store.
    ///
    /// When the list cannot be loaded the current schedule keeps running
    /// with the previous channels.
    pub async fn reload(&self) -> Result<usize, SourceUnavailable> {
        let channels = match self.source.load_channel_ids() {
            Ok(channels) => channels,
            Err(e) => {
                tracing::error!(error = %e, "Reload failed; keeping previous channel list");
                return Err(e);
            }
        };
        let count = channels.len();
        self.scheduler.reload(channels).await;
        tracing::info!(count, "Channel list reloaded");
        Ok(count)
    }

    pub async fn stop(&self) {
        self.scheduler.stop().await;
    }

    pub async fn is_running(&self) -> bool {
        self.scheduler.is_running().await
    }

    pub async fn liveness(&self, channel: &ChannelId) -> LivenessState {
        self.scheduler.liveness(channel).await
    }
}
