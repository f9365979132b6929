//! Periodic driver for [`run_once`](super::cycle::run_once).
//!
//! At most one poll job exists at a time. Replacing or stopping a job
//! cancels it and waits for any in-flight cycle to finish before the
//! store is touched again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use twitch_client::{ChannelId, Fetcher, ResponseParser};

use super::cycle::run_once;
use super::liveness::{LivenessState, LivenessStore};
use crate::notification::NotificationSink;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Shared collaborators of every poll job.
struct PollContext<F, P, N> {
    fetcher: F,
    parser: P,
    sink: N,
    store: Mutex<LivenessStore>,
    max_concurrent: usize,
}

/// A running schedule for one channel list.
struct PollJob {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollJob {
    /// Cancel between cycles and wait for the task to exit.
    async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            tracing::error!(error = %e, "Poll job ended abnormally");
        }
    }
}

pub struct Scheduler<F, P, N> {
    ctx: Arc<PollContext<F, P, N>>,
    interval: Duration,
    job: Mutex<Option<PollJob>>,
}

impl<F, P, N> Scheduler<F, P, N>
where
    F: Fetcher + 'static,
    P: ResponseParser + 'static,
    N: NotificationSink + 'static,
{
    pub fn new(fetcher: F, parser: P, sink: N, interval: Duration, max_concurrent: usize) -> Self {
        Self {
            ctx: Arc::new(PollContext {
                fetcher,
                parser,
                sink,
                store: Mutex::new(LivenessStore::new()),
                max_concurrent: max_concurrent.max(1),
            }),
            interval: interval.max(MIN_INTERVAL),
            job: Mutex::new(None),
        }
    }

    /// Replace any running schedule with a fresh one for `channels`.
    ///
    /// The first cycle runs immediately, then once per interval.
    pub async fn start(&self, channels: Vec<ChannelId>) {
        let mut slot = self.job.lock().await;
        if let Some(previous) = slot.take() {
            tracing::debug!("Cancelling previous poll job");
            previous.shutdown().await;
        }

        let channels: Arc<[ChannelId]> = {
            let mut store = self.ctx.store.lock().await;
            store.initialize(&channels);
            store.channels().into()
        };

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(
            Arc::clone(&self.ctx),
            channels.clone(),
            self.interval,
            cancel.clone(),
        ));
        *slot = Some(PollJob { cancel, handle });

        tracing::info!(
            channels = channels.len(),
            interval_ms = self.interval.as_millis() as u64,
            "Polling started"
        );
    }

    /// Restart with a new channel list; previously live channels are forgotten.
    pub async fn reload(&self, channels: Vec<ChannelId>) {
        self.start(channels).await;
    }

    /// Cancel the schedule. An in-flight cycle is allowed to finish.
    pub async fn stop(&self) {
        let mut slot = self.job.lock().await;
        if let Some(job) = slot.take() {
            job.shutdown().await;
            tracing::info!("Polling stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.job
            .lock()
            .await
            .as_ref()
            .is_some_and(|job| !job.handle.is_finished())
    }

    pub async fn liveness(&self, channel: &ChannelId) -> LivenessState {
        self.ctx.store.lock().await.get(channel)
    }

    /// `(total, live)` channel counts.
    pub async fn counts(&self) -> (usize, usize) {
        let store = self.ctx.store.lock().await;
        (store.len(), store.live_count())
    }
}

async fn poll_loop<F, P, N>(
    ctx: Arc<PollContext<F, P, N>>,
    channels: Arc<[ChannelId]>,
    period: Duration,
    cancel: CancellationToken,
) where
    F: Fetcher,
    P: ResponseParser,
    N: NotificationSink,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        run_once(
            &channels,
            &ctx.store,
            &ctx.fetcher,
            &ctx.parser,
            &ctx.sink,
            ctx.max_concurrent,
        )
        .await;
    }

    tracing::debug!("Poll loop stopped");
}
