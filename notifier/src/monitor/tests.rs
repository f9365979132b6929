use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use twitch_client::{ApiFlavor, ChannelId, FetchError, Fetcher};

use super::*;
use crate::channels::StaticChannelList;
use crate::notification::{Notification, Severity};

const LIVE_ALICE: &str = r#"{"stream":{"channel":{"display_name":"Alice","game":"Celeste"}}}"#;
const INTERVAL: Duration = Duration::from_millis(30_000);

pub(crate) fn ids(names: &[&str]) -> Vec<ChannelId> {
    names.iter().map(|n| ChannelId::from(*n)).collect()
}

/// Canned responses per channel; unknown channels are offline.
#[derive(Clone, Default)]
pub(crate) struct FakeFetcher {
    responses: Arc<Mutex<HashMap<ChannelId, Result<String, FetchError>>>>,
    calls: Arc<Mutex<Vec<ChannelId>>>,
    delay: Option<Duration>,
}

impl FakeFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, channel: &str, response: Result<&str, FetchError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(channel.into(), response.map(str::to_string));
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls_for(&self, channel: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == channel)
            .count()
    }
}

impl Fetcher for FakeFetcher {
    async fn fetch(&self, channel: &ChannelId) -> Result<String, FetchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(channel.clone());
        let response = self.responses.lock().unwrap().get(channel).cloned();
        response.unwrap_or_else(|| Ok("{}".to_string()))
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    shown: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub(crate) fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn display(&self, title: &str, body: &str, severity: Severity) {
        self.shown
            .lock()
            .unwrap()
            .push(Notification::new(title, body, severity));
    }
}

fn scheduler(
    fetcher: &FakeFetcher,
    sink: &RecordingSink,
) -> Scheduler<FakeFetcher, ApiFlavor, RecordingSink> {
    Scheduler::new(fetcher.clone(), ApiFlavor::Kraken, sink.clone(), INTERVAL, 4)
}

/// Let spawned poll jobs run until they are idle again.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn live_channel_is_skipped_on_later_ticks() {
    let fetcher = FakeFetcher::new()
        .respond("alice", Ok(LIVE_ALICE))
        .respond("bob", Ok("{}"));
    let sink = RecordingSink::default();
    let scheduler = scheduler(&fetcher, &sink);

    scheduler.start(ids(&["alice", "bob"])).await;
    settle().await;

    assert_eq!(fetcher.calls_for("alice"), 1);
    assert_eq!(fetcher.calls_for("bob"), 1);
    assert_eq!(scheduler.liveness(&"alice".into()).await, LivenessState::Live);
    assert_eq!(scheduler.liveness(&"bob".into()).await, LivenessState::NotLive);

    let shown = sink.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].title, "Stream Live");
    assert_eq!(shown[0].body, r#"Alice is live and playing "Celeste""#);

    tokio::time::sleep(INTERVAL).await;

    assert_eq!(fetcher.calls_for("alice"), 1);
    assert_eq!(fetcher.calls_for("bob"), 2);
    assert_eq!(sink.shown().len(), 1);
    assert_eq!(scheduler.counts().await, (2, 1));

    scheduler.stop().await;
}

#[tokio::test(start_paused = true)]
async fn starting_twice_leaves_a_single_schedule() {
    let fetcher = FakeFetcher::new();
    let sink = RecordingSink::default();
    let scheduler = scheduler(&fetcher, &sink);

    scheduler.start(ids(&["bob"])).await;
    scheduler.start(ids(&["bob"])).await;
    settle().await;
    let after_start = fetcher.calls_for("bob");

    tokio::time::sleep(INTERVAL).await;
    assert_eq!(fetcher.calls_for("bob"), after_start + 1);

    tokio::time::sleep(INTERVAL).await;
    assert_eq!(fetcher.calls_for("bob"), after_start + 2);

    scheduler.stop().await;
}

#[tokio::test(start_paused = true)]
async fn reload_makes_live_channels_notify_again() {
    let fetcher = FakeFetcher::new().respond("alice", Ok(LIVE_ALICE));
    let sink = RecordingSink::default();
    let scheduler = scheduler(&fetcher, &sink);

    scheduler.start(ids(&["alice"])).await;
    settle().await;
    assert_eq!(sink.shown().len(), 1);

    scheduler.reload(ids(&["alice"])).await;
    settle().await;

    assert_eq!(fetcher.calls_for("alice"), 2);
    assert_eq!(sink.shown().len(), 2);
    assert_eq!(scheduler.liveness(&"alice".into()).await, LivenessState::Live);

    scheduler.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_future_ticks() {
    let fetcher = FakeFetcher::new();
    let sink = RecordingSink::default();
    let scheduler = scheduler(&fetcher, &sink);

    scheduler.start(ids(&["bob"])).await;
    settle().await;
    assert!(scheduler.is_running().await);

    scheduler.stop().await;
    assert!(!scheduler.is_running().await);

    tokio::time::sleep(INTERVAL * 3).await;
    assert_eq!(fetcher.calls_for("bob"), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_lets_in_flight_cycle_finish() {
    let fetcher = FakeFetcher::new()
        .respond("alice", Ok(LIVE_ALICE))
        .with_delay(Duration::from_secs(5));
    let sink = RecordingSink::default();
    let scheduler = scheduler(&fetcher, &sink);

    scheduler.start(ids(&["alice"])).await;
    settle().await;
    assert_eq!(fetcher.calls_for("alice"), 0);

    scheduler.stop().await;

    assert_eq!(fetcher.calls_for("alice"), 1);
    assert_eq!(scheduler.liveness(&"alice".into()).await, LivenessState::Live);
    assert_eq!(sink.shown().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn reload_waits_for_in_flight_cycle_before_resetting() {
    let fetcher = FakeFetcher::new()
        .respond("alice", Ok(LIVE_ALICE))
        .with_delay(Duration::from_secs(5));
    let sink = RecordingSink::default();
    let scheduler = scheduler(&fetcher, &sink);

    scheduler.start(ids(&["alice"])).await;
    settle().await;

    scheduler.reload(ids(&["bob"])).await;

    // The old cycle finished before the swap, so its write landed in the
    // store that was then replaced.
    assert_eq!(sink.shown().len(), 1);
    assert_eq!(scheduler.liveness(&"alice".into()).await, LivenessState::NotLive);
    assert_eq!(scheduler.counts().await, (1, 0));

    scheduler.stop().await;
}

struct ToggleSource {
    channels: Vec<ChannelId>,
    fail: AtomicBool,
}

impl ChannelSource for ToggleSource {
    fn load_channel_ids(&self) -> Result<Vec<ChannelId>, SourceUnavailable> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SourceUnavailable {
                source_name: "toggle".into(),
                reason: "switched off".into(),
            });
        }
        Ok(self.channels.clone())
    }
}

#[tokio::test(start_paused = true)]
async fn monitor_start_polls_loaded_channels() {
    let fetcher = FakeFetcher::new().respond("alice", Ok(LIVE_ALICE));
    let sink = RecordingSink::default();
    let monitor = LiveMonitor::new(
        StaticChannelList(ids(&["alice", "bob"])),
        scheduler(&fetcher, &sink),
    );

    assert_eq!(monitor.start().await.unwrap(), 2);
    settle().await;

    assert!(monitor.is_running().await);
    assert_eq!(monitor.liveness(&"alice".into()).await, LivenessState::Live);
    assert_eq!(sink.shown().len(), 1);

    monitor.stop().await;
    assert!(!monitor.is_running().await);
}

#[tokio::test(start_paused = true)]
async fn monitor_start_reports_unavailable_source() {
    let fetcher = FakeFetcher::new();
    let sink = RecordingSink::default();
    let source = ToggleSource {
        channels: ids(&["alice"]),
        fail: AtomicBool::new(true),
    };
    let monitor = LiveMonitor::new(source, scheduler(&fetcher, &sink));

    assert!(monitor.start().await.is_err());
    assert!(!monitor.is_running().await);
    assert_eq!(fetcher.calls_for("alice"), 0);
}

#[tokio::test(start_paused = true)]
async fn monitor_reload_failure_keeps_previous_schedule() {
    let fetcher = FakeFetcher::new().respond("alice", Ok(LIVE_ALICE));
    let sink = RecordingSink::default();
    let source = ToggleSource {
        channels: ids(&["alice"]),
        fail: AtomicBool::new(false),
    };
    let monitor = LiveMonitor::new(source, scheduler(&fetcher, &sink));

    monitor.start().await.unwrap();
    settle().await;

    monitor.source.fail.store(true, Ordering::SeqCst);
    assert!(monitor.reload().await.is_err());

    assert!(monitor.is_running().await);
    assert_eq!(monitor.liveness(&"alice".into()).await, LivenessState::Live);
    assert_eq!(sink.shown().len(), 1);

    monitor.stop().await;
}
