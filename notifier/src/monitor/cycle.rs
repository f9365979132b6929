//! One pass over every channel that has not gone live yet.

use futures_util::StreamExt;
use futures_util::stream;
use tokio::sync::Mutex;
use twitch_client::{ChannelId, Fetcher, ResponseParser, StreamSnapshot};

use super::liveness::LivenessStore;
use crate::notification::{NotificationSink, Severity};

pub const LIVE_TITLE: &str = "Stream Live";

/// Counters for a finished cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub checked: usize,
    pub skipped: usize,
    pub went_live: usize,
    pub offline: usize,
    pub failed: usize,
}

/// Notification body for a live snapshot.
pub fn format_message(snapshot: &StreamSnapshot) -> String {
    format!(
        "{} is live and playing \"{}\"",
        snapshot.display_name.as_deref().unwrap_or_default(),
        snapshot.game.as_deref().unwrap_or_default()
    )
}

enum Outcome {
    Live(StreamSnapshot),
    Offline,
    Failed,
}

/// Check every non-live channel once and notify on live transitions.
///
/// Fetches run with at most `max_concurrent` requests in flight; store
/// updates happen one channel at a time. A failing channel never stops
/// the others.
pub async fn run_once<F, P, N>(
    channels: &[ChannelId],
    store: &Mutex<LivenessStore>,
    fetcher: &F,
    parser: &P,
    sink: &N,
    max_concurrent: usize,
) -> CycleReport
where
    F: Fetcher,
    P: ResponseParser,
    N: NotificationSink,
{
    let mut report = CycleReport::default();

    let pending = store.lock().await.pending(channels);
    report.skipped = channels.len() - pending.len();

    let mut checks = stream::iter(pending)
        .map(move |channel| check_channel(channel, fetcher, parser))
        .buffer_unordered(max_concurrent.max(1));

    while let Some((channel, outcome)) = checks.next().await {
        report.checked += 1;
        match outcome {
            Outcome::Live(snapshot) => {
                let transitioned = store.lock().await.set_live(&channel);
                if transitioned {
                    tracing::info!(
                        channel = %channel,
                        game = snapshot.game.as_deref().unwrap_or_default(),
                        viewers = snapshot.viewer_count,
                        "Channel went live"
                    );
                    sink.display(LIVE_TITLE, &format_message(&snapshot), Severity::Info);
                    report.went_live += 1;
                }
            }
            Outcome::Offline => report.offline += 1,
            Outcome::Failed => report.failed += 1,
        }
    }

    tracing::debug!(
        checked = report.checked,
        skipped = report.skipped,
        went_live = report.went_live,
        offline = report.offline,
        failed = report.failed,
        "Poll cycle finished"
    );
    report
}

async fn check_channel<F, P>(channel: ChannelId, fetcher: &F, parser: &P) -> (ChannelId, Outcome)
where
    F: Fetcher,
    P: ResponseParser,
{
    let body = match fetcher.fetch(&channel).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(channel = %channel, error = %e, "Stream fetch failed");
            return (channel, Outcome::Failed);
        }
    };

    let outcome = match parser.parse(&channel, &body) {
        Ok(Some(snapshot)) if snapshot.is_live => Outcome::Live(snapshot),
        Ok(_) => Outcome::Offline,
        Err(e) => {
            tracing::warn!(channel = %channel, error = %e, "Stream response could not be parsed");
            Outcome::Failed
        }
    };
    (channel, outcome)
}

#[cfg(test)]
mod tests {
    use twitch_client::{ApiFlavor, FetchError};

    use super::*;
    use crate::monitor::tests::{FakeFetcher, RecordingSink, ids};

    const LIVE_FOO: &str = r#"{"stream":{"channel":{"display_name":"Foo","game":"Bar"}}}"#;

    async fn store_with(names: &[&str]) -> Mutex<LivenessStore> {
        let mut store = LivenessStore::new();
        store.initialize(&ids(names));
        Mutex::new(store)
    }

    #[test]
    fn format_message_is_exact() {
        let snapshot = StreamSnapshot {
            channel: "foo".into(),
            is_live: true,
            display_name: Some("Foo".into()),
            game: Some("Bar".into()),
            title: None,
            viewer_count: None,
        };
        assert_eq!(format_message(&snapshot), r#"Foo is live and playing "Bar""#);
    }

    #[test]
    fn format_message_uses_empty_strings_for_missing_fields() {
        let snapshot = StreamSnapshot {
            channel: "foo".into(),
            is_live: true,
            display_name: None,
            game: None,
            title: None,
            viewer_count: None,
        };
        assert_eq!(format_message(&snapshot), r#" is live and playing """#);
    }

    #[tokio::test]
    async fn live_channel_notifies_once_and_is_then_skipped() {
        let fetcher = FakeFetcher::new().respond("alice", Ok(LIVE_FOO));
        let sink = RecordingSink::default();
        let store = store_with(&["alice"]).await;
        let channels = ids(&["alice"]);

        let first = run_once(&channels, &store, &fetcher, &ApiFlavor::Kraken, &sink, 4).await;
        let second = run_once(&channels, &store, &fetcher, &ApiFlavor::Kraken, &sink, 4).await;

        assert_eq!(first.went_live, 1);
        assert_eq!(second.skipped, 1);
        assert_eq!(second.checked, 0);
        assert_eq!(fetcher.calls_for("alice"), 1);
        assert!(store.lock().await.is_live(&"alice".into()));

        let shown = sink.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Stream Live");
        assert_eq!(shown[0].body, r#"Foo is live and playing "Bar""#);
        assert_eq!(shown[0].severity, Severity::Info);
    }

    #[tokio::test]
    async fn offline_channel_stays_not_live() {
        let fetcher = FakeFetcher::new().respond("bob", Ok("{}"));
        let sink = RecordingSink::default();
        let store = store_with(&["bob"]).await;

        let report = run_once(&ids(&["bob"]), &store, &fetcher, &ApiFlavor::Kraken, &sink, 4).await;

        assert_eq!(report.offline, 1);
        assert!(!store.lock().await.is_live(&"bob".into()));
        assert!(sink.shown().is_empty());
    }

    #[tokio::test]
    async fn malformed_channel_does_not_block_healthy_one() {
        let fetcher = FakeFetcher::new()
            .respond("alice", Ok("not json"))
            .respond("bob", Ok(LIVE_FOO));
        let sink = RecordingSink::default();
        let store = store_with(&["alice", "bob"]).await;

        let report = run_once(
            &ids(&["alice", "bob"]),
            &store,
            &fetcher,
            &ApiFlavor::Kraken,
            &sink,
            1,
        )
        .await;

        assert_eq!(report.failed, 1);
        assert_eq!(report.went_live, 1);
        assert_eq!(sink.shown().len(), 1);
        let store = store.lock().await;
        assert!(!store.is_live(&"alice".into()));
        assert!(store.is_live(&"bob".into()));
    }

    #[tokio::test]
    async fn fetch_errors_are_retried_next_cycle() {
        let fetcher = FakeFetcher::new().respond("alice", Err(FetchError::Timeout));
        let sink = RecordingSink::default();
        let store = store_with(&["alice"]).await;
        let channels = ids(&["alice"]);

        run_once(&channels, &store, &fetcher, &ApiFlavor::Kraken, &sink, 4).await;
        let report = run_once(&channels, &store, &fetcher, &ApiFlavor::Kraken, &sink, 4).await;

        assert_eq!(report.failed, 1);
        assert_eq!(fetcher.calls_for("alice"), 2);
        assert!(sink.shown().is_empty());
    }

    #[tokio::test]
    async fn empty_channel_list_is_a_no_op() {
        let fetcher = FakeFetcher::new();
        let sink = RecordingSink::default();
        let store = store_with(&[]).await;

        let report = run_once(&[], &store, &fetcher, &ApiFlavor::Kraken, &sink, 4).await;
        assert_eq!(report, CycleReport::default());
    }
}
