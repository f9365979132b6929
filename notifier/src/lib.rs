//! Twitch live stream notifier.
//!
//! Polls a configured list of channels and shows a desktop notification
//! the first time each one goes live.

pub mod channels;
pub mod config;
pub mod monitor;
pub mod notification;
pub mod shutdown;

use std::path::PathBuf;

use anyhow::Context;
use futures_util::{Stream, StreamExt};
use tokio::task::JoinHandle;
use twitch_client::{ApiFlavor, Fetcher, ResponseParser, StreamsClient};

use channels::{ChannelSource, FileChannelList};
use config::{AppConfig, SettingsManager};
use monitor::{LiveMonitor, Scheduler};
use notification::{DesktopNotifier, LogNotifier, NotificationQueue, NotificationSink};

const APP_NAME: &str = "Stream Notifier";

/// The monitor as wired by the binary.
pub type AppMonitor = LiveMonitor<FileChannelList, StreamsClient, ApiFlavor, NotificationQueue>;

/// Determine the data directory for the application.
/// Priority: STREAM_NOTIFIER_DATA_DIR env var > ~/.stream-notifier
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STREAM_NOTIFIER_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".stream-notifier")
}

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load .env, resolve settings and report configuration problems.
pub fn init_foundation() -> Result<(AppConfig, PathBuf), anyhow::Error> {
    load_dotenv();

    let sm = SettingsManager::from_env();
    let config = AppConfig::load(&sm)?;

    tracing::info!("Settings:");
    for setting in sm.get_all_settings() {
        tracing::info!("  {setting}");
    }

    let status = sm.check_feature_status();
    tracing::info!(
        auth_configured = status.auth_configured,
        notifications_enabled = status.notifications_enabled,
        "Feature status"
    );
    if !status.warnings.is_empty() {
        tracing::warn!(
            "Missing settings: {:?}, warnings: {:?}",
            status.missing_settings,
            status.warnings
        );
    }

    let dir = data_dir();
    tracing::info!(
        flavor = ?config.api_flavor,
        interval_ms = config.poll_interval.as_millis() as u64,
        "Settings loaded"
    );
    Ok((config, dir))
}

/// Build the HTTP client, notification queue and monitor from config.
pub fn build_monitor(
    config: &AppConfig,
    data_dir: &std::path::Path,
) -> Result<(AppMonitor, NotificationQueue, JoinHandle<()>), anyhow::Error> {
    let client = StreamsClient::with_base_url(
        config.base_url(),
        config.api_flavor,
        &config.credentials(),
        config.request_timeout,
    )
    .context("failed to build Twitch client")?;

    let (queue, worker) = if config.notification_enabled {
        NotificationQueue::start(DesktopNotifier::new(APP_NAME, config.notification_timeout))
    } else {
        NotificationQueue::start(LogNotifier)
    };

    let scheduler = Scheduler::new(
        client,
        config.api_flavor,
        queue.clone(),
        config.poll_interval,
        config.max_concurrent_fetches,
    );
    let monitor = LiveMonitor::new(
        FileChannelList::new(&config.channels_file).with_data_dir(data_dir),
        scheduler,
    );

    Ok((monitor, queue, worker))
}

/// Run until Ctrl+C. On Unix, SIGHUP reloads the channel list.
pub async fn run() -> Result<(), anyhow::Error> {
    let (config, dir) = init_foundation()?;
    let (monitor, queue, worker) = build_monitor(&config, &dir)?;

    let count = monitor
        .start()
        .await
        .context("cannot start without a channel list (one channel login per line)")?;
    tracing::info!(channels = count, "Stream notifier running. Press Ctrl+C to stop.");

    wait_for_exit(&monitor).await?;
    tracing::info!("Shutting down...");

    shutdown::graceful_shutdown(&monitor, &queue, worker).await;
    Ok(())
}

#[cfg(unix)]
async fn wait_for_exit(monitor: &AppMonitor) -> Result<(), anyhow::Error> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = signal(SignalKind::hangup())?;
    let hangups = futures_util::stream::poll_fn(move |cx| hangup.poll_recv(cx));
    serve_until_exit(monitor, tokio::signal::ctrl_c(), hangups).await
}

#[cfg(not(unix))]
async fn wait_for_exit(monitor: &AppMonitor) -> Result<(), anyhow::Error> {
    serve_until_exit(
        monitor,
        tokio::signal::ctrl_c(),
        futures_util::stream::pending(),
    )
    .await
}

/// Reload on every `reloads` item until `exit` resolves.
///
/// `exit` is polled across iterations, so an exit request that arrives
/// while a reload is running is still seen.
async fn serve_until_exit<C, F, P, N>(
    monitor: &LiveMonitor<C, F, P, N>,
    exit: impl Future<Output = std::io::Result<()>>,
    mut reloads: impl Stream<Item = ()> + Unpin,
) -> Result<(), anyhow::Error>
where
    C: ChannelSource,
    F: Fetcher + 'static,
    P: ResponseParser + 'static,
    N: NotificationSink + 'static,
{
    tokio::pin!(exit);
    loop {
        tokio::select! {
            res = &mut exit => return res.map_err(Into::into),
            Some(()) = reloads.next() => {
                tracing::info!("Reload requested, reloading channel list");
                // Failures are logged by the monitor; the old list stays active.
                let _ = monitor.reload().await;
            }
        }
    }
}
