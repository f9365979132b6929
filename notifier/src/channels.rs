//! Channel list providers.
//!
//! The default provider reads a plain text file with one channel login
//! per line, like `streams.txt` next to the application.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use twitch_client::ChannelId;

static RE_TWITCH_LOGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]{1,25}$").expect("valid login regex"));

/// The channel list could not be loaded.
#[derive(Debug, thiserror::Error)]
#[error("channel list unavailable ({source_name}): {reason}")]
pub struct SourceUnavailable {
    pub source_name: String,
    pub reason: String,
}

/// Supplies the ordered set of channels to poll.
pub trait ChannelSource: Send + Sync {
    fn load_channel_ids(&self) -> Result<Vec<ChannelId>, SourceUnavailable>;
}

/// Reads channels from a text file on every load.
#[derive(Debug, Clone)]
pub struct FileChannelList {
    path: PathBuf,
    data_dir: Option<PathBuf>,
}

impl FileChannelList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            data_dir: None,
        }
    }

    /// Also look for a relative path inside `data_dir`.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }
}

impl ChannelSource for FileChannelList {
    fn load_channel_ids(&self) -> Result<Vec<ChannelId>, SourceUnavailable> {
        let path = match &self.data_dir {
            Some(dir) => resolve_channels_path(&self.path, dir),
            None => self.path.clone(),
        };
        let text = std::fs::read_to_string(&path).map_err(|e| SourceUnavailable {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let channels = parse_channel_list(&text);
        tracing::info!(
            path = %path.display(),
            count = channels.len(),
            "Loaded channel list"
        );
        Ok(channels)
    }
}

/// Fixed channel list, mostly for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticChannelList(pub Vec<ChannelId>);

impl ChannelSource for StaticChannelList {
    fn load_channel_ids(&self) -> Result<Vec<ChannelId>, SourceUnavailable> {
        Ok(self.0.clone())
    }
}

/// One login per line; blank lines and `#` comments are skipped.
///
/// Logins are lower-cased and de-duplicated keeping the first occurrence.
pub fn parse_channel_list(text: &str) -> Vec<ChannelId> {
    let mut seen = HashSet::new();
    let mut channels = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let login = line.to_lowercase();
        if !RE_TWITCH_LOGIN.is_match(&login) {
            tracing::warn!(channel = %login, "Channel name does not look like a Twitch login");
        }
        if seen.insert(login.clone()) {
            channels.push(ChannelId::from(login));
        }
    }

    channels
}

/// Resolve a relative channel file against the working directory, then
/// the data directory.
fn resolve_channels_path(configured: &Path, data_dir: &Path) -> PathBuf {
    if configured.is_absolute() || configured.exists() {
        return configured.to_path_buf();
    }
    let in_data_dir = data_dir.join(configured);
    if in_data_dir.exists() {
        return in_data_dir;
    }
    configured.to_path_buf()
}
