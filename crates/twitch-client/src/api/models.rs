use serde::{Deserialize, Serialize};

use crate::ChannelId;

/// Decoded live status of one channel at poll time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamSnapshot {
    pub channel: ChannelId,
    pub is_live: bool,
    pub display_name: Option<String>,
    pub game: Option<String>,
    pub title: Option<String>,
    pub viewer_count: Option<u64>,
}

/// Response from GET /kraken/streams/{channel}.
///
/// `stream` is null (or missing) while the channel is offline.
#[derive(Debug, Deserialize)]
pub struct KrakenStreamResponse {
    #[serde(default)]
    pub stream: Option<KrakenStream>,
}

#[derive(Debug, Deserialize)]
pub struct KrakenStream {
    pub channel: KrakenChannel,
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub viewers: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct KrakenChannel {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub game: Option<String>,
    /// Stream title.
    #[serde(default)]
    pub status: Option<String>,
}

/// Wrapper for Twitch Helix list responses.
#[derive(Debug, Deserialize)]
pub struct HelixResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Stream entry from GET /helix/streams.
#[derive(Debug, Deserialize)]
pub struct HelixStream {
    pub user_login: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub viewer_count: Option<u64>,
    #[serde(rename = "type", default)]
    pub stream_type: Option<String>,
}
