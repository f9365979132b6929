//! Twitch stream status REST client.
//!
//! Issues one GET per channel with optional Client-Id + Bearer token
//! header injection. The client never retries; callers poll again later.

mod request;
mod streams;

pub mod models;

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ChannelId, FetchError};

pub const KRAKEN_BASE: &str = "https://api.twitch.tv/kraken";
pub const HELIX_BASE: &str = "https://api.twitch.tv/helix";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which Twitch API generation to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFlavor {
    /// `GET /kraken/streams/{channel}`.
    #[default]
    Kraken,
    /// `GET /helix/streams?user_login={channel}`.
    Helix,
}

impl ApiFlavor {
    pub fn from_str_setting(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "helix" => Self::Helix,
            _ => Self::Kraken,
        }
    }

    pub fn default_base(self) -> &'static str {
        match self {
            Self::Kraken => KRAKEN_BASE,
            Self::Helix => HELIX_BASE,
        }
    }
}

/// Optional authentication sent with every request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub access_token: Option<String>,
}

/// Something that can retrieve the raw stream payload for a channel.
pub trait Fetcher: Send + Sync {
    fn fetch(
        &self,
        channel: &ChannelId,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// HTTP client for the Twitch streams endpoint.
#[derive(Debug, Clone)]
pub struct StreamsClient {
    pub(super) http: reqwest::Client,
    pub(super) base_url: Url,
    pub(super) flavor: ApiFlavor,
}
