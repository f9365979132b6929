//! Twitch stream status client.
//!
//! Fetches the raw stream payload for a channel and decodes it into a
//! [`StreamSnapshot`]. Both the legacy Kraken v5 endpoint and Helix are
//! supported; see [`ApiFlavor`].

pub mod api;
pub mod parse;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use api::models::StreamSnapshot;
pub use api::{ApiFlavor, Credentials, Fetcher, StreamsClient};
pub use parse::{ResponseParser, parse_helix_response, parse_stream_response};

/// Twitch channel login, used as the polling key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ChannelId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Failure to obtain a response body for a channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out")]
    Timeout,

    #[error("Twitch API returned status {0}")]
    NonSuccessStatus(u16),

    #[error("empty response body")]
    EmptyBody,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::NetworkUnreachable(e.to_string())
        }
    }
}

/// Failure to decode a response body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

/// Errors raised while building a [`StreamsClient`].
#[derive(Debug, thiserror::Error)]
pub enum TwitchError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("base URL cannot carry a path: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}
