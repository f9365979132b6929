//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// (key, default, secret, description)
type DefTuple = (&'static str, &'static str, bool, &'static str);

const DEFS: &[DefTuple] = &[
    ("POLL_INTERVAL_MS", "30000", false, "Milliseconds between poll cycles"),
    ("REQUEST_TIMEOUT_SECS", "10", false, "Timeout for a single stream request"),
    ("MAX_CONCURRENT_FETCHES", "4", false, "Stream requests in flight per cycle"),
    ("CHANNELS_FILE", "streams.txt", false, "Text file with one channel per line"),
    ("API_FLAVOR", "kraken", false, "Twitch API generation: kraken or helix"),
    ("API_BASE_URL", "", false, "Override for the API base URL"),
    ("CLIENT_ID", "", false, "Twitch application Client-Id"),
    ("OAUTH_TOKEN", "", true, "Bearer token sent with every request"),
    ("NOTIFICATION_ENABLED", "true", false, "Show desktop notifications"),
    ("NOTIFICATION_TIMEOUT_SECS", "5", false, "Desktop notification display time"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub secret: bool,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, secret, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    secret,
                    description,
                },
            )
        })
        .collect()
});

/// Setting keys in declaration order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    DEFS.iter().map(|&(key, ..)| key)
}
