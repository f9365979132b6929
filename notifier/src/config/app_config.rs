//! Runtime application configuration loaded from the environment.

use std::path::PathBuf;
use std::time::Duration;

use twitch_client::{ApiFlavor, Credentials};

use super::manager::SettingsManager;

/// Runtime configuration resolved from settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub max_concurrent_fetches: usize,
    pub channels_file: PathBuf,
    pub api_flavor: ApiFlavor,
    pub api_base_url: Option<String>,
    pub client_id: String,
    pub oauth_token: String,
    pub notification_enabled: bool,
    pub notification_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(30_000),
            request_timeout: Duration::from_secs(10),
            max_concurrent_fetches: 4,
            channels_file: PathBuf::from("streams.txt"),
            api_flavor: ApiFlavor::Kraken,
            api_base_url: None,
            client_id: String::new(),
            oauth_token: String::new(),
            notification_enabled: true,
            notification_timeout: Duration::from_secs(5),
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings manager.
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> String { sm.get_setting(key).unwrap_or_default() };

        let base_url = g("API_BASE_URL");

        Ok(Self {
            poll_interval: Duration::from_millis(parse_u64(&g("POLL_INTERVAL_MS"), 30_000)),
            request_timeout: Duration::from_secs(parse_u64(&g("REQUEST_TIMEOUT_SECS"), 10)),
            max_concurrent_fetches: parse_u64(&g("MAX_CONCURRENT_FETCHES"), 4) as usize,
            channels_file: PathBuf::from(g("CHANNELS_FILE")),
            api_flavor: ApiFlavor::from_str_setting(&g("API_FLAVOR")),
            api_base_url: if base_url.is_empty() { None } else { Some(base_url) },
            client_id: g("CLIENT_ID"),
            oauth_token: g("OAUTH_TOKEN"),
            notification_enabled: g("NOTIFICATION_ENABLED") == "true",
            notification_timeout: Duration::from_secs(parse_u64(
                &g("NOTIFICATION_TIMEOUT_SECS"),
                5,
            )),
        })
    }

    pub fn credentials(&self) -> Credentials {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Credentials {
            client_id: opt(&self.client_id),
            access_token: opt(&self.oauth_token),
        }
    }

    /// Base URL to poll, honoring the override.
    pub fn base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or_else(|| self.api_flavor.default_base())
    }
}

fn parse_u64(s: &str, default: u64) -> u64 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
