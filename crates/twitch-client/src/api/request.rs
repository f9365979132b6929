use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use url::Url;

use super::*;
use crate::TwitchError;

const KRAKEN_ACCEPT: &str = "application/vnd.twitchtv.v5+json";
const USER_AGENT: &str = concat!("stream-notifier/", env!("CARGO_PKG_VERSION"));

impl StreamsClient {
    /// Build a client against the flavor's public endpoint.
    pub fn new(
        flavor: ApiFlavor,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<Self, TwitchError> {
        Self::with_base_url(flavor.default_base(), flavor, credentials, timeout)
    }

    /// Build a client against an explicit base URL (proxies, tests).
    pub fn with_base_url(
        base_url: &str,
        flavor: ApiFlavor,
        credentials: &Credentials,
        timeout: Duration,
    ) -> Result<Self, TwitchError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TwitchError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .default_headers(default_headers(flavor, credentials)?)
            .build()?;

        Ok(Self {
            http,
            base_url,
            flavor,
        })
    }

    /// Execute a GET request and return the body of a successful response.
    pub(super) async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::NonSuccessStatus(status.as_u16()));
        }

        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(body)
    }
}

/// Build the headers attached to every request.
fn default_headers(flavor: ApiFlavor, credentials: &Credentials) -> Result<HeaderMap, TwitchError> {
    let mut headers = HeaderMap::new();

    if flavor == ApiFlavor::Kraken {
        headers.insert(ACCEPT, HeaderValue::from_static(KRAKEN_ACCEPT));
    }

    if let Some(client_id) = non_empty(credentials.client_id.as_deref()) {
        let value =
            HeaderValue::from_str(client_id).map_err(|_| TwitchError::InvalidHeader("Client-Id"))?;
        headers.insert("Client-Id", value);
    }

    if let Some(token) = non_empty(credentials.access_token.as_deref()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| TwitchError::InvalidHeader("Authorization"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
