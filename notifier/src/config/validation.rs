//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").unwrap());
static RE_CLIENT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{1,64}$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "POLL_INTERVAL_MS" => validate_int_range(value, 1_000, 86_400_000)?,
        "REQUEST_TIMEOUT_SECS" => validate_int_range(value, 1, 120)?,
        "MAX_CONCURRENT_FETCHES" => validate_int_range(value, 1, 32)?,
        "NOTIFICATION_TIMEOUT_SECS" => validate_int_range(value, 1, 60)?,
        "CHANNELS_FILE" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        "API_FLAVOR" => {
            if !value.eq_ignore_ascii_case("kraken") && !value.eq_ignore_ascii_case("helix") {
                return Err("must be 'kraken' or 'helix'".into());
            }
        }
        "API_BASE_URL" => {
            if !value.is_empty() && !RE_HTTP_URL.is_match(value) {
                return Err("must be an http(s) URL".into());
            }
        }
        "CLIENT_ID" => {
            if !value.is_empty() && !RE_CLIENT_ID.is_match(value) {
                return Err("must be alphanumeric".into());
            }
        }
        "OAUTH_TOKEN" => {
            if value.chars().any(char::is_whitespace) {
                return Err("must not contain whitespace".into());
            }
        }
        "NOTIFICATION_ENABLED" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
