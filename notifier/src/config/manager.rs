//! SettingsManager: environment-backed settings with defaults and feature status.

use std::collections::HashMap;

use super::defaults::{self, DEFAULT_SETTINGS};
use super::validation::validate_setting;
use super::{FeatureStatus, SettingInfo};

/// Resolves settings from captured values, falling back to defaults.
#[derive(Debug, Clone, Default)]
pub struct SettingsManager {
    values: HashMap<String, String>,
}

impl SettingsManager {
    /// Capture every known setting present in the process environment.
    pub fn from_env() -> Self {
        let values = defaults::keys()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();
        Self { values }
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Get a setting value. Falls back to the default when unset or invalid.
    pub fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        let default = DEFAULT_SETTINGS
            .get(key)
            .map(|d| d.default)
            .ok_or_else(|| anyhow::anyhow!("unknown setting key: {key}"))?;

        let Some(value) = self.values.get(key).map(|v| v.trim()) else {
            return Ok(default.to_string());
        };

        if let Err(e) = validate_setting(key, value) {
            tracing::warn!("Invalid value for {key} ({e}), using default {default:?}");
            return Ok(default.to_string());
        }
        Ok(value.to_string())
    }

    /// All settings with secrets masked, in declaration order.
    pub fn get_all_settings(&self) -> Vec<SettingInfo> {
        defaults::keys()
            .filter_map(|key| DEFAULT_SETTINGS.get(key))
            .map(|def| {
                let value = self.get_setting(def.key).unwrap_or_default();
                let has_value = !value.is_empty();
                let shown = if def.secret { mask(&value) } else { value };
                SettingInfo {
                    key: def.key.to_string(),
                    value: shown,
                    description: def.description.to_string(),
                    has_value,
                }
            })
            .collect()
    }

    /// Check which optional features are configured.
    pub fn check_feature_status(&self) -> FeatureStatus {
        let g = |key: &str| self.get_setting(key).unwrap_or_default();
        let mut status = FeatureStatus {
            auth_configured: true,
            notifications_enabled: g("NOTIFICATION_ENABLED") == "true",
            ..FeatureStatus::default()
        };

        for key in ["CLIENT_ID", "OAUTH_TOKEN"] {
            if g(key).is_empty() {
                status.missing_settings.push(key.to_string());
                status.auth_configured = false;
            }
        }

        if g("API_FLAVOR").eq_ignore_ascii_case("helix") && !status.auth_configured {
            status
                .warnings
                .push("API_FLAVOR=helix requires CLIENT_ID and OAUTH_TOKEN".into());
        }
        if !status.notifications_enabled {
            status
                .warnings
                .push("NOTIFICATION_ENABLED is false - live events are only logged".into());
        }

        status
    }
}

fn mask(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        "********".into()
    }
}
