//! Configuration management: defaults, validation, loading from the environment.

pub mod app_config;
pub mod defaults;
pub mod manager;
pub mod validation;

pub use app_config::AppConfig;
pub use manager::SettingsManager;

use std::fmt;

/// A resolved setting, as shown in the startup summary.
///
/// Secret values are already masked.
#[derive(Debug, Clone)]
pub struct SettingInfo {
    pub key: String,
    pub value: String,
    pub description: String,
    pub has_value: bool,
}

impl fmt::Display for SettingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_value {
            write!(f, "{} = {}", self.key, self.value)?;
        } else {
            write!(f, "{} (unset)", self.key)?;
        }
        write!(f, "  # {}", self.description)
    }
}

/// Feature availability status.
#[derive(Debug, Clone, Default)]
pub struct FeatureStatus {
    pub auth_configured: bool,
    pub notifications_enabled: bool,
    pub missing_settings: Vec<String>,
    pub warnings: Vec<String>,
}
