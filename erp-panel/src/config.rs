//! Panel configuration: file, then environment, then defaults.

use std::path::Path;
use std::time::Duration;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

pub const TOKEN_ENV: &str = "ERP_PANEL_TOKEN";
pub const API_URL_ENV: &str = "ERP_PANEL_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_NOTIFICATION_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Base URL of the backend API.
    pub api_url: String,
    /// Bearer token. Without one, notification calls are skipped.
    pub token: Option<String>,
    /// Unread-count polling period.
    pub poll_interval_secs: u64,
    /// Notifications fetched when the panel opens.
    pub notification_limit: usize,
    pub toast_max_visible: usize,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            notification_limit: DEFAULT_NOTIFICATION_LIMIT,
            toast_max_visible: panelkit::toast::DEFAULT_MAX_VISIBLE,
            log_level: "info".to_string(),
        }
    }
}

impl PanelConfig {
    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Apply `ERP_PANEL_*` overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = lookup(TOKEN_ENV) {
            self.token = Some(token);
        }
        if let Some(url) = lookup(API_URL_ENV) {
            self.api_url = url;
        }
        self
    }

    /// Check every value, failing on the first bad one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_base()?;
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "poll_interval_secs",
                message: "must be positive".to_string(),
            });
        }
        if self.notification_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "notification_limit",
                message: "must be positive".to_string(),
            });
        }
        if self.toast_max_visible == 0 {
            return Err(ConfigError::InvalidValue {
                key: "toast_max_visible",
                message: "must be positive".to_string(),
            });
        }
        self.level()?;
        Ok(())
    }

    pub fn api_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_url).map_err(|_| ConfigError::InvalidUrl(self.api_url.clone()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "log_level",
                message: format!("unknown level '{}'", self.log_level),
            })
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: PanelConfig = toml::from_str("poll_interval_secs = 30").unwrap();
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.notification_limit, DEFAULT_NOTIFICATION_LIMIT);
    }

    #[test]
    fn test_env_overrides() {
        let config = PanelConfig::default().with_overrides(|key| match key {
            TOKEN_ENV => Some("abc".to_string()),
            API_URL_ENV => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
