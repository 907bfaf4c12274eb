//! Dashboard configuration.
//!
//! Read from `<config dir>/cryptodash/config.json`. Every field has a
//! default, so a partial file is valid. `CRYPTODASH_API_URL` overrides the
//! API base URL.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::notifications::NotificationTimings;

/// Environment variable overriding [`DashboardConfig::api_base_url`]
pub const API_URL_ENV: &str = "CRYPTODASH_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_export_path")]
    pub export_path: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub notifications: NotificationTimings,

    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,

    /// Where downloads are written; the user's download folder when unset
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_export_path() -> String {
    "/api/online/exportar".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_resize_debounce_ms() -> u64 {
    250
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            export_path: default_export_path(),
            request_timeout_secs: default_request_timeout_secs(),
            notifications: NotificationTimings::default(),
            resize_debounce_ms: default_resize_debounce_ms(),
            download_dir: None,
        }
    }
}

impl DashboardConfig {
    /// Loads the config file, falling back to defaults, then applies the
    /// environment override
    pub fn load() -> Self {
        let mut config = Self::load_from(&Self::get_config_path());
        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        config
    }

    /// Loads from `path`; a missing or unparsable file yields defaults
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(config) => config,
            Err(DashboardError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Reads and validates a config file
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the config as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(DashboardError::Config("api_base_url is empty".to_string()));
        }
        if !self.export_path.starts_with('/') {
            return Err(DashboardError::Config(format!(
                "export_path must start with '/': {}",
                self.export_path
            )));
        }
        Ok(())
    }

    fn apply_env_override(&mut self, value: Option<String>) {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            debug!(url = %url, "api base url overridden from environment");
            self.api_base_url = url;
        }
    }

    /// Full export endpoint URL
    pub fn export_url(&self) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), self.export_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("cryptodash");
        path.push("config.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cryptodash-config-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.export_url(), "http://127.0.0.1:5000/api/online/exportar");
        assert_eq!(config.notifications.show_delay_ms, 100);
        assert_eq!(config.notifications.display_ms, 3000);
        assert_eq!(config.notifications.removal_ms, 300);
        assert_eq!(config.resize_debounce(), Duration::from_millis(250));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{"api_base_url": "https://dash.example/", "notifications": {"display_ms": 5000}}"#)
                .unwrap();
        assert_eq!(config.export_url(), "https://dash.example/api/online/exportar");
        assert_eq!(config.notifications.display_ms, 5000);
        assert_eq!(config.notifications.show_delay_ms, 100);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let config = DashboardConfig {
            resize_debounce_ms: 500,
            ..DashboardConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(DashboardConfig::load_from(&path), config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(DashboardConfig::load_from(&path), DashboardConfig::default());
        assert!(DashboardConfig::read(&path).is_err());
        let _ = fs::remove_file(&path);

        assert_eq!(DashboardConfig::load_from(&temp_path("missing")), DashboardConfig::default());
    }

    #[test]
    fn test_validation() {
        let config = DashboardConfig {
            export_path: "api/online/exportar".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_env_override() {
        let mut config = DashboardConfig::default();
        config.apply_env_override(Some("http://10.0.0.2:8080".to_string()));
        assert_eq!(config.export_url(), "http://10.0.0.2:8080/api/online/exportar");

        config.apply_env_override(Some("  ".to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.2:8080");
    }
}
