//! Client configuration.
//!
//! Loaded from `~/.config/lore/config.toml` when present, then overridden
//! by environment variables. Missing file and missing keys fall back to
//! defaults; a malformed file is an error rather than a silent fallback.

use lore_core::error::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the backend and persistence-store endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the answer/ingestion backend.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base URL of the persistence store; defaults to `api_url`.
    #[serde(default)]
    pub history_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            history_url: None,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default config file location, then
    /// applies environment overrides (`LORE_API_URL`, `LORE_HISTORY_URL`,
    /// `LORE_TIMEOUT_SECS`).
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Reads configuration from a specific TOML file.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// `~/.config/lore/config.toml` (platform equivalent via `dirs`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lore").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("LORE_API_URL") {
            self.api_url = url;
        }
        if let Ok(url) = env::var("LORE_HISTORY_URL") {
            self.history_url = Some(url);
        }
        if let Ok(raw) = env::var("LORE_TIMEOUT_SECS")
            && let Ok(secs) = raw.parse()
        {
            self.request_timeout_secs = secs;
        }
    }

    /// The persistence-store base URL, falling back to the backend URL.
    pub fn history_url(&self) -> &str {
        self.history_url.as_deref().unwrap_or(&self.api_url)
    }

    /// The per-request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.history_url(), "http://localhost:8000");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml_str("api_url = \"https://assistant.example.com\"").unwrap();
        assert_eq!(config.api_url, "https://assistant.example.com");
        assert_eq!(config.history_url(), "https://assistant.example.com");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_separate_history_url() {
        let config = ClientConfig::from_toml_str(
            "api_url = \"https://a.example.com\"\nhistory_url = \"https://h.example.com\"\nrequest_timeout_secs = 5",
        )
        .unwrap();
        assert_eq!(config.history_url(), "https://h.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(ClientConfig::from_toml_str("api_url = [").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"https://assistant.example.com\"").unwrap();

        let config = ClientConfig::load_from_path(&path).unwrap();
        assert_eq!(config.api_url, "https://assistant.example.com");

        assert!(ClientConfig::load_from_path(&dir.path().join("missing.toml")).is_err());
    }
}
