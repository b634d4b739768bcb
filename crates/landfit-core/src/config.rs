//! Application configuration management.
//!
//! Configuration is read from `~/.config/landfit/config.json`. Every field
//! is optional in the file; missing fields take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "landfit";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Ranked land area table of the World Factbook
pub const DEFAULT_SOURCE_URL: &str =
    "https://www.cia.gov/the-world-factbook/field/area/country-comparison/";

/// HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Used when the platform has no cache directory
const FALLBACK_CACHE_DIR: &str = "./cache";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    pub request_timeout_secs: u64,
    pub cache_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cache_dir: None,
        }
    }
}

impl Config {
    /// Load the user's config, falling back to defaults when it is missing
    /// or unusable.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|contents| serde_json::from_str::<Config>(&contents).map_err(|e| e.to_string()));

        match parsed {
            Ok(config) => {
                debug!(path = %path.display(), "Config loaded");
                config
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_dir(&self) -> PathBuf {
        if let Some(ref dir) = self.cache_dir {
            return dir.clone();
        }
        dirs::cache_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_DIR))
    }
}
