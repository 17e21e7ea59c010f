//! Runtime configuration and on-disk locations.
//!
//! Settings live in `<config_dir>/clipstash/config.json` next to the history
//! file and image blobs; every field has a default so the file is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default capacity of the history store
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// Default clipboard poll interval
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

const CONFIG_FILE: &str = "config.json";
const IMAGE_DIR: &str = "images";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_items", rename = "maxItems")]
    pub max_items: usize,
    #[serde(default = "default_poll_interval_ms", rename = "pollIntervalMs")]
    pub poll_interval_ms: u64,
    /// Optional rofi theme file for the selection menu
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "rofiTheme")]
    pub rofi_theme: Option<PathBuf>,
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}
fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_items: DEFAULT_MAX_ITEMS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            rofi_theme: None,
        }
    }
}

impl Config {
    /// Load `config.json` from the data directory, falling back to defaults
    /// when the file is missing or unparseable.
    pub fn load(data_dir: &Path) -> Config {
        let path = data_dir.join(CONFIG_FILE);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(_) => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Config::default();
            }
        };

        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Config file malformed, using defaults");
                Config::default()
            }
        }
    }
}

/// Root directory for durable state: `<platform config dir>/clipstash`.
pub fn data_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clipstash"))
}

/// Directory that holds per-capture image blobs.
pub fn image_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(IMAGE_DIR)
}
