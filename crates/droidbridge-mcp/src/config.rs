//! Server configuration.
//!
//! Loaded from the first of: `DROIDBRIDGE_CONFIG_PATH`, `./droidbridge.toml`,
//! `$XDG_CONFIG_HOME/droidbridge/config.toml`, `~/.droidbridge.toml`.
//! Defaults apply when no file is found.

use std::path::{Path, PathBuf};
use std::time::Duration;

use droidbridge_adb::AdbClient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the adb executable. Defaults to resolving `adb` on PATH.
    #[serde(default = "default_adb_path")]
    pub adb_path: String,

    /// Per-command timeout in milliseconds. Absent by default: a hung
    /// device command blocks until adb itself gives up.
    #[serde(default)]
    pub command_timeout_ms: Option<u64>,
}

fn default_adb_path() -> String {
    "adb".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adb_path: default_adb_path(),
            command_timeout_ms: None,
        }
    }
}

impl Config {
    /// Load config from standard locations, falling back to defaults.
    pub fn load() -> Self {
        if let Ok(env_path) = std::env::var("DROIDBRIDGE_CONFIG_PATH") {
            let path = PathBuf::from(&env_path);
            match Self::read(&path) {
                Some(config) => {
                    tracing::info!("Loaded config from DROIDBRIDGE_CONFIG_PATH={env_path}");
                    return config;
                }
                None => tracing::warn!("Could not load config from DROIDBRIDGE_CONFIG_PATH={env_path}"),
            }
        }

        let mut candidates = vec![PathBuf::from("droidbridge.toml")];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("droidbridge").join("config.toml"));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(".droidbridge.toml"));
        }

        for path in candidates {
            if path.exists() {
                if let Some(config) = Self::read(&path) {
                    tracing::info!("Loaded config from {}", path.display());
                    return config;
                }
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    fn read(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Failed to parse config {}: {e}", path.display());
                None
            }
        }
    }

    /// Build an [`AdbClient`] honoring this configuration.
    pub fn client(&self) -> AdbClient {
        let mut client = AdbClient::new().with_adb_path(&self.adb_path);
        if let Some(ms) = self.command_timeout_ms {
            client = client.with_timeout(Duration::from_millis(ms));
        }
        client
    }
}
