//! Kiosk configuration.
//!
//! Everything has a sensible default, so the config file is optional and may
//! list only the fields it wants to change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::touch::GestureConfig;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "KIOSK_CONFIG";

const APP_DIR: &str = "webview-kiosk";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    /// Site shown until someone configures another one
    pub default_url: String,
    /// Settings password until someone changes it
    pub default_password: String,
    pub min_password_length: usize,
    /// How long a hardware key must be held to count as a long press
    pub long_press_ms: u64,
    /// Preference file; platform data dir when unset
    pub prefs_path: Option<PathBuf>,
    pub gesture: GestureConfig,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            default_url: "https://www.nikolaindustry.com".to_string(),
            default_password: "12345".to_string(),
            min_password_length: 4,
            long_press_ms: 500,
            prefs_path: None,
            gesture: GestureConfig::default(),
        }
    }
}

impl KioskConfig {
    /// Load from `$KIOSK_CONFIG`, else the platform config dir, else defaults.
    ///
    /// An explicitly named file must exist; the platform file is optional.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_path(Path::new(&path));
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => {
                log::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Where preferences live.
    pub fn prefs_path(&self) -> PathBuf {
        if let Some(ref path) = self.prefs_path {
            return path.clone();
        }
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("prefs.json")
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}
