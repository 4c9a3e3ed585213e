use std::env;
use std::error;
use std::fmt;
use std::fs;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, error, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::utils::get_assets_path;

pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_API_BASE_URL: &str = "https://api.nasa.gov";

/// Main structure holding runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
}

impl Settings {
    /// Loads settings from disk or uses defaults if the file is missing or invalid,
    /// then applies environment overrides for the API section
    pub fn load() -> Self {
        let mut config = Self::load_config();
        config.api.apply_overrides(|key| env::var(key).ok());
        Settings { config }
    }

    /// Reads config.json and deserializes into Config
    fn load_config() -> Config {
        let config_path = get_assets_path().join("config.json");

        fs::read_to_string(&config_path)
            .and_then(|content| serde_json::from_str(&content).map_err(Into::into))
            .unwrap_or_else(|err| {
                error!("Failed to load config.json: {}. Using default config.", err);
                Config::default()
            })
    }

    /// Saves the current settings to config.json
    pub fn save(&self) -> Result<(), Box<dyn error::Error>> {
        let config_path = get_assets_path().join("config.json");
        let config_json = serde_json::to_string_pretty(&self.config)?;

        debug!("Saving config to {}", config_path.display());

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&config_path, config_json)?;
        info!("Config saved");
        Ok(())
    }
}

/// Serializable structure for app config
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub theme: String,
    pub language: String,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Dark".to_string(),
            language: "en".to_string(),
            api: ApiConfig::default(),
        }
    }
}

/// Everything the APOD client needs to talk to the remote service.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub environment: Environment,
    pub features: Features,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            environment: Environment::default(),
            features: Features::default(),
        }
    }
}

impl ApiConfig {
    /// Overrides file values with `NASA_API_KEY`, `NASA_API_BASE_URL` and `APP_ENV`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("NASA_API_KEY").filter(|v| !v.trim().is_empty()) {
            self.api_key = key;
        }
        if let Some(url) = lookup("NASA_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(env) = lookup("APP_ENV") {
            self.environment = Environment::from_str(&env);
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Features {
    pub enable_logging: bool,
    /// Reserved. Read and saved, never acted upon.
    pub enable_offline_mode: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            enable_logging: true,
            enable_offline_mode: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    Staging,
}

impl Environment {
    pub fn from_str(s: &str) -> Environment {
        match s.trim().to_lowercase().as_str() {
            "production" => Environment::Production,
            "staging" => Environment::Staging,
            "development" => Environment::Development,
            _ => Environment::default(),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Staging => "staging",
        };
        write!(f, "{s}")
    }
}

// ===================================
//         GLOBAL CONFIG SINGLETON
// ===================================

static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| {
    let settings = Settings::load();
    RwLock::new(settings)
});

/// Gets a read-only lock on the global Settings
pub fn get_settings() -> RwLockReadGuard<'static, Settings> {
    SETTINGS
        .read()
        .expect("Failed to acquire read lock on SETTINGS")
}

/// Gets a writable lock on the global Settings
pub fn get_settings_mut() -> RwLockWriteGuard<'static, Settings> {
    SETTINGS
        .write()
        .expect("Failed to acquire write lock on SETTINGS")
}
