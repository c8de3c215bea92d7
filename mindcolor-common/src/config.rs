//! Configuration for the Mind Color Map services.
//!
//! Supports loading configuration from multiple files:
//! - `config.json` - Core configuration (model, temperature, observability)
//! - `secrets.json` - Credentials (API keys)
//!
//! Files are loaded from `~/.mindcolor/` with proper merging, then
//! environment variables are applied on top.

use directories::UserDirs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Configuration file names, in merge order (later overrides earlier).
pub const CONFIG_FILES: &[&str] = &["config.json", "secrets.json"];

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Generation model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature (0.0 - 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Observability settings
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// API credentials (from secrets.json or environment)
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Base log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format: "json" or "pretty"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

/// API key configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeysConfig {
    /// Google API key for the Gemini oracle
    pub google: Option<String>,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_temperature() -> f64 {
    0.8
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            observability: ObservabilityConfig::default(),
            api_keys: ApiKeysConfig::default(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// Get the configuration directory (~/.mindcolor).
pub fn config_dir() -> PathBuf {
    UserDirs::new()
        .map(|u| u.home_dir().join(".mindcolor"))
        .unwrap_or_else(|| PathBuf::from(".mindcolor"))
}

/// Load a JSON file and return its contents as a Value.
/// Returns None if the file doesn't exist.
fn load_json_file(path: &PathBuf) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

    let value: Value = serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))?;

    Ok(Some(value))
}

/// Deep merge two JSON values.
/// Source values override target values, with object merging at each level.
fn merge_json(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, source_value) in source_map {
                match target_map.get_mut(&key) {
                    Some(target_value) => {
                        merge_json(target_value, source_value);
                    }
                    None => {
                        target_map.insert(key, source_value);
                    }
                }
            }
        }
        (target, source) => {
            *target = source;
        }
    }
}

impl Config {
    /// Load configuration from the default config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from a specific directory (for tests).
    ///
    /// Priority (lowest to highest):
    /// 1. `config.json`
    /// 2. `secrets.json`
    /// 3. Environment variables
    pub fn load_from(dir: Option<PathBuf>) -> Result<Self> {
        let cfg_dir = dir.unwrap_or_else(config_dir);

        let mut merged = Value::Object(Default::default());
        for name in CONFIG_FILES {
            let path = cfg_dir.join(name);
            if let Some(value) = load_json_file(&path)? {
                tracing::debug!("Loaded {}", path.display());
                merge_json(&mut merged, value);
            }
        }

        let mut config: Self = serde_json::from_value(merged)
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides on top of file configuration.
    fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("MINDCOLOR_MODEL") {
            if !model.is_empty() {
                self.model = model;
            }
        }
        if let Ok(level) = std::env::var("MINDCOLOR_LOG_LEVEL") {
            if !level.is_empty() {
                self.observability.log_level = level;
            }
        }
        let env_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok();
        if let Some(key) = env_key {
            if !key.is_empty() {
                self.api_keys.google = Some(key);
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.observability.log_level.to_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "observability.log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.observability.log_format.to_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "observability.log_format must be one of: {}",
                valid_formats.join(", ")
            )));
        }

        if self.model.is_empty() {
            return Err(Error::Config("model must not be empty".into()));
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::Config(
                "temperature must be between 0.0 and 1.0".into(),
            ));
        }

        Ok(())
    }

    /// Load and validate configuration.
    pub fn load_and_validate() -> Result<Self> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}
