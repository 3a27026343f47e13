use std::path::{Path, PathBuf};

use crate::config::schema::{Config, GatewayConfig, LoggingConfig};
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../../../schema/config-v1.json");

const SUPPORTED_VERSION: &str = "1.0";

pub const ENV_FETCH_URL: &str = "FAULTSYNC_FETCH_URL";
pub const ENV_SUBMIT_URL: &str = "FAULTSYNC_SUBMIT_URL";
pub const ENV_LOG: &str = "FAULTSYNC_LOG";
pub const ENV_SHEET_UTC_OFFSET: &str = "FAULTSYNC_SHEET_UTC_OFFSET";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

/// `<platform config dir>/faultsync/config.json`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("faultsync").join("config.json"))
}

impl Config {
    /// Builds a config from environment variables alone.
    pub fn from_env() -> Result<Config, ConfigError> {
        let fetch_url = env_value(ENV_FETCH_URL).ok_or_else(|| ConfigError::Validation {
            message: format!("Environment variable '{}' not set", ENV_FETCH_URL),
        })?;
        let submit_url = env_value(ENV_SUBMIT_URL).ok_or_else(|| ConfigError::Validation {
            message: format!("Environment variable '{}' not set", ENV_SUBMIT_URL),
        })?;

        let mut config = Config {
            version: SUPPORTED_VERSION.to_string(),
            gateway: GatewayConfig {
                fetch_url,
                submit_url,
                request_timeout_secs: None,
                sheet_utc_offset: None,
            },
            logging: LoggingConfig::default(),
        };
        config.apply_env_overrides();
        validate_config(&config)?;
        Ok(config)
    }

    /// Lets environment variables win over file values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = env_value(ENV_FETCH_URL) {
            log::debug!("Fetch URL overridden by {}", ENV_FETCH_URL);
            self.gateway.fetch_url = url;
        }
        if let Some(url) = env_value(ENV_SUBMIT_URL) {
            log::debug!("Submit URL overridden by {}", ENV_SUBMIT_URL);
            self.gateway.submit_url = url;
        }
        if let Some(offset) = env_value(ENV_SHEET_UTC_OFFSET) {
            self.gateway.sheet_utc_offset = Some(offset);
        }
        if let Some(level) = env_value(ENV_LOG) {
            self.logging.level = level;
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != SUPPORTED_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    for (name, url) in [
        ("fetch_url", &config.gateway.fetch_url),
        ("submit_url", &config.gateway.submit_url),
    ] {
        reqwest::Url::parse(url.trim()).map_err(|e| ConfigError::Validation {
            message: format!("Invalid {} '{}': {}", name, url, e),
        })?;
    }

    config.gateway.sheet_time_zone()?;

    if config.gateway.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation {
            message: "request_timeout_secs must be at least 1".to_string(),
        });
    }

    Ok(())
}
