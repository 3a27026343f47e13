use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::timestamp::SheetTimeZone;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Endpoints of the HTTP proxy in front of the spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Dataset endpoint; routes are selected with `?type=routes`.
    pub fetch_url: String,
    /// Mutation endpoint for create, update and delete.
    pub submit_url: String,
    /// No timeout unless configured.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Zone of wall-clock times in the sheet, `+05:30` style or `local`.
    /// Defaults to the machine's offset.
    #[serde(default)]
    pub sheet_utc_offset: Option<String>,
}

impl GatewayConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn sheet_time_zone(&self) -> Result<SheetTimeZone, ConfigError> {
        match self.sheet_utc_offset.as_deref() {
            Some(raw) => raw
                .parse()
                .map_err(|message| ConfigError::Validation { message }),
            None => Ok(SheetTimeZone::local()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}
