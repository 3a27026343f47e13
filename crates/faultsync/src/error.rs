use std::path::PathBuf;
use thiserror::Error;

use crate::model::RowNumber;

#[derive(Error, Debug)]
pub enum FaultSyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Failed to delete row {row}: {source}")]
    Delete {
        row: RowNumber,
        #[source]
        source: RemoteError,
    },
}

impl FaultSyncError {
    /// Short message suitable for showing to the person who triggered the operation.
    pub fn user_message(&self) -> String {
        match self {
            FaultSyncError::Validation(ValidationError::MissingField { .. }) => {
                "Please fill all required fields.".to_string()
            }
            FaultSyncError::Validation(ValidationError::MissingRowNumber) => {
                "This fault has not been saved yet and cannot be updated.".to_string()
            }
            FaultSyncError::Validation(ValidationError::NoDraft) => {
                "Open a fault for editing first.".to_string()
            }
            FaultSyncError::Remote(_) => "Failed to save the fault to the fault sheet.".to_string(),
            FaultSyncError::Delete { .. } => {
                "Failed to delete the fault from the fault sheet.".to_string()
            }
            FaultSyncError::Config(e) => e.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },
}

/// A record failed client-side checks and was not sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{field}' is blank")]
    MissingField { field: &'static str },

    #[error("Record has no row number")]
    MissingRowNumber,

    #[error("No record is being edited")]
    NoDraft,
}

/// Failures talking to the remote store gateway.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Gateway request failed: {0}")]
    Transport(String),

    #[error("Gateway returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse gateway response: {0}")]
    Parse(String),

    #[error("Gateway rejected the request: {0}")]
    Rejected(String),

    #[error("Gateway confirmed the create but returned no row number")]
    MissingRowNumber,
}

impl FaultSyncError {
    /// The gateway failure behind this error, if any.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            FaultSyncError::Remote(e) | FaultSyncError::Delete { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

impl RemoteError {
    /// Returns true if the failure is likely transient. Nothing in this crate retries;
    /// the classification is for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::Transport(_) => true,
            RemoteError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Parse(err.to_string())
        } else {
            RemoteError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FaultSyncError>;
