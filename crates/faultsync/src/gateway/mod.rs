//! Remote store gateway.
//!
//! The spreadsheet is only reachable through a small HTTP proxy. Datasets are
//! read with `GET`; every mutation is a `POST` whose body decides what happens:
//! a full record without a row number creates, one with a row number updates,
//! and `{ rowNumber, action: "delete" }` deletes.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::RemoteError;
use crate::model::RowNumber;

pub use http::HttpGateway;

/// Which sheet a fetch reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Faults,
    Routes,
}

impl Dataset {
    /// Value of the `type` query discriminator, if any.
    pub fn type_param(&self) -> Option<&'static str> {
        match self {
            Dataset::Faults => None,
            Dataset::Routes => Some("routes"),
        }
    }
}

/// Envelope returned by the mutation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl MutationResponse {
    pub fn ok(result: Option<Value>) -> Self {
        Self {
            success: true,
            error: None,
            result,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            result: None,
        }
    }

    /// Turns `success: false` into an error, returning the row object otherwise.
    pub fn into_result(self) -> Result<Option<Value>, RemoteError> {
        if self.success {
            Ok(self.result)
        } else {
            Err(RemoteError::Rejected(
                self.error
                    .unwrap_or_else(|| "gateway reported failure without a reason".to_string()),
            ))
        }
    }
}

/// Body of a delete instruction.
pub fn delete_body(row_number: RowNumber) -> Value {
    json!({ "rowNumber": row_number, "action": "delete" })
}

/// Access to the remote record store.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Reads one dataset, returning the raw response body.
    async fn fetch(&self, dataset: Dataset) -> Result<Value, RemoteError>;

    /// Sends a mutation body and returns the decoded envelope.
    async fn submit(&self, body: &Value) -> Result<MutationResponse, RemoteError>;
}
