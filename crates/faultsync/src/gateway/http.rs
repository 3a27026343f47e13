//! HTTP client for the spreadsheet proxy.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{Dataset, MutationResponse, StoreGateway};
use crate::config::GatewayConfig;
use crate::error::RemoteError;

/// Maximum length of a response body kept in error messages.
const MAX_ERROR_BODY_LENGTH: usize = 200;

fn truncate_body(body: &str) -> String {
    if body.len() > MAX_ERROR_BODY_LENGTH {
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", &body[..end])
    } else {
        body.to_string()
    }
}

/// Gateway reached over HTTP.
pub struct HttpGateway {
    client: Client,
    fetch_url: String,
    submit_url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, RemoteError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RemoteError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            fetch_url: config.fetch_url.trim().to_string(),
            submit_url: config.submit_url.trim().to_string(),
        })
    }

    pub fn fetch_url(&self) -> &str {
        &self.fetch_url
    }

    pub fn submit_url(&self) -> &str {
        &self.submit_url
    }
}

#[async_trait]
impl StoreGateway for HttpGateway {
    async fn fetch(&self, dataset: Dataset) -> Result<Value, RemoteError> {
        let mut request = self.client.get(&self.fetch_url);
        if let Some(kind) = dataset.type_param() {
            request = request.query(&[("type", kind)]);
        }

        debug!("Fetching {:?} from {}", dataset, self.fetch_url);
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(response.json::<Value>().await?)
    }

    async fn submit(&self, body: &Value) -> Result<MutationResponse, RemoteError> {
        let response = self.client.post(&self.submit_url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        map_submit(status, &text)
    }
}

/// Maps a mutation reply onto the envelope or an error.
fn map_submit(status: StatusCode, text: &str) -> Result<MutationResponse, RemoteError> {
    match serde_json::from_str::<MutationResponse>(text) {
        // The proxy answers failures with a 500 and a `success: false` envelope.
        Ok(envelope) if !status.is_success() && envelope.success => {
            warn!("Gateway returned HTTP {} with a success envelope", status);
            Err(RemoteError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(text),
            })
        }
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => Err(RemoteError::HttpStatus {
            status: status.as_u16(),
            body: truncate_body(text),
        }),
        Err(e) => Err(RemoteError::Parse(format!(
            "{} in body '{}'",
            e,
            truncate_body(text)
        ))),
    }
}
