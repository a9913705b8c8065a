//! HTTP-backed call starter posting to the gateway's server route.

use crate::error::ConsoleError;
use crate::starter::CallStarter;
use dialect_types::{CallConfig, CallResult};
use serde_json::Value;

/// [`CallStarter`] that submits the call configuration to the Dialect
/// server's `POST /api/calls` route.
#[derive(Debug, Clone)]
pub struct HttpCallStarter {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpCallStarter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl CallStarter for HttpCallStarter {
    async fn start_call(&self, config: &CallConfig) -> Result<CallResult, ConsoleError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(config)
            .send()
            .await
            .map_err(|e| ConsoleError::Start(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| ConsoleError::Start(format!("unparseable response: {e}")))?;

        if !status.is_success() {
            // Error bodies carry {error, details, code}; the details string
            // is the human-readable reason the console surfaces.
            let details = body
                .get("details")
                .and_then(Value::as_str)
                .unwrap_or("call request failed");
            return Err(ConsoleError::Start(details.to_string()));
        }

        Ok(body)
    }
}
