//! Client for the external telephony API's call-creation endpoint.
//!
//! The provider bridges a phone leg to the voice session by fetching audio
//! from the streaming URL named in a call-control markup document attached
//! to the outbound call.

use crate::config::TelephonyConfig;
use crate::error::GatewayError;
use serde_json::Value;

/// Builds the call-control document that connects a phone leg to a voice
/// session's streaming join URL.
pub fn stream_document(join_url: &str) -> String {
    format!(
        r#"<Response><Connect><Stream url="{}"/></Connect></Response>"#,
        xml_escape(join_url)
    )
}

fn xml_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Identifier and initial status of a created telephony call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelephonyCall {
    pub call_id: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct TelephonyClient {
    http: reqwest::Client,
    config: TelephonyConfig,
}

impl TelephonyClient {
    pub fn new(config: TelephonyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn from_number(&self) -> &str {
        &self.config.from_number
    }

    /// Creates an outbound call from the configured origin number to `to`,
    /// attaching the given call-control document.
    pub async fn create_call(
        &self,
        document: &str,
        to: &str,
    ) -> Result<TelephonyCall, GatewayError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_id
        );

        tracing::debug!(to, "creating outbound telephony call");

        let response = self
            .http
            .post(url)
            .basic_auth(&self.config.account_id, Some(&self.config.auth_token))
            .form(&[
                ("Twiml", document),
                ("To", to),
                ("From", self.config.from_number.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(GatewayError::Bridging(format!(
                "telephony API returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let data: Value = serde_json::from_str(&body).map_err(|e| {
            GatewayError::Bridging(format!("unparseable telephony response: {e}"))
        })?;

        let call_id = data
            .get("sid")
            .and_then(Value::as_str)
            .filter(|sid| !sid.is_empty())
            .ok_or_else(|| {
                GatewayError::Bridging("telephony response missing call sid".to_string())
            })?
            .to_string();
        let status = data
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("queued")
            .to_string();

        tracing::info!(call_id = %call_id, status = %status, "telephony call initiated");

        Ok(TelephonyCall { call_id, status })
    }
}
