//! Client for the external voice API's call-creation endpoint.

use crate::config::VoiceApiConfig;
use crate::error::GatewayError;
use dialect_types::{CallConfig, CallResult};
use serde_json::{json, Value};

/// Wire value forcing the agent to speak first on every call.
pub const FIRST_SPEAKER_AGENT: &str = "FIRST_SPEAKER_AGENT";

#[derive(Debug, Clone)]
pub struct VoiceApiClient {
    http: reqwest::Client,
    config: VoiceApiConfig,
}

impl VoiceApiClient {
    pub fn new(config: VoiceApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Builds the outbound payload from a call configuration.
    ///
    /// The copy forces `firstSpeaker` to agent-first and replaces `medium`:
    /// web calls omit it entirely, telephony calls send an opaque marker.
    /// The voice API only needs to know the mode — the destination phone
    /// number is never sent to it.
    pub fn shape_payload(config: &CallConfig) -> Result<Value, GatewayError> {
        let mut payload = serde_json::to_value(config)
            .map_err(|e| GatewayError::Configuration(format!("unserializable call config: {e}")))?;

        if let Value::Object(map) = &mut payload {
            map.insert(
                "firstSpeaker".to_string(),
                Value::String(FIRST_SPEAKER_AGENT.to_string()),
            );
            map.remove("medium");
            if config.is_telephony() {
                map.insert("medium".to_string(), json!({ "telephony": {} }));
            }
        }

        Ok(payload)
    }

    /// Creates a call with the voice API.
    ///
    /// Any non-success status is surfaced verbatim as
    /// [`GatewayError::Upstream`] with the response body; there is no retry.
    pub async fn create_call(&self, config: &CallConfig) -> Result<CallResult, GatewayError> {
        let payload = Self::shape_payload(config)?;

        tracing::debug!(endpoint = %self.config.endpoint, "creating voice API call");

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("X-API-Key", &self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "voice API rejected call creation");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = response.json().await?;
        tracing::info!(
            join_url = data.get("joinUrl").and_then(serde_json::Value::as_str).unwrap_or(""),
            "voice API call created"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialect_types::{CallMedium, SelectedTool, TelephonyMediumConfig, CREATE_PROFILE_TOOL};

    fn base_config(medium: Option<CallMedium>) -> CallConfig {
        CallConfig {
            system_prompt: "prompt".to_string(),
            model: "fixie-ai/ultravox-70B".to_string(),
            language_hint: Some("en".to_string()),
            voice: Some("Mark".to_string()),
            temperature: Some(0.3),
            max_duration: Some("240s".to_string()),
            time_exceeded_message: None,
            selected_tools: vec![SelectedTool::new(CREATE_PROFILE_TOOL)],
            medium,
        }
    }

    #[test]
    fn shaped_payload_forces_agent_first() {
        let payload = VoiceApiClient::shape_payload(&base_config(None)).unwrap();
        assert_eq!(payload["firstSpeaker"], FIRST_SPEAKER_AGENT);
        assert_eq!(payload["systemPrompt"], "prompt");
    }

    #[test]
    fn web_medium_is_omitted_from_payload() {
        let payload = VoiceApiClient::shape_payload(&base_config(Some(CallMedium::Web))).unwrap();
        assert!(payload.get("medium").is_none());

        let payload = VoiceApiClient::shape_payload(&base_config(None)).unwrap();
        assert!(payload.get("medium").is_none());
    }

    #[test]
    fn telephony_medium_becomes_opaque_marker_without_phone_number() {
        let config = base_config(Some(CallMedium::Telephony {
            config: TelephonyMediumConfig {
                phone_number: "+15551234567".to_string(),
            },
        }));

        let payload = VoiceApiClient::shape_payload(&config).unwrap();
        assert_eq!(payload["medium"], json!({ "telephony": {} }));
        // The destination number must never reach the voice API.
        assert!(!payload.to_string().contains("+15551234567"));
    }
}
