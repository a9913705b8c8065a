//! Call configuration and transcript types.
//!
//! These types mirror the voice API's JSON wire format, so serde renames
//! follow its camelCase field names.

use serde::{Deserialize, Serialize};

/// Result of a successful call start: the voice API's raw JSON response,
/// merged for telephony calls with `telephonyCallId` and `telephonyStatus`.
/// Kept as raw JSON so every upstream field survives the relay unmodified.
pub type CallResult = serde_json::Value;

/// Name of the well-known profile-creation tool. The console assigns a
/// per-call identifier override on this tool so downstream systems can
/// correlate a created profile with the call.
pub const CREATE_PROFILE_TOOL: &str = "createProfile";

/// Name of the per-call correlation parameter on [`CREATE_PROFILE_TOOL`].
pub const CALL_ID_PARAM: &str = "callId";

/// Full configuration for one call: how the agent behaves and which medium
/// (web session or phone bridge) carries the audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallConfig {
    /// System prompt handed to the voice agent.
    #[serde(rename = "systemPrompt")]
    pub system_prompt: String,
    /// Model identifier, e.g. `fixie-ai/ultravox-70B`.
    pub model: String,
    /// BCP-47 language hint for speech recognition.
    #[serde(rename = "languageHint", skip_serializing_if = "Option::is_none")]
    pub language_hint: Option<String>,
    /// Voice identifier for agent speech synthesis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum call duration, e.g. `"240s"`.
    #[serde(rename = "maxDuration", skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<String>,
    /// Message the agent speaks when `max_duration` is exceeded.
    #[serde(rename = "timeExceededMessage", skip_serializing_if = "Option::is_none")]
    pub time_exceeded_message: Option<String>,
    /// Tools the agent may invoke during the call, in order.
    #[serde(rename = "selectedTools", default, skip_serializing_if = "Vec::is_empty")]
    pub selected_tools: Vec<SelectedTool>,
    /// Transport mode. `None` means a plain web session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<CallMedium>,
}

impl CallConfig {
    /// Returns true if this configuration requests a phone bridge.
    pub fn is_telephony(&self) -> bool {
        matches!(self.medium, Some(CallMedium::Telephony { .. }))
    }

    /// Returns the destination phone number for a telephony call.
    pub fn destination_number(&self) -> Option<&str> {
        match &self.medium {
            Some(CallMedium::Telephony { config }) => Some(config.phone_number.as_str()),
            _ => None,
        }
    }

    /// Returns the per-call correlation id, if one has been assigned via the
    /// `createProfile` tool's `callId` parameter override.
    pub fn correlation_id(&self) -> Option<&str> {
        self.selected_tools
            .iter()
            .find(|tool| tool.tool_name == CREATE_PROFILE_TOOL)?
            .parameter_overrides
            .get(CALL_ID_PARAM)?
            .as_str()
    }

    /// Assigns a per-call correlation id as a parameter override on the
    /// `createProfile` tool selection.
    ///
    /// A no-op when the tool is not selected, matching the demo behavior of
    /// only overriding a tool that is actually configured.
    pub fn set_correlation_id(&mut self, call_id: &str) {
        if let Some(tool) = self
            .selected_tools
            .iter_mut()
            .find(|tool| tool.tool_name == CREATE_PROFILE_TOOL)
        {
            tool.parameter_overrides.insert(
                CALL_ID_PARAM.to_string(),
                serde_json::Value::String(call_id.to_string()),
            );
        }
    }
}

/// Transport mode of a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CallMedium {
    /// Browser session over the voice API's own transport.
    Web,
    /// Phone bridge via the telephony provider.
    Telephony { config: TelephonyMediumConfig },
}

/// Telephony-specific medium settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelephonyMediumConfig {
    /// Destination number in E.164 format.
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

/// A tool made available to the agent for one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedTool {
    #[serde(rename = "toolName")]
    pub tool_name: String,
    /// Fixed parameter values injected by the caller rather than chosen by
    /// the agent.
    #[serde(
        rename = "parameterOverrides",
        default,
        skip_serializing_if = "serde_json::Map::is_empty"
    )]
    pub parameter_overrides: serde_json::Map<String, serde_json::Value>,
}

impl SelectedTool {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameter_overrides: serde_json::Map::new(),
        }
    }
}

/// One utterance in the live transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// Who spoke a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Agent,
    User,
}

/// Validates a phone number against E.164 (`+` followed by a non-zero digit
/// and 1 to 14 further digits).
pub fn is_e164(number: &str) -> bool {
    let Some(digits) = number.strip_prefix('+') else {
        return false;
    };
    let bytes = digits.as_bytes();
    (2..=15).contains(&bytes.len())
        && bytes[0] != b'0'
        && bytes.iter().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn e164_accepts_valid_numbers() {
        assert!(is_e164("+15551234567"));
        assert!(is_e164("+4930123456"));
        assert!(is_e164("+12")); // shortest legal form
    }

    #[test]
    fn e164_rejects_invalid_numbers() {
        assert!(!is_e164("15551234567")); // missing plus
        assert!(!is_e164("+05551234567")); // leading zero
        assert!(!is_e164("+1555123456789012")); // too long
        assert!(!is_e164("+1")); // too short
        assert!(!is_e164("+1555-123-4567")); // punctuation
        assert!(!is_e164(""));
    }

    #[test]
    fn call_config_uses_camel_case_wire_names() {
        let config = CallConfig {
            system_prompt: "You are a helpful agent.".to_string(),
            model: "fixie-ai/ultravox-70B".to_string(),
            language_hint: Some("en".to_string()),
            voice: None,
            temperature: Some(0.3),
            max_duration: Some("240s".to_string()),
            time_exceeded_message: None,
            selected_tools: vec![SelectedTool::new(CREATE_PROFILE_TOOL)],
            medium: Some(CallMedium::Telephony {
                config: TelephonyMediumConfig {
                    phone_number: "+15551234567".to_string(),
                },
            }),
        };

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["systemPrompt"], "You are a helpful agent.");
        assert_eq!(json["maxDuration"], "240s");
        assert_eq!(json["selectedTools"][0]["toolName"], CREATE_PROFILE_TOOL);
        assert_eq!(json["medium"]["type"], "telephony");
        assert_eq!(json["medium"]["config"]["phoneNumber"], "+15551234567");
        // Unset optionals are omitted, not null.
        assert!(json.get("voice").is_none());
    }

    #[test]
    fn correlation_id_round_trips_through_tool_override() {
        let mut config = CallConfig {
            system_prompt: String::new(),
            model: "test-model".to_string(),
            language_hint: None,
            voice: None,
            temperature: None,
            max_duration: None,
            time_exceeded_message: None,
            selected_tools: vec![SelectedTool::new(CREATE_PROFILE_TOOL)],
            medium: None,
        };

        assert_eq!(config.correlation_id(), None);
        config.set_correlation_id("call-1700000000000");
        assert_eq!(config.correlation_id(), Some("call-1700000000000"));
    }

    #[test]
    fn set_correlation_id_without_profile_tool_is_a_noop() {
        let mut config = CallConfig {
            system_prompt: String::new(),
            model: "test-model".to_string(),
            language_hint: None,
            voice: None,
            temperature: None,
            max_duration: None,
            time_exceeded_message: None,
            selected_tools: vec![SelectedTool::new("lookupOrder")],
            medium: None,
        };

        config.set_correlation_id("call-1");
        assert_eq!(config.correlation_id(), None);
    }
}
