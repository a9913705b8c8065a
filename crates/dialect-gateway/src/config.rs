use serde::{Deserialize, Serialize};
use std::fmt;

fn default_voice_endpoint() -> String {
    "https://api.ultravox.ai/api/calls".to_string()
}

fn default_telephony_api_base() -> String {
    "https://api.twilio.com".to_string()
}

/// Credentials and endpoint for the external voice API.
#[derive(Clone, Serialize, Deserialize)]
pub struct VoiceApiConfig {
    /// Call-creation endpoint.
    #[serde(default = "default_voice_endpoint")]
    pub endpoint: String,
    /// Secret sent in the `X-API-Key` request header.
    #[serde(default, skip_serializing)]
    pub api_key: String,
}

impl VoiceApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: default_voice_endpoint(),
            api_key: api_key.into(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for VoiceApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_voice_endpoint(),
            api_key: String::new(),
        }
    }
}

impl fmt::Debug for VoiceApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceApiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Credentials for the external telephony API.
#[derive(Clone, Serialize, Deserialize)]
pub struct TelephonyConfig {
    /// REST API base URL.
    #[serde(default = "default_telephony_api_base")]
    pub api_base: String,
    /// Account identifier, also the basic-auth username.
    #[serde(default)]
    pub account_id: String,
    /// Auth credential, the basic-auth password.
    #[serde(default, skip_serializing)]
    pub auth_token: String,
    /// Origin phone number outbound calls are placed from (E.164).
    #[serde(default)]
    pub from_number: String,
}

impl TelephonyConfig {
    pub fn new(
        account_id: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Self {
        Self {
            api_base: default_telephony_api_base(),
            account_id: account_id.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// True when both credential halves are present. The origin number is
    /// checked separately so its absence gets its own error message.
    pub fn is_configured(&self) -> bool {
        !self.account_id.is_empty() && !self.auth_token.is_empty()
    }
}

impl Default for TelephonyConfig {
    fn default() -> Self {
        Self {
            api_base: default_telephony_api_base(),
            account_id: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
        }
    }
}

impl fmt::Debug for TelephonyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelephonyConfig")
            .field("api_base", &self.api_base)
            .field("account_id", &self.account_id)
            .field("auth_token", &"[REDACTED]")
            .field("from_number", &self.from_number)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let voice = VoiceApiConfig::new("uv-secret-key");
        let telephony = TelephonyConfig::new("AC123", "tw-secret-token", "+15550000000");

        let voice_dbg = format!("{voice:?}");
        let telephony_dbg = format!("{telephony:?}");

        assert!(!voice_dbg.contains("uv-secret-key"));
        assert!(!telephony_dbg.contains("tw-secret-token"));
        assert!(telephony_dbg.contains("AC123"));
    }

    #[test]
    fn configured_requires_both_credential_halves() {
        assert!(TelephonyConfig::new("AC123", "token", "+15550000000").is_configured());
        assert!(!TelephonyConfig::new("AC123", "", "+15550000000").is_configured());
        assert!(!TelephonyConfig::new("", "token", "+15550000000").is_configured());
        assert!(!VoiceApiConfig::default().is_configured());
    }
}
