//! Gateway orchestration: validate, create the voice session, optionally
//! bridge a phone leg, merge the results.

use crate::config::{TelephonyConfig, VoiceApiConfig};
use crate::error::GatewayError;
use crate::telephony::{stream_document, TelephonyClient};
use crate::voice_api::VoiceApiClient;
use dialect_types::{CallConfig, CallResult};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// The call-initiation gateway.
///
/// Holds its credentials as explicit configuration passed at construction,
/// so tests can run against fake endpoints without touching the process
/// environment.
#[derive(Debug)]
pub struct CallGateway {
    voice: VoiceApiClient,
    telephony: Option<TelephonyClient>,
    /// Correlation ids of starts currently in flight. All lock acquisitions
    /// are brief set operations that never span `.await` points, making a
    /// synchronous lock safe here.
    in_flight: Mutex<HashSet<String>>,
}

impl CallGateway {
    pub fn new(voice: VoiceApiConfig, telephony: Option<TelephonyConfig>) -> Self {
        Self {
            voice: VoiceApiClient::new(voice),
            telephony: telephony.map(TelephonyClient::new),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Starts a call: creates the voice session and, for telephony calls,
    /// places the outbound phone leg referencing its join URL.
    ///
    /// The two outbound requests are strictly sequential — the phone leg can
    /// only reference a join URL once the session exists. A bridging failure
    /// does not roll back the already-created voice session; the error
    /// message names it so an operator can reap the orphan.
    pub async fn start_call(&self, config: &CallConfig) -> Result<CallResult, GatewayError> {
        // Fail fast on telephony prerequisites before any network call.
        let destination = if config.is_telephony() {
            Some(self.validate_telephony(config)?.to_string())
        } else {
            None
        };

        // Single-flight guard keyed on the call correlation id. Released on
        // drop, success or failure.
        let _guard = self.acquire_flight(config)?;

        let mut result = self.voice.create_call(config).await?;

        if let Some(to) = destination {
            result = self.bridge(result, &to).await?;
        }

        Ok(result)
    }

    /// Checks the three telephony prerequisites and returns the destination
    /// number. No outbound request is made when any of them fails.
    fn validate_telephony<'a>(&self, config: &'a CallConfig) -> Result<&'a str, GatewayError> {
        let client = self
            .telephony
            .as_ref()
            .filter(|client| client.is_configured())
            .ok_or_else(|| {
                GatewayError::Configuration("telephony credentials not configured".to_string())
            })?;

        if client.from_number().is_empty() {
            return Err(GatewayError::Configuration(
                "telephony origin number not configured".to_string(),
            ));
        }

        config
            .destination_number()
            .filter(|number| !number.is_empty())
            .ok_or_else(|| {
                GatewayError::Configuration("destination phone number not provided".to_string())
            })
    }

    /// Places the phone leg and merges its identifiers into the voice
    /// response. Runs only after the voice session exists.
    async fn bridge(&self, mut result: CallResult, to: &str) -> Result<CallResult, GatewayError> {
        let join_url = result
            .get("joinUrl")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                GatewayError::Bridging(format!(
                    "voice API response has no joinUrl to bridge (session {} is orphaned)",
                    result.get("callId").and_then(Value::as_str).unwrap_or("?")
                ))
            })?
            .to_string();

        // validate_telephony already proved the client exists.
        let Some(client) = self.telephony.as_ref() else {
            return Err(GatewayError::Configuration(
                "telephony credentials not configured".to_string(),
            ));
        };

        let document = stream_document(&join_url);
        let call = client.create_call(&document, to).await?;

        match &mut result {
            Value::Object(map) => {
                map.insert(
                    "telephonyCallId".to_string(),
                    Value::String(call.call_id),
                );
                map.insert("telephonyStatus".to_string(), Value::String(call.status));
            }
            _ => {
                return Err(GatewayError::Bridging(
                    "voice API response is not a JSON object".to_string(),
                ))
            }
        }

        Ok(result)
    }

    fn acquire_flight(&self, config: &CallConfig) -> Result<FlightGuard<'_>, GatewayError> {
        let Some(key) = config.correlation_id() else {
            // Nothing to key deduplication on.
            return Ok(FlightGuard {
                in_flight: &self.in_flight,
                key: None,
            });
        };

        let mut set = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !set.insert(key.to_string()) {
            return Err(GatewayError::InFlight(key.to_string()));
        }

        Ok(FlightGuard {
            in_flight: &self.in_flight,
            key: Some(key.to_string()),
        })
    }
}

/// Releases the in-flight key when the start attempt completes.
struct FlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    key: Option<String>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&key);
        }
    }
}
