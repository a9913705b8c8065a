use thiserror::Error;

/// Failures the gateway can surface when starting a call.
///
/// `Bridging` is deliberately distinct from `Upstream`: by the time a
/// bridging failure occurs the voice session already exists and is not
/// rolled back, so callers see which leg failed.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Telephony prerequisites missing before any network call was made.
    #[error("invalid call configuration: {0}")]
    Configuration(String),

    /// Non-success response from the voice API, status and body verbatim.
    #[error("voice API error: {status}, {body}")]
    Upstream { status: u16, body: String },

    /// Telephony call creation failed after the voice session was created.
    /// The voice session is not compensated; the message names it.
    #[error("failed to bridge telephony call: {0}")]
    Bridging(String),

    /// Network-level failure at either outbound call.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A start for the same call id is already in flight.
    #[error("call start already in flight for {0}")]
    InFlight(String),
}

impl GatewayError {
    /// Stable machine-readable code for this failure kind. Clients should
    /// branch on this rather than parsing the human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::Configuration(_) => "configuration",
            GatewayError::Upstream { .. } => "upstream",
            GatewayError::Bridging(_) => "bridging",
            GatewayError::Transport(_) => "transport",
            GatewayError::InFlight(_) => "in_flight",
        }
    }
}
