//! Call-initiation gateway for the Dialect demo stack.
//!
//! Accepts a [`dialect_types::CallConfig`], creates a session with the
//! external voice API, and — when a phone destination was requested —
//! places an outbound call through the external telephony API, handing it
//! the voice session's streaming join URL inside a call-control document.
//!
//! The gateway is integration glue: all real-time audio, transport, and
//! telephony signaling belong to the two vendors. What lives here is input
//! validation, payload shaping, the strict voice-then-telephony ordering,
//! and response merging.

pub mod config;
pub mod error;
pub mod gateway;
pub mod telephony;
pub mod voice_api;

pub use config::{TelephonyConfig, VoiceApiConfig};
pub use error::GatewayError;
pub use gateway::CallGateway;
pub use telephony::{stream_document, TelephonyCall, TelephonyClient};
pub use voice_api::{VoiceApiClient, FIRST_SPEAKER_AGENT};
