//! Shared types for the Dialect demo stack.
//!
//! This crate defines the wire and domain types used by both the
//! call-initiation gateway and the call console: the call configuration
//! submitted to the voice API, tool selections, transcript entries, and the
//! baked-in demo call template.
//!
//! No crate in the workspace depends on anything *except* `dialect-types`
//! for cross-cutting type definitions. This keeps the dependency graph clean
//! and prevents circular dependencies.

pub mod call;
pub mod demo;

pub use call::{
    is_e164, CallConfig, CallMedium, CallResult, SelectedTool, Speaker,
    TelephonyMediumConfig, TranscriptEntry, CALL_ID_PARAM, CREATE_PROFILE_TOOL,
};
pub use demo::DemoConfig;
