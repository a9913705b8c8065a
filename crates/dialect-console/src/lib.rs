//! Call console for the Dialect demo stack.
//!
//! Owns the client-side call lifecycle — `Idle → Starting → Active (web) |
//! Dialing (telephony) → Idle` — and the buffers a UI renders from: status
//! label, transcript, debug messages, and the profile-display reset key.
//!
//! The console never talks to the vendors directly. Call starts go through
//! a [`CallStarter`] (the gateway's HTTP route in production), and the live
//! web session is reached through a [`SessionDriver`] — the seam for the
//! external session-management library, which pushes status, transcript,
//! and debug events back through three registered callback slots.

pub mod console;
pub mod error;
pub mod http;
pub mod options;
pub mod session;
pub mod starter;

pub use console::{CallConsole, CallPhase, CallType};
pub use error::ConsoleError;
pub use http::HttpCallStarter;
pub use options::{ConsoleOptions, MODEL_VENDOR_PREFIX};
pub use session::{SessionCallbacks, SessionDriver};
pub use starter::CallStarter;
