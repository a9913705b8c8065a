//! Seam for the external session-management library.

use crate::error::ConsoleError;
use dialect_types::TranscriptEntry;
use serde_json::Value;

/// The three callback slots the console registers against a live session.
///
/// The external library invokes these at arbitrary times while a session is
/// active, with no ordering guarantee between slots. Implementations must
/// be cheap and non-blocking; the console's handlers take a brief lock and
/// never await.
pub struct SessionCallbacks {
    /// Session status changed. `None` means the library reported no status
    /// (the console falls back to its "off" label).
    pub on_status: Box<dyn Fn(Option<String>) + Send + Sync>,
    /// The library's latest full transcript. Applied wholesale, replacing
    /// the previous buffer.
    pub on_transcript: Box<dyn Fn(Vec<TranscriptEntry>) + Send + Sync>,
    /// An opaque debug event record. Appended incrementally.
    pub on_debug: Box<dyn Fn(Value) + Send + Sync>,
}

impl std::fmt::Debug for SessionCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCallbacks").finish_non_exhaustive()
    }
}

/// Drives the external session library's transport for web calls.
///
/// Telephony calls never touch this: the phone leg is bridged server-side
/// and no local session exists for it.
pub trait SessionDriver: Send + Sync {
    /// Joins the session at `join_url`, registering the console's callbacks.
    /// `show_debug` asks the library to emit its experimental debug events.
    fn join(
        &self,
        join_url: &str,
        show_debug: bool,
        callbacks: SessionCallbacks,
    ) -> impl std::future::Future<Output = Result<(), ConsoleError>> + Send;

    /// Tears down the live session.
    fn leave(&self) -> impl std::future::Future<Output = Result<(), ConsoleError>> + Send;
}
