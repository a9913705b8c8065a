use thiserror::Error;

/// Failures surfaced inside the console.
///
/// These never propagate past `start`/`end`; the console writes them into
/// the visible status label and returns to a safe phase.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The call-initiation request failed (validation, upstream, bridging,
    /// or transport — the gateway's message is carried through).
    #[error("{0}")]
    Start(String),

    /// The external session library failed to join or leave a session.
    #[error("session error: {0}")]
    Session(String),
}
