//! Seam for the call-initiation request.

use crate::error::ConsoleError;
use dialect_types::{CallConfig, CallResult};

/// Submits a call configuration to the call-initiation gateway.
///
/// Production uses [`crate::HttpCallStarter`] against the server's
/// `POST /api/calls` route; tests substitute fakes.
pub trait CallStarter: Send + Sync {
    fn start_call(
        &self,
        config: &CallConfig,
    ) -> impl std::future::Future<Output = Result<CallResult, ConsoleError>> + Send;
}
