//! Upstream failure → `AppError`.
//!
//! Pure mapping, no I/O. Every caller of an upstream (except token
//! validation) routes its failures through here.
use crate::error::AppError;

use super::client::UpstreamFailure;

/// - structured response: relay status + body verbatim
/// - transport failure: generic internal error (`HttpUpstream` has already logged the reason)
pub fn translate(failure: UpstreamFailure) -> AppError {
    match failure {
        UpstreamFailure::Response { status, body } => AppError::Upstream { status, body },
        UpstreamFailure::Transport { .. } => AppError::Internal,
    }
}

impl From<UpstreamFailure> for AppError {
    fn from(failure: UpstreamFailure) -> Self {
        translate(failure)
    }
}
