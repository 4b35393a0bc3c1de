//! Error taxonomy for all service operations.

use thiserror::Error;

use rollcall_storage::StoreError;

/// Every service operation resolves to success or one of these kinds; all
/// failures are deterministic, so retry policy is the caller's concern.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced team/participant/activity/share link does not exist.
    #[error("not found")]
    NotFound,
    /// The principal lacks ownership and holds no valid matching grant.
    #[error("unauthorized")]
    Unauthorized,
    /// No resolvable session.
    #[error("unauthenticated")]
    Unauthenticated,
    /// Malformed capability name, unknown attendance status, mismatched
    /// team/participant pairing, and similar caller mistakes.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A storage backend fault surfaced through the service boundary.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ServiceError::NotFound,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
