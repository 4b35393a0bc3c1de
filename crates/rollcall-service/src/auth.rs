//! Identity boundary: the resolved principal and the session collaborator.

use rollcall_storage::UserId;

use crate::error::ServiceError;

/// A resolved caller: an authenticated user plus, optionally, the raw
/// share-link token it presented. The token is an opaque bearer credential;
/// the access engine validates it at decision time.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: UserId,
    pub share_token: Option<String>,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            share_token: None,
        }
    }

    pub fn with_token(user_id: UserId, share_token: impl Into<String>) -> Self {
        Self {
            user_id,
            share_token: Some(share_token.into()),
        }
    }
}

/// External identity collaborator: maps an opaque session handle plus an
/// optional share token to a [`Principal`], or fails with
/// [`ServiceError::Unauthenticated`]. Consumed by callers of this crate,
/// never implemented inside it.
#[async_trait::async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(
        &self,
        session_id: &str,
        share_token: Option<&str>,
    ) -> Result<Principal, ServiceError>;
}
