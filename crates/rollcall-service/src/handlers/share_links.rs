//! Share link handlers: issue, list, update, revoke, validate.
//!
//! A share link is a bearer capability grant: the token alone is the proof
//! of access, so validation is the one read path open to unauthenticated
//! callers.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;

use rollcall_storage::{
    Capability, CreateShareLinkParams, ShareLink, ShareLinkId, StoreError, TeamId,
    UpdateShareLinkParams,
};

use crate::auth::Principal;
use crate::error::ServiceError;
use crate::service::RollcallService;

/// URL-safe alphabet without ambiguous symbols (no 0/O, 1/I/l, o).
const TOKEN_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnpqrstuvwxyz";
const TOKEN_LENGTH: usize = 16;

/// Collision retries before giving up. With a 56^16 token space a single
/// collision is already freak-accident territory.
const TOKEN_RETRY_LIMIT: u32 = 4;

/// Outcome of validating a token.
#[derive(Clone, Debug)]
pub enum ShareLinkValidation {
    Valid {
        team_id: TeamId,
        team_name: String,
        permissions: Vec<Capability>,
    },
    Invalid {
        reason: String,
    },
}

fn generate_token() -> String {
    let mut rng = rand::rngs::OsRng;
    (0..TOKEN_LENGTH)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Parse the requested permission strings against the closed capability set
/// and normalize: deduplicate, sort, and always include `view-team`.
fn normalize_permissions(requested: &[String]) -> Result<Vec<Capability>, ServiceError> {
    let mut set = BTreeSet::new();
    set.insert(Capability::ViewTeam);
    for raw in requested {
        let capability = Capability::from_str(raw)
            .map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;
        set.insert(capability);
    }
    Ok(set.into_iter().collect())
}

/// Issue a share link for a team. Owner only.
pub async fn create_share_link(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
    name: &str,
    permissions: &[String],
    expires_at: Option<DateTime<Utc>>,
) -> Result<ShareLink, ServiceError> {
    service.require_owner(principal, team_id).await?;
    let permissions = normalize_permissions(permissions)?;

    let mut attempts = 0;
    loop {
        let params = CreateShareLinkParams {
            name: name.to_string(),
            team_id: team_id.clone(),
            created_by: principal.user_id.clone(),
            permissions: permissions.clone(),
            token: generate_token(),
            expires_at,
        };
        match service.store.create_share_link(&params).await {
            Ok(link) => return Ok(link),
            Err(StoreError::AlreadyExists) if attempts < TOKEN_RETRY_LIMIT => {
                attempts += 1;
                tracing::warn!(attempts, "share link token collision, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// List a team's share links. Owner only.
pub async fn list_share_links(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
) -> Result<Vec<ShareLink>, ServiceError> {
    service.require_owner(principal, team_id).await?;
    Ok(service.store.list_share_links(team_id).await?)
}

/// Replace a share link's name/permissions/expiry. Owner only; the token is
/// never rotated.
pub async fn update_share_link(
    service: &RollcallService,
    principal: &Principal,
    link_id: &ShareLinkId,
    name: &str,
    permissions: &[String],
    expires_at: Option<DateTime<Utc>>,
) -> Result<ShareLink, ServiceError> {
    let link = service.store.get_share_link(link_id).await?;
    service.require_owner(principal, &link.team_id).await?;
    let permissions = normalize_permissions(permissions)?;
    Ok(service
        .store
        .update_share_link(
            link_id,
            &UpdateShareLinkParams {
                name: name.to_string(),
                permissions,
                expires_at,
            },
        )
        .await?)
}

/// Revoke a share link. Owner only.
pub async fn delete_share_link(
    service: &RollcallService,
    principal: &Principal,
    link_id: &ShareLinkId,
) -> Result<(), ServiceError> {
    let link = service.store.get_share_link(link_id).await?;
    service.require_owner(principal, &link.team_id).await?;
    service.store.delete_share_link(link_id).await?;
    Ok(())
}

/// Validate a token and return the team it grants access to.
///
/// No session required: the capability is the proof of access.
pub async fn validate_share_link(
    service: &RollcallService,
    token: &str,
) -> Result<ShareLinkValidation, ServiceError> {
    let link = match service.store.get_share_link_by_token(token).await {
        Ok(link) => link,
        Err(StoreError::NotFound) => {
            return Ok(ShareLinkValidation::Invalid {
                reason: "invalid share link".to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    if link.is_expired(Utc::now()) {
        return Ok(ShareLinkValidation::Invalid {
            reason: "share link has expired".to_string(),
        });
    }

    match service.store.get_team(&link.team_id).await {
        Ok(team) => Ok(ShareLinkValidation::Valid {
            team_id: team.id,
            team_name: team.name,
            permissions: link.permissions,
        }),
        Err(StoreError::NotFound) => Ok(ShareLinkValidation::Invalid {
            reason: "team not found".to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}
