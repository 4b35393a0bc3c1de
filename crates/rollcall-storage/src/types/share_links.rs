//! Share links: bearer-token capability grants scoped to one team.

use chrono::{DateTime, Utc};

use super::capabilities::Capability;
use super::ids::{ShareLinkId, TeamId, UserId};

/// Share link record.
///
/// The token is an opaque bearer credential: possession is the proof of
/// access. `permissions` is stored sorted and deduplicated and always
/// contains [`Capability::ViewTeam`].
#[derive(Clone, Debug)]
pub struct ShareLink {
    pub id: ShareLinkId,
    pub name: String,
    pub team_id: TeamId,
    pub created_by: UserId,
    pub permissions: Vec<Capability>,
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShareLink {
    /// A link with no `expires_at` never expires; otherwise it is invalid
    /// strictly after the expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(t) if t < now)
    }

    pub fn grants(&self, capability: Capability) -> bool {
        self.permissions.contains(&capability)
    }
}

/// Parameters for creating a share link. The token is supplied by the
/// caller; backends fail with `AlreadyExists` on a token collision.
#[derive(Clone, Debug)]
pub struct CreateShareLinkParams {
    pub name: String,
    pub team_id: TeamId,
    pub created_by: UserId,
    pub permissions: Vec<Capability>,
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Parameters for updating a share link. The token never rotates.
#[derive(Clone, Debug)]
pub struct UpdateShareLinkParams {
    pub name: String,
    pub permissions: Vec<Capability>,
    pub expires_at: Option<DateTime<Utc>>,
}
