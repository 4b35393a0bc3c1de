//! Team records and the materialized-path helpers backends rely on.

use chrono::{DateTime, Utc};

use super::ids::{TeamId, UserId};

/// Sorts after every character that can appear in a path, so
/// `[path, path + PATH_HIGH_SENTINEL)` covers exactly the subtree rooted at
/// `path` in an ordered index.
pub const PATH_HIGH_SENTINEL: char = '\u{ffff}';

/// Team record.
///
/// `path` is a slash-delimited sequence of ancestor ids terminated by the
/// team's own id (`/A/B/C/` where `A` is a root). It is assigned at creation
/// and never changes; teams are not reparented.
#[derive(Clone, Debug)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub timezone: String,
    pub owner_id: UserId,
    pub parent_id: Option<TeamId>,
    pub path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Path of a root team.
    pub fn root_path(id: &TeamId) -> String {
        format!("/{}/", id.0)
    }

    /// Path of a child team under `parent_path`.
    pub fn child_path(parent_path: &str, id: &TeamId) -> String {
        format!("{}{}/", parent_path, id.0)
    }

    /// Exclusive upper bound for the half-open range scan that selects the
    /// subtree rooted at `path`.
    pub fn path_range_end(path: &str) -> String {
        format!("{}{}", path, PATH_HIGH_SENTINEL)
    }

    /// A team is a descendant of another iff its path has the other's path
    /// as a proper prefix.
    pub fn is_descendant_of(&self, ancestor: &Team) -> bool {
        self.id != ancestor.id && self.path.starts_with(&ancestor.path)
    }
}

/// Parameters for creating a team.
///
/// The backend allocates the id, computes `path` from the parent's path (or
/// the root form when `parent_id` is `None`) and persists everything in one
/// atomic step, so no reader ever observes a team without its path.
#[derive(Clone, Debug)]
pub struct CreateTeamParams {
    pub name: String,
    pub timezone: String,
    pub owner_id: UserId,
    pub parent_id: Option<TeamId>,
}

/// Parameters for updating a team. `None` fields are left unchanged.
#[derive(Clone, Debug, Default)]
pub struct UpdateTeamParams {
    pub name: Option<String>,
    pub timezone: Option<String>,
}
