//! The Store trait that backends implement.

use chrono::{DateTime, Utc};

use crate::types::*;
use crate::StoreError;

/// The storage trait the service layer depends on.
///
/// Every method is one atomic transaction: it either fully commits or has no
/// visible effect, and no call observes another call's partial writes.
/// Backends must provide point lookups by id, equality lookups (by parent,
/// by owner, by team, by token) and an ordered half-open range scan over the
/// team `path` string.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────────── Teams ──────────────────────────────────────────

    /// Create a team. Allocates the id, computes `path` from the parent's
    /// path (root form when `parent_id` is `None`) and persists the full
    /// record in one atomic step. Fails with `NotFound` if the parent is
    /// missing.
    async fn create_team(&self, params: &CreateTeamParams) -> Result<Team, StoreError>;

    /// Get team by ID.
    async fn get_team(&self, team_id: &TeamId) -> Result<Team, StoreError>;

    /// Update a team's name and/or timezone.
    async fn update_team(
        &self,
        team_id: &TeamId,
        params: &UpdateTeamParams,
    ) -> Result<Team, StoreError>;

    /// List all teams with no parent.
    async fn list_root_teams(&self) -> Result<Vec<Team>, StoreError>;

    /// List the direct children of a team. Order is not guaranteed.
    async fn list_child_teams(&self, parent_id: &TeamId) -> Result<Vec<Team>, StoreError>;

    /// List all teams owned by a user.
    async fn list_teams_by_owner(&self, owner_id: &UserId) -> Result<Vec<Team>, StoreError>;

    /// One indexed range scan over `[start, end)` on the path index,
    /// ordered by path. This is the primitive behind descendant queries and
    /// must not fan out per level.
    async fn scan_teams_by_path(&self, start: &str, end: &str) -> Result<Vec<Team>, StoreError>;

    /// Delete a team, every descendant (by path prefix) and every
    /// participant, activity, attendance record and share link owned by any
    /// of them, in one atomic transaction. Returns the number of descendant
    /// teams removed (excluding the team itself).
    async fn delete_team_cascade(&self, team_id: &TeamId) -> Result<u64, StoreError>;

    // ───────────────────────────────────── Participants ───────────────────────────────────

    /// Create a participant in a team.
    async fn create_participant(
        &self,
        params: &CreateParticipantParams,
    ) -> Result<Participant, StoreError>;

    /// Get participant by ID.
    async fn get_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Participant, StoreError>;

    /// Update a participant's name and/or join date.
    async fn update_participant(
        &self,
        participant_id: &ParticipantId,
        params: &UpdateParticipantParams,
    ) -> Result<Participant, StoreError>;

    /// Delete a participant together with their attendance records.
    async fn delete_participant(&self, participant_id: &ParticipantId) -> Result<(), StoreError>;

    /// List all participants in a team.
    async fn list_participants(&self, team_id: &TeamId) -> Result<Vec<Participant>, StoreError>;

    // ───────────────────────────────────── Activities ─────────────────────────────────────

    /// Create an attendance activity for a team.
    async fn create_activity(&self, params: &CreateActivityParams)
        -> Result<Activity, StoreError>;

    /// Get activity by ID.
    async fn get_activity(&self, activity_id: &ActivityId) -> Result<Activity, StoreError>;

    /// List a team's activities, optionally bounded by date (inclusive),
    /// newest first.
    async fn list_activities(
        &self,
        team_id: &TeamId,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Activity>, StoreError>;

    /// Delete an activity and all its attendance records atomically.
    /// Returns the number of records removed.
    async fn delete_activity_cascade(&self, activity_id: &ActivityId) -> Result<u64, StoreError>;

    // ───────────────────────────────────── Attendance ─────────────────────────────────────

    /// Upsert the attendance record for an `(activity, participant)` pair:
    /// update the existing record in place if one exists, insert otherwise.
    async fn upsert_attendance(
        &self,
        params: &UpsertAttendanceParams,
    ) -> Result<AttendanceRecord, StoreError>;

    /// List all attendance records for an activity.
    async fn list_attendance_by_activity(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// List all attendance records for a participant.
    async fn list_attendance_by_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    // ───────────────────────────────────── Share links ────────────────────────────────────

    /// Create a share link. Fails with `AlreadyExists` if the token is
    /// already in use.
    async fn create_share_link(
        &self,
        params: &CreateShareLinkParams,
    ) -> Result<ShareLink, StoreError>;

    /// Get share link by ID.
    async fn get_share_link(&self, link_id: &ShareLinkId) -> Result<ShareLink, StoreError>;

    /// Get share link by token (point lookup, not a scan).
    async fn get_share_link_by_token(&self, token: &str) -> Result<ShareLink, StoreError>;

    /// List all share links for a team.
    async fn list_share_links(&self, team_id: &TeamId) -> Result<Vec<ShareLink>, StoreError>;

    /// Replace a share link's name/permissions/expiry. The token is
    /// unchanged.
    async fn update_share_link(
        &self,
        link_id: &ShareLinkId,
        params: &UpdateShareLinkParams,
    ) -> Result<ShareLink, StoreError>;

    /// Delete a share link.
    async fn delete_share_link(&self, link_id: &ShareLinkId) -> Result<(), StoreError>;
}
