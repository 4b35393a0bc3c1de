//! In-memory Store backend.
//!
//! This implementation is suitable for:
//! - Development and testing
//! - Single-process deployments that don't need durability
//!
//! One mutex guards the whole state, so every trait method is a single
//! atomic transaction: it either fully commits or, on an early return, has
//! made no visible change. The team path index is a `BTreeMap`, which makes
//! [`Store::scan_teams_by_path`] one ordered range scan regardless of
//! subtree size.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use rollcall_storage::{
    Activity, ActivityId, AttendanceRecord, AttendanceRecordId, CreateActivityParams,
    CreateParticipantParams, CreateShareLinkParams, CreateTeamParams, Participant, ParticipantId,
    ShareLink, ShareLinkId, Store, StoreError, Team, TeamId, UpdateParticipantParams,
    UpdateShareLinkParams, UpdateTeamParams, UpsertAttendanceParams, UserId,
};

#[derive(Default)]
struct State {
    teams: HashMap<TeamId, Team>,
    /// Ordered path index: `path -> team id`. Paths are immutable, so
    /// entries are only ever inserted and removed, never rewritten.
    path_index: BTreeMap<String, TeamId>,
    participants: HashMap<ParticipantId, Participant>,
    activities: HashMap<ActivityId, Activity>,
    records: HashMap<AttendanceRecordId, AttendanceRecord>,
    share_links: HashMap<ShareLinkId, ShareLink>,
    /// Token point-lookup index: `token -> share link id`.
    token_index: HashMap<String, ShareLinkId>,
}

/// In-memory store. Cheap to construct, one per test or process.
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Backend("state mutex poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    // ───────────────────────────────────── Teams ──────────────────────────────────────────

    async fn create_team(&self, params: &CreateTeamParams) -> Result<Team, StoreError> {
        let mut st = self.state()?;

        // Resolve the parent path first; the id is only known after
        // allocation, so the path is computed and stored in the same lock
        // scope as the insert.
        let parent_path = match &params.parent_id {
            Some(pid) => Some(st.teams.get(pid).ok_or(StoreError::NotFound)?.path.clone()),
            None => None,
        };

        let id = TeamId(Uuid::now_v7());
        let path = match &parent_path {
            Some(pp) => Team::child_path(pp, &id),
            None => Team::root_path(&id),
        };

        let now = Utc::now();
        let team = Team {
            id: id.clone(),
            name: params.name.clone(),
            timezone: params.timezone.clone(),
            owner_id: params.owner_id.clone(),
            parent_id: params.parent_id.clone(),
            path: path.clone(),
            created_at: now,
            updated_at: now,
        };

        st.path_index.insert(path, id.clone());
        st.teams.insert(id, team.clone());
        Ok(team)
    }

    async fn get_team(&self, team_id: &TeamId) -> Result<Team, StoreError> {
        let st = self.state()?;
        st.teams.get(team_id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update_team(
        &self,
        team_id: &TeamId,
        params: &UpdateTeamParams,
    ) -> Result<Team, StoreError> {
        let mut st = self.state()?;
        let team = st.teams.get_mut(team_id).ok_or(StoreError::NotFound)?;
        if let Some(name) = &params.name {
            team.name = name.clone();
        }
        if let Some(timezone) = &params.timezone {
            team.timezone = timezone.clone();
        }
        team.updated_at = Utc::now();
        Ok(team.clone())
    }

    async fn list_root_teams(&self) -> Result<Vec<Team>, StoreError> {
        let st = self.state()?;
        Ok(st
            .teams
            .values()
            .filter(|t| t.parent_id.is_none())
            .cloned()
            .collect())
    }

    async fn list_child_teams(&self, parent_id: &TeamId) -> Result<Vec<Team>, StoreError> {
        let st = self.state()?;
        Ok(st
            .teams
            .values()
            .filter(|t| t.parent_id.as_ref() == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn list_teams_by_owner(&self, owner_id: &UserId) -> Result<Vec<Team>, StoreError> {
        let st = self.state()?;
        Ok(st
            .teams
            .values()
            .filter(|t| t.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn scan_teams_by_path(&self, start: &str, end: &str) -> Result<Vec<Team>, StoreError> {
        let st = self.state()?;
        let mut out = Vec::new();
        for (_, team_id) in st.path_index.range(start.to_string()..end.to_string()) {
            if let Some(team) = st.teams.get(team_id) {
                out.push(team.clone());
            }
        }
        Ok(out)
    }

    async fn delete_team_cascade(&self, team_id: &TeamId) -> Result<u64, StoreError> {
        let mut st = self.state()?;
        let team = st.teams.get(team_id).cloned().ok_or(StoreError::NotFound)?;

        // One range scan selects the whole subtree, the team itself included.
        let end = Team::path_range_end(&team.path);
        let doomed_teams: Vec<TeamId> = st
            .path_index
            .range(team.path.clone()..end)
            .map(|(_, id)| id.clone())
            .collect();
        let descendant_count = (doomed_teams.len() as u64).saturating_sub(1);
        let team_set: HashSet<TeamId> = doomed_teams.iter().cloned().collect();

        let doomed_activities: HashSet<ActivityId> = st
            .activities
            .values()
            .filter(|a| team_set.contains(&a.team_id))
            .map(|a| a.id.clone())
            .collect();

        st.records
            .retain(|_, r| !doomed_activities.contains(&r.activity_id));
        st.activities.retain(|_, a| !team_set.contains(&a.team_id));
        st.participants.retain(|_, p| !team_set.contains(&p.team_id));

        let doomed_tokens: Vec<String> = st
            .share_links
            .values()
            .filter(|l| team_set.contains(&l.team_id))
            .map(|l| l.token.clone())
            .collect();
        for token in doomed_tokens {
            st.token_index.remove(&token);
        }
        st.share_links.retain(|_, l| !team_set.contains(&l.team_id));

        for id in &doomed_teams {
            if let Some(t) = st.teams.remove(id) {
                st.path_index.remove(&t.path);
            }
        }

        Ok(descendant_count)
    }

    // ───────────────────────────────────── Participants ───────────────────────────────────

    async fn create_participant(
        &self,
        params: &CreateParticipantParams,
    ) -> Result<Participant, StoreError> {
        let mut st = self.state()?;
        if !st.teams.contains_key(&params.team_id) {
            return Err(StoreError::NotFound);
        }
        let now = Utc::now();
        let participant = Participant {
            id: ParticipantId(Uuid::now_v7()),
            name: params.name.clone(),
            team_id: params.team_id.clone(),
            join_date: params.join_date,
            created_at: now,
            updated_at: now,
        };
        st.participants
            .insert(participant.id.clone(), participant.clone());
        Ok(participant)
    }

    async fn get_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Participant, StoreError> {
        let st = self.state()?;
        st.participants
            .get(participant_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_participant(
        &self,
        participant_id: &ParticipantId,
        params: &UpdateParticipantParams,
    ) -> Result<Participant, StoreError> {
        let mut st = self.state()?;
        let participant = st
            .participants
            .get_mut(participant_id)
            .ok_or(StoreError::NotFound)?;
        if let Some(name) = &params.name {
            participant.name = name.clone();
        }
        if let Some(join_date) = params.join_date {
            participant.join_date = join_date;
        }
        participant.updated_at = Utc::now();
        Ok(participant.clone())
    }

    async fn delete_participant(&self, participant_id: &ParticipantId) -> Result<(), StoreError> {
        let mut st = self.state()?;
        st.participants
            .remove(participant_id)
            .ok_or(StoreError::NotFound)?;
        st.records
            .retain(|_, r| r.participant_id != *participant_id);
        Ok(())
    }

    async fn list_participants(&self, team_id: &TeamId) -> Result<Vec<Participant>, StoreError> {
        let st = self.state()?;
        Ok(st
            .participants
            .values()
            .filter(|p| p.team_id == *team_id)
            .cloned()
            .collect())
    }

    // ───────────────────────────────────── Activities ─────────────────────────────────────

    async fn create_activity(
        &self,
        params: &CreateActivityParams,
    ) -> Result<Activity, StoreError> {
        let mut st = self.state()?;
        if !st.teams.contains_key(&params.team_id) {
            return Err(StoreError::NotFound);
        }
        let now = Utc::now();
        let activity = Activity {
            id: ActivityId(Uuid::now_v7()),
            name: params.name.clone(),
            date: params.date,
            team_id: params.team_id.clone(),
            created_by: params.created_by.clone(),
            created_at: now,
            updated_at: now,
        };
        st.activities.insert(activity.id.clone(), activity.clone());
        Ok(activity)
    }

    async fn get_activity(&self, activity_id: &ActivityId) -> Result<Activity, StoreError> {
        let st = self.state()?;
        st.activities
            .get(activity_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_activities(
        &self,
        team_id: &TeamId,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<Activity>, StoreError> {
        let st = self.state()?;
        let mut out: Vec<Activity> = st
            .activities
            .values()
            .filter(|a| a.team_id == *team_id)
            .filter(|a| start.is_none_or(|s| a.date >= s))
            .filter(|a| end.is_none_or(|e| a.date <= e))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(out)
    }

    async fn delete_activity_cascade(&self, activity_id: &ActivityId) -> Result<u64, StoreError> {
        let mut st = self.state()?;
        st.activities
            .remove(activity_id)
            .ok_or(StoreError::NotFound)?;
        let before = st.records.len();
        st.records.retain(|_, r| r.activity_id != *activity_id);
        Ok((before - st.records.len()) as u64)
    }

    // ───────────────────────────────────── Attendance ─────────────────────────────────────

    async fn upsert_attendance(
        &self,
        params: &UpsertAttendanceParams,
    ) -> Result<AttendanceRecord, StoreError> {
        let mut st = self.state()?;
        if !st.activities.contains_key(&params.activity_id) {
            return Err(StoreError::NotFound);
        }
        let now = Utc::now();

        if let Some(record) = st.records.values_mut().find(|r| {
            r.activity_id == params.activity_id && r.participant_id == params.participant_id
        }) {
            record.status = params.status;
            record.notes = params.notes.clone();
            record.recorded_by = params.recorded_by.clone();
            record.updated_at = now;
            return Ok(record.clone());
        }

        let record = AttendanceRecord {
            id: AttendanceRecordId(Uuid::now_v7()),
            activity_id: params.activity_id.clone(),
            participant_id: params.participant_id.clone(),
            status: params.status,
            notes: params.notes.clone(),
            recorded_by: params.recorded_by.clone(),
            created_at: now,
            updated_at: now,
        };
        st.records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn list_attendance_by_activity(
        &self,
        activity_id: &ActivityId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let st = self.state()?;
        Ok(st
            .records
            .values()
            .filter(|r| r.activity_id == *activity_id)
            .cloned()
            .collect())
    }

    async fn list_attendance_by_participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        let st = self.state()?;
        Ok(st
            .records
            .values()
            .filter(|r| r.participant_id == *participant_id)
            .cloned()
            .collect())
    }

    // ───────────────────────────────────── Share links ────────────────────────────────────

    async fn create_share_link(
        &self,
        params: &CreateShareLinkParams,
    ) -> Result<ShareLink, StoreError> {
        let mut st = self.state()?;
        if !st.teams.contains_key(&params.team_id) {
            return Err(StoreError::NotFound);
        }
        if st.token_index.contains_key(&params.token) {
            return Err(StoreError::AlreadyExists);
        }
        let now = Utc::now();
        let link = ShareLink {
            id: ShareLinkId(Uuid::now_v7()),
            name: params.name.clone(),
            team_id: params.team_id.clone(),
            created_by: params.created_by.clone(),
            permissions: params.permissions.clone(),
            token: params.token.clone(),
            expires_at: params.expires_at,
            created_at: now,
            updated_at: now,
        };
        st.token_index.insert(link.token.clone(), link.id.clone());
        st.share_links.insert(link.id.clone(), link.clone());
        Ok(link)
    }

    async fn get_share_link(&self, link_id: &ShareLinkId) -> Result<ShareLink, StoreError> {
        let st = self.state()?;
        st.share_links
            .get(link_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_share_link_by_token(&self, token: &str) -> Result<ShareLink, StoreError> {
        let st = self.state()?;
        let link_id = st.token_index.get(token).ok_or(StoreError::NotFound)?;
        st.share_links
            .get(link_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_share_links(&self, team_id: &TeamId) -> Result<Vec<ShareLink>, StoreError> {
        let st = self.state()?;
        Ok(st
            .share_links
            .values()
            .filter(|l| l.team_id == *team_id)
            .cloned()
            .collect())
    }

    async fn update_share_link(
        &self,
        link_id: &ShareLinkId,
        params: &UpdateShareLinkParams,
    ) -> Result<ShareLink, StoreError> {
        let mut st = self.state()?;
        let link = st.share_links.get_mut(link_id).ok_or(StoreError::NotFound)?;
        link.name = params.name.clone();
        link.permissions = params.permissions.clone();
        link.expires_at = params.expires_at;
        link.updated_at = Utc::now();
        Ok(link.clone())
    }

    async fn delete_share_link(&self, link_id: &ShareLinkId) -> Result<(), StoreError> {
        let mut st = self.state()?;
        let link = st.share_links.remove(link_id).ok_or(StoreError::NotFound)?;
        st.token_index.remove(&link.token);
        Ok(())
    }
}
