//! Participant records (the per-team roster).

use chrono::{DateTime, Utc};

use super::ids::{ParticipantId, TeamId};

/// Participant record. Owned by exactly one team and destroyed with it.
#[derive(Clone, Debug)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub team_id: TeamId,
    pub join_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a participant.
#[derive(Clone, Debug)]
pub struct CreateParticipantParams {
    pub name: String,
    pub team_id: TeamId,
    pub join_date: DateTime<Utc>,
}

/// Parameters for updating a participant. `None` fields are left unchanged.
#[derive(Clone, Debug, Default)]
pub struct UpdateParticipantParams {
    pub name: Option<String>,
    pub join_date: Option<DateTime<Utc>>,
}
