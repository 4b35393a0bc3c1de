//! Attendance activities and per-participant attendance records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ids::{ActivityId, AttendanceRecordId, ParticipantId, TeamId, UserId};

/// Attendance status for a participant at an activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Error type for parsing AttendanceStatus from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAttendanceStatusError(pub String);

impl std::fmt::Display for ParseAttendanceStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid attendance status: {}", self.0)
    }
}

impl std::error::Error for ParseAttendanceStatusError {}

impl FromStr for AttendanceStatus {
    type Err = ParseAttendanceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            _ => Err(ParseAttendanceStatusError(s.to_string())),
        }
    }
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }
}

/// Attendance activity: a dated event a team tracks attendance for.
#[derive(Clone, Debug)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub date: DateTime<Utc>,
    pub team_id: TeamId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating an attendance activity.
#[derive(Clone, Debug)]
pub struct CreateActivityParams {
    pub name: String,
    pub date: DateTime<Utc>,
    pub team_id: TeamId,
    pub created_by: UserId,
}

/// One participant's attendance at one activity.
///
/// At most one record exists per `(activity_id, participant_id)` pair;
/// re-marking updates the existing record in place.
#[derive(Clone, Debug)]
pub struct AttendanceRecord {
    pub id: AttendanceRecordId,
    pub activity_id: ActivityId,
    pub participant_id: ParticipantId,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub recorded_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for the attendance upsert.
#[derive(Clone, Debug)]
pub struct UpsertAttendanceParams {
    pub activity_id: ActivityId,
    pub participant_id: ParticipantId,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
    pub recorded_by: UserId,
}
