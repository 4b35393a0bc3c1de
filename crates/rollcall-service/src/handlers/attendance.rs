//! Attendance handlers: activities, idempotent marking, and the read views
//! built on top of the records.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use rollcall_storage::{
    Activity, ActivityId, AttendanceRecord, AttendanceStatus, Capability, CreateActivityParams,
    Participant, ParticipantId, TeamId, UpsertAttendanceParams,
};

use crate::auth::Principal;
use crate::error::ServiceError;
use crate::service::RollcallService;

/// How many entries the cross-team recent feed returns.
const RECENT_ACTIVITY_LIMIT: usize = 20;

/// An activity joined with the full roster: every participant of the team,
/// each with their record for this activity if one exists. This is the
/// marking-table shape.
#[derive(Clone, Debug)]
pub struct ActivityRoster {
    pub activity: Activity,
    pub entries: Vec<RosterEntry>,
}

#[derive(Clone, Debug)]
pub struct RosterEntry {
    pub participant: Participant,
    pub record: Option<AttendanceRecord>,
}

/// A participant's attendance across activities, newest first.
#[derive(Clone, Debug)]
pub struct ParticipantHistory {
    pub participant: Participant,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub record: AttendanceRecord,
    pub activity: Activity,
}

/// An activity annotated with its team's name, for the dashboard feed.
#[derive(Clone, Debug)]
pub struct RecentActivity {
    pub activity: Activity,
    pub team_name: String,
}

/// Create an attendance activity for a team.
pub async fn create_activity(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
    date: DateTime<Utc>,
    name: Option<&str>,
) -> Result<Activity, ServiceError> {
    service
        .check_permission(principal, team_id, Capability::ManageAttendance)
        .await?;
    let name = match name {
        Some(name) => name.to_string(),
        None => format!("Attendance for {}", date.format("%Y-%m-%d")),
    };
    Ok(service
        .store
        .create_activity(&CreateActivityParams {
            name,
            date,
            team_id: team_id.clone(),
            created_by: principal.user_id.clone(),
        })
        .await?)
}

/// List a team's activities, optionally bounded by date, newest first.
pub async fn list_activities(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Vec<Activity>, ServiceError> {
    service
        .check_permission(principal, team_id, Capability::ViewAttendance)
        .await?;
    Ok(service.store.list_activities(team_id, start, end).await?)
}

/// Delete an activity and its records. Returns the number of records
/// removed.
pub async fn delete_activity(
    service: &RollcallService,
    principal: &Principal,
    activity_id: &ActivityId,
) -> Result<u64, ServiceError> {
    let activity = service.store.get_activity(activity_id).await?;
    service
        .check_permission(principal, &activity.team_id, Capability::ManageAttendance)
        .await?;
    let records = service.store.delete_activity_cascade(activity_id).await?;
    tracing::info!(activity = %activity.id.0, records, "deleted attendance activity");
    Ok(records)
}

/// Mark a participant's attendance at an activity.
///
/// Idempotent per `(activity, participant)`: re-marking updates the existing
/// record, overwriting status, notes and recorder.
pub async fn mark_attendance(
    service: &RollcallService,
    principal: &Principal,
    activity_id: &ActivityId,
    participant_id: &ParticipantId,
    status: &str,
    notes: Option<&str>,
) -> Result<AttendanceRecord, ServiceError> {
    let status = AttendanceStatus::from_str(status)
        .map_err(|e| ServiceError::InvalidArgument(e.to_string()))?;

    let activity = service.store.get_activity(activity_id).await?;
    service
        .check_permission(principal, &activity.team_id, Capability::ManageAttendance)
        .await?;

    let participant = service.store.get_participant(participant_id).await?;
    if participant.team_id != activity.team_id {
        return Err(ServiceError::InvalidArgument(
            "participant does not belong to the activity's team".to_string(),
        ));
    }

    Ok(service
        .store
        .upsert_attendance(&UpsertAttendanceParams {
            activity_id: activity_id.clone(),
            participant_id: participant_id.clone(),
            status,
            notes: notes.map(str::to_string),
            recorded_by: principal.user_id.clone(),
        })
        .await?)
}

/// The marking table: every participant of the activity's team with their
/// record for this activity, if any.
pub async fn attendance_for_activity(
    service: &RollcallService,
    principal: &Principal,
    activity_id: &ActivityId,
) -> Result<ActivityRoster, ServiceError> {
    let activity = service.store.get_activity(activity_id).await?;
    service
        .check_permission(principal, &activity.team_id, Capability::ViewAttendance)
        .await?;

    let records = service.store.list_attendance_by_activity(activity_id).await?;
    let mut by_participant: HashMap<ParticipantId, AttendanceRecord> = records
        .into_iter()
        .map(|r| (r.participant_id.clone(), r))
        .collect();

    let entries = service
        .store
        .list_participants(&activity.team_id)
        .await?
        .into_iter()
        .map(|participant| {
            let record = by_participant.remove(&participant.id);
            RosterEntry {
                participant,
                record,
            }
        })
        .collect();

    Ok(ActivityRoster { activity, entries })
}

/// A participant's attendance history, optionally bounded by activity date,
/// newest first.
pub async fn participant_history(
    service: &RollcallService,
    principal: &Principal,
    participant_id: &ParticipantId,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<ParticipantHistory, ServiceError> {
    let participant = service.store.get_participant(participant_id).await?;
    service
        .check_permission(principal, &participant.team_id, Capability::ViewReports)
        .await?;

    let records = service
        .store
        .list_attendance_by_participant(participant_id)
        .await?;

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        // An activity can only be missing if it was deleted concurrently;
        // drop the orphan row rather than failing the whole view.
        let Ok(activity) = service.store.get_activity(&record.activity_id).await else {
            continue;
        };
        if start.is_some_and(|s| activity.date < s) {
            continue;
        }
        if end.is_some_and(|e| activity.date > e) {
            continue;
        }
        entries.push(HistoryEntry { record, activity });
    }
    entries.sort_by(|a, b| b.activity.date.cmp(&a.activity.date));

    Ok(ParticipantHistory {
        participant,
        entries,
    })
}

/// Recent activities across every team the caller owns, newest first,
/// capped at twenty entries.
pub async fn recent_activities(
    service: &RollcallService,
    principal: &Principal,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Vec<RecentActivity>, ServiceError> {
    let teams = service
        .store
        .list_teams_by_owner(&principal.user_id)
        .await?;

    let mut out = Vec::new();
    for team in teams {
        let activities = service.store.list_activities(&team.id, start, end).await?;
        out.extend(activities.into_iter().map(|activity| RecentActivity {
            activity,
            team_name: team.name.clone(),
        }));
    }

    out.sort_by(|a, b| b.activity.date.cmp(&a.activity.date));
    out.truncate(RECENT_ACTIVITY_LIMIT);
    Ok(out)
}
