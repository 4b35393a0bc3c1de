//! Roster handlers: participant CRUD, gated on the participant
//! capabilities.

use chrono::{DateTime, Utc};

use rollcall_storage::{
    Capability, CreateParticipantParams, Participant, ParticipantId, TeamId,
    UpdateParticipantParams,
};

use crate::auth::Principal;
use crate::error::ServiceError;
use crate::service::RollcallService;

/// Add a participant to a team.
pub async fn create_participant(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
    name: &str,
    join_date: DateTime<Utc>,
) -> Result<Participant, ServiceError> {
    service
        .check_permission(principal, team_id, Capability::ManageParticipants)
        .await?;
    Ok(service
        .store
        .create_participant(&CreateParticipantParams {
            name: name.to_string(),
            team_id: team_id.clone(),
            join_date,
        })
        .await?)
}

/// Get a participant by ID.
pub async fn get_participant(
    service: &RollcallService,
    principal: &Principal,
    participant_id: &ParticipantId,
) -> Result<Participant, ServiceError> {
    let participant = service.store.get_participant(participant_id).await?;
    service
        .check_permission(principal, &participant.team_id, Capability::ViewParticipants)
        .await?;
    Ok(participant)
}

/// Update a participant's name and/or join date.
pub async fn update_participant(
    service: &RollcallService,
    principal: &Principal,
    participant_id: &ParticipantId,
    params: &UpdateParticipantParams,
) -> Result<Participant, ServiceError> {
    let participant = service.store.get_participant(participant_id).await?;
    service
        .check_permission(
            principal,
            &participant.team_id,
            Capability::ManageParticipants,
        )
        .await?;
    Ok(service
        .store
        .update_participant(participant_id, params)
        .await?)
}

/// Remove a participant (and their attendance records).
pub async fn delete_participant(
    service: &RollcallService,
    principal: &Principal,
    participant_id: &ParticipantId,
) -> Result<(), ServiceError> {
    let participant = service.store.get_participant(participant_id).await?;
    service
        .check_permission(
            principal,
            &participant.team_id,
            Capability::ManageParticipants,
        )
        .await?;
    service.store.delete_participant(participant_id).await?;
    Ok(())
}

/// List a team's roster.
pub async fn list_participants(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
) -> Result<Vec<Participant>, ServiceError> {
    service
        .check_permission(principal, team_id, Capability::ViewParticipants)
        .await?;
    Ok(service.store.list_participants(team_id).await?)
}
