//! Common test helpers and utilities for service tests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use rollcall_storage::{Activity, Participant, ShareLink, Team, TeamId, UserId};
use rollcall_store_memory::MemoryStore;

use crate::auth::Principal;
use crate::config::ServiceConfig;
use crate::handlers::{attendance, directory, roster, share_links};
use crate::service::RollcallService;

/// Test helper: service over a fresh in-memory store, default config.
pub fn create_test_service() -> RollcallService {
    RollcallService::new(Arc::new(MemoryStore::new()))
}

/// Test helper: service that conceals denials as NotFound.
pub fn create_concealing_service() -> RollcallService {
    RollcallService::with_config(
        Arc::new(MemoryStore::new()),
        ServiceConfig {
            conceal_denials: true,
        },
    )
}

/// Test helper: a fresh authenticated principal with no share token.
pub fn test_principal() -> Principal {
    Principal::new(UserId(Uuid::now_v7()))
}

/// Test helper: create a team owned by the principal.
pub async fn create_test_team(
    service: &RollcallService,
    principal: &Principal,
    name: &str,
    parent_id: Option<TeamId>,
) -> Team {
    directory::create_team(service, principal, name, "UTC", parent_id)
        .await
        .unwrap()
}

/// Test helper: create a participant in a team.
pub async fn create_test_participant(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
    name: &str,
) -> Participant {
    roster::create_participant(service, principal, team_id, name, Utc::now())
        .await
        .unwrap()
}

/// Test helper: create an activity dated `date`.
pub async fn create_test_activity(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
    name: &str,
    date: DateTime<Utc>,
) -> Activity {
    attendance::create_activity(service, principal, team_id, date, Some(name))
        .await
        .unwrap()
}

/// Test helper: issue a share link with the given permission strings.
pub async fn create_test_share_link(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
    permissions: &[&str],
    expires_at: Option<DateTime<Utc>>,
) -> ShareLink {
    let permissions: Vec<String> = permissions.iter().map(|s| s.to_string()).collect();
    share_links::create_share_link(
        service,
        principal,
        team_id,
        "test link",
        &permissions,
        expires_at,
    )
    .await
    .unwrap()
}
