//! Team directory handlers: creation, queries over the hierarchy, updates
//! and cascading deletion.

use futures::future::BoxFuture;

use rollcall_storage::{
    Capability, CreateTeamParams, Store, Team, TeamId, UpdateTeamParams,
};

use crate::auth::Principal;
use crate::error::ServiceError;
use crate::service::RollcallService;

/// A team with its children, composed recursively. Presentation shape only;
/// deletion and permission logic use the flat path-range scan instead.
#[derive(Clone, Debug)]
pub struct TeamHierarchy {
    pub team: Team,
    pub children: Vec<TeamHierarchy>,
}

/// Create a team, as a root or under an existing parent.
///
/// Creating a child under another principal's team is allowed: ownership is
/// per-team, not inherited, so the only parent check is existence.
pub async fn create_team(
    service: &RollcallService,
    principal: &Principal,
    name: &str,
    timezone: &str,
    parent_id: Option<TeamId>,
) -> Result<Team, ServiceError> {
    let team = service
        .store
        .create_team(&CreateTeamParams {
            name: name.to_string(),
            timezone: timezone.to_string(),
            owner_id: principal.user_id.clone(),
            parent_id,
        })
        .await?;
    Ok(team)
}

/// Get a team by ID.
pub async fn get_team(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
) -> Result<Team, ServiceError> {
    service
        .check_permission(principal, team_id, Capability::ViewTeam)
        .await?;
    Ok(service.store.get_team(team_id).await?)
}

/// Update a team's name and/or timezone. Owner only.
pub async fn update_team(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
    params: &UpdateTeamParams,
) -> Result<Team, ServiceError> {
    service.require_owner(principal, team_id).await?;
    Ok(service.store.update_team(team_id, params).await?)
}

/// List the direct children of a team.
pub async fn list_children(
    service: &RollcallService,
    principal: &Principal,
    parent_id: &TeamId,
) -> Result<Vec<Team>, ServiceError> {
    service
        .check_permission(principal, parent_id, Capability::ViewTeam)
        .await?;
    Ok(service.store.list_child_teams(parent_id).await?)
}

/// List every descendant of a team, at any depth.
///
/// Resolves the team's path and performs one half-open range scan over
/// `[path, path + sentinel)`, excluding the team itself. One indexed scan
/// regardless of how deep or wide the subtree is.
pub async fn list_descendants(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
) -> Result<Vec<Team>, ServiceError> {
    service
        .check_permission(principal, team_id, Capability::ViewTeam)
        .await?;
    let team = service.store.get_team(team_id).await?;
    let end = Team::path_range_end(&team.path);
    let subtree = service.store.scan_teams_by_path(&team.path, &end).await?;
    Ok(subtree.into_iter().filter(|t| t.id != team.id).collect())
}

/// Compose the full hierarchy rooted at a team.
pub async fn build_hierarchy(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
) -> Result<TeamHierarchy, ServiceError> {
    service
        .check_permission(principal, team_id, Capability::ViewTeam)
        .await?;
    build_node(service.store.as_ref(), team_id).await
}

fn build_node<'a>(
    store: &'a dyn Store,
    team_id: &'a TeamId,
) -> BoxFuture<'a, Result<TeamHierarchy, ServiceError>> {
    Box::pin(async move {
        let team = store.get_team(team_id).await?;
        let mut children = Vec::new();
        for child in store.list_child_teams(team_id).await? {
            children.push(build_node(store, &child.id).await?);
        }
        Ok(TeamHierarchy { team, children })
    })
}

/// List root teams owned by the caller.
pub async fn list_root_teams(
    service: &RollcallService,
    principal: &Principal,
) -> Result<Vec<Team>, ServiceError> {
    let roots = service.store.list_root_teams().await?;
    Ok(roots
        .into_iter()
        .filter(|t| t.owner_id == principal.user_id)
        .collect())
}

/// List every team owned by the caller.
pub async fn list_my_teams(
    service: &RollcallService,
    principal: &Principal,
) -> Result<Vec<Team>, ServiceError> {
    Ok(service
        .store
        .list_teams_by_owner(&principal.user_id)
        .await?)
}

/// Delete a team and its whole subtree. Owner only.
///
/// The cascade removes every descendant team and every participant,
/// activity, attendance record and share link owned by any of them, in one
/// atomic transaction. Returns the number of descendant teams removed.
pub async fn delete_team(
    service: &RollcallService,
    principal: &Principal,
    team_id: &TeamId,
) -> Result<u64, ServiceError> {
    let team = service.require_owner(principal, team_id).await?;
    let descendants = service.store.delete_team_cascade(team_id).await?;
    tracing::info!(
        team = %team.id.0,
        descendants,
        "deleted team subtree"
    );
    Ok(descendants)
}
