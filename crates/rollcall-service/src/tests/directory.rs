//! Team hierarchy tests: paths, descendant queries, hierarchy composition
//! and cascading deletion.

use uuid::Uuid;

use rollcall_storage::{Team, TeamId, UpdateTeamParams};

use super::common::*;
use crate::error::ServiceError;
use crate::handlers::directory;

#[tokio::test]
async fn paths_follow_the_parent_chain() {
    let service = create_test_service();
    let owner = test_principal();

    let root = create_test_team(&service, &owner, "club", None).await;
    let child = create_test_team(&service, &owner, "juniors", Some(root.id.clone())).await;
    let grandchild = create_test_team(&service, &owner, "u12", Some(child.id.clone())).await;

    assert_eq!(root.path, Team::root_path(&root.id));
    assert!(child.path.starts_with(&root.path));
    assert!(grandchild.path.starts_with(&child.path));
    assert!(grandchild.path.ends_with(&format!("{}/", grandchild.id.0)));
    assert_eq!(child.parent_id, Some(root.id.clone()));
}

#[tokio::test]
async fn descendants_match_path_prefix_exactly() {
    let service = create_test_service();
    let owner = test_principal();

    let root = create_test_team(&service, &owner, "club", None).await;
    let child = create_test_team(&service, &owner, "juniors", Some(root.id.clone())).await;
    let grandchild = create_test_team(&service, &owner, "u12", Some(child.id.clone())).await;
    let other_root = create_test_team(&service, &owner, "other", None).await;

    let descendants = directory::list_descendants(&service, &owner, &root.id)
        .await
        .unwrap();
    let ids: Vec<TeamId> = descendants.iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&child.id));
    assert!(ids.contains(&grandchild.id));
    assert!(!ids.contains(&root.id), "a team is not its own descendant");
    assert!(!ids.contains(&other_root.id));

    // A leaf has no descendants; the scan returns empty without fan-out.
    let leaf = directory::list_descendants(&service, &owner, &grandchild.id)
        .await
        .unwrap();
    assert!(leaf.is_empty());
}

#[tokio::test]
async fn create_under_missing_parent_fails() {
    let service = create_test_service();
    let owner = test_principal();

    let err = directory::create_team(
        &service,
        &owner,
        "orphan",
        "UTC",
        Some(TeamId(Uuid::now_v7())),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[tokio::test]
async fn child_under_foreign_team_is_allowed_but_not_owned() {
    let service = create_test_service();
    let alice = test_principal();
    let bob = test_principal();

    let root = create_test_team(&service, &alice, "club", None).await;
    // No ownership check on the parent: ownership is independent per team.
    let child = create_test_team(&service, &bob, "bobs-squad", Some(root.id.clone())).await;
    assert_eq!(child.owner_id, bob.user_id);

    // Owning the parent grants nothing on the child.
    let err = directory::update_team(
        &service,
        &alice,
        &child.id,
        &UpdateTeamParams {
            name: Some("taken-over".to_string()),
            timezone: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized));
}

#[tokio::test]
async fn create_then_delete_scenario() {
    let service = create_test_service();
    let owner = test_principal();

    let a = create_test_team(&service, &owner, "a", None).await;
    let b = create_test_team(&service, &owner, "b", Some(a.id.clone())).await;

    let descendants = directory::list_descendants(&service, &owner, &a.id)
        .await
        .unwrap();
    assert_eq!(descendants.len(), 1);
    assert_eq!(descendants[0].id, b.id);

    let deleted = directory::delete_team(&service, &owner, &a.id).await.unwrap();
    assert_eq!(deleted, 1);

    assert!(matches!(
        directory::get_team(&service, &owner, &a.id).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        directory::get_team(&service, &owner, &b.id).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        directory::list_descendants(&service, &owner, &a.id).await,
        Err(ServiceError::NotFound)
    ));
}

#[tokio::test]
async fn hierarchy_composes_children_recursively() {
    let service = create_test_service();
    let owner = test_principal();

    let root = create_test_team(&service, &owner, "club", None).await;
    let left = create_test_team(&service, &owner, "left", Some(root.id.clone())).await;
    let _right = create_test_team(&service, &owner, "right", Some(root.id.clone())).await;
    let leaf = create_test_team(&service, &owner, "leaf", Some(left.id.clone())).await;

    let tree = directory::build_hierarchy(&service, &owner, &root.id)
        .await
        .unwrap();
    assert_eq!(tree.team.id, root.id);
    assert_eq!(tree.children.len(), 2);

    let left_node = tree
        .children
        .iter()
        .find(|n| n.team.id == left.id)
        .expect("left child present");
    assert_eq!(left_node.children.len(), 1);
    assert_eq!(left_node.children[0].team.id, leaf.id);
}

#[tokio::test]
async fn mutation_requires_ownership() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;

    let stranger = test_principal();
    assert!(matches!(
        directory::delete_team(&service, &stranger, &team.id).await,
        Err(ServiceError::Unauthorized)
    ));

    // A share link never authorizes owner-only operations.
    let link = create_test_share_link(
        &service,
        &owner,
        &team.id,
        &["manage-participants", "manage-attendance"],
        None,
    )
    .await;
    let guest = crate::auth::Principal::with_token(stranger.user_id.clone(), link.token);
    assert!(matches!(
        directory::delete_team(&service, &guest, &team.id).await,
        Err(ServiceError::Unauthorized)
    ));

    let updated = directory::update_team(
        &service,
        &owner,
        &team.id,
        &UpdateTeamParams {
            name: Some("renamed".to_string()),
            timezone: Some("Europe/Berlin".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.timezone, "Europe/Berlin");
}

#[tokio::test]
async fn root_and_owned_listings_are_scoped_to_the_caller() {
    let service = create_test_service();
    let alice = test_principal();
    let bob = test_principal();

    let a_root = create_test_team(&service, &alice, "alice-club", None).await;
    let _a_child = create_test_team(&service, &alice, "alice-sub", Some(a_root.id.clone())).await;
    let _b_root = create_test_team(&service, &bob, "bob-club", None).await;

    let roots = directory::list_root_teams(&service, &alice).await.unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].id, a_root.id);

    let mine = directory::list_my_teams(&service, &alice).await.unwrap();
    assert_eq!(mine.len(), 2);

    let children = directory::list_children(&service, &alice, &a_root.id)
        .await
        .unwrap();
    assert_eq!(children.len(), 1);
}
