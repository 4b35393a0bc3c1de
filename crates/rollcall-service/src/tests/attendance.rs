//! Activity and attendance marking tests.

use chrono::{Duration, Utc};
use uuid::Uuid;

use rollcall_storage::{AttendanceStatus, UserId};

use super::common::*;
use crate::auth::Principal;
use crate::error::ServiceError;
use crate::handlers::attendance;

#[tokio::test]
async fn marking_twice_updates_in_place() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;
    let participant = create_test_participant(&service, &owner, &team.id, "Sam").await;
    let activity =
        create_test_activity(&service, &owner, &team.id, "practice", Utc::now()).await;

    let first = attendance::mark_attendance(
        &service,
        &owner,
        &activity.id,
        &participant.id,
        "present",
        Some("on time"),
    )
    .await
    .unwrap();

    let second = attendance::mark_attendance(
        &service,
        &owner,
        &activity.id,
        &participant.id,
        "absent",
        None,
    )
    .await
    .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.status, AttendanceStatus::Absent);
    assert_eq!(second.notes, None);

    let roster = attendance::attendance_for_activity(&service, &owner, &activity.id)
        .await
        .unwrap();
    assert_eq!(roster.entries.len(), 1);
    let record = roster.entries[0].record.as_ref().expect("record present");
    assert_eq!(record.status, AttendanceStatus::Absent);
}

#[tokio::test]
async fn unknown_status_is_invalid() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;
    let participant = create_test_participant(&service, &owner, &team.id, "Sam").await;
    let activity =
        create_test_activity(&service, &owner, &team.id, "practice", Utc::now()).await;

    let err = attendance::mark_attendance(
        &service,
        &owner,
        &activity.id,
        &participant.id,
        "late",
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn participant_must_belong_to_the_activitys_team() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;
    let other_team = create_test_team(&service, &owner, "other", None).await;

    let outsider = create_test_participant(&service, &owner, &other_team.id, "Pat").await;
    let activity =
        create_test_activity(&service, &owner, &team.id, "practice", Utc::now()).await;

    let err = attendance::mark_attendance(
        &service,
        &owner,
        &activity.id,
        &outsider.id,
        "present",
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn activity_name_defaults_to_its_date() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;

    let date = Utc::now();
    let activity = attendance::create_activity(&service, &owner, &team.id, date, None)
        .await
        .unwrap();
    assert_eq!(
        activity.name,
        format!("Attendance for {}", date.format("%Y-%m-%d"))
    );
}

#[tokio::test]
async fn marking_table_covers_the_whole_roster() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;
    let sam = create_test_participant(&service, &owner, &team.id, "Sam").await;
    let _pat = create_test_participant(&service, &owner, &team.id, "Pat").await;
    let activity =
        create_test_activity(&service, &owner, &team.id, "practice", Utc::now()).await;

    attendance::mark_attendance(&service, &owner, &activity.id, &sam.id, "present", None)
        .await
        .unwrap();

    let roster = attendance::attendance_for_activity(&service, &owner, &activity.id)
        .await
        .unwrap();
    assert_eq!(roster.entries.len(), 2, "unmarked participants included");
    let marked = roster
        .entries
        .iter()
        .filter(|e| e.record.is_some())
        .count();
    assert_eq!(marked, 1);
}

#[tokio::test]
async fn deleting_an_activity_removes_its_records() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;
    let participant = create_test_participant(&service, &owner, &team.id, "Sam").await;
    let activity =
        create_test_activity(&service, &owner, &team.id, "practice", Utc::now()).await;

    attendance::mark_attendance(
        &service,
        &owner,
        &activity.id,
        &participant.id,
        "present",
        None,
    )
    .await
    .unwrap();

    let removed = attendance::delete_activity(&service, &owner, &activity.id)
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert!(matches!(
        attendance::attendance_for_activity(&service, &owner, &activity.id).await,
        Err(ServiceError::NotFound)
    ));
}

#[tokio::test]
async fn history_is_filtered_and_newest_first() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;
    let participant = create_test_participant(&service, &owner, &team.id, "Sam").await;

    let base = Utc::now();
    for days in [1i64, 3, 2] {
        let activity = create_test_activity(
            &service,
            &owner,
            &team.id,
            &format!("day-{days}"),
            base + Duration::days(days),
        )
        .await;
        attendance::mark_attendance(
            &service,
            &owner,
            &activity.id,
            &participant.id,
            "present",
            None,
        )
        .await
        .unwrap();
    }

    let history =
        attendance::participant_history(&service, &owner, &participant.id, None, None)
            .await
            .unwrap();
    let names: Vec<&str> = history
        .entries
        .iter()
        .map(|e| e.activity.name.as_str())
        .collect();
    assert_eq!(names, vec!["day-3", "day-2", "day-1"]);

    let windowed = attendance::participant_history(
        &service,
        &owner,
        &participant.id,
        Some(base + Duration::days(2)),
        None,
    )
    .await
    .unwrap();
    assert_eq!(windowed.entries.len(), 2);
}

#[tokio::test]
async fn history_requires_the_reports_capability() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;
    let participant = create_test_participant(&service, &owner, &team.id, "Sam").await;

    let viewer_link =
        create_test_share_link(&service, &owner, &team.id, &["view-attendance"], None).await;
    let reporter_link =
        create_test_share_link(&service, &owner, &team.id, &["view-reports"], None).await;

    let viewer = Principal::with_token(UserId(Uuid::now_v7()), viewer_link.token);
    assert!(matches!(
        attendance::participant_history(&service, &viewer, &participant.id, None, None).await,
        Err(ServiceError::Unauthorized)
    ));

    let reporter = Principal::with_token(UserId(Uuid::now_v7()), reporter_link.token);
    attendance::participant_history(&service, &reporter, &participant.id, None, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn token_holders_mark_only_with_the_manage_capability() {
    let service = create_test_service();
    let owner = test_principal();
    let team = create_test_team(&service, &owner, "club", None).await;
    let participant = create_test_participant(&service, &owner, &team.id, "Sam").await;
    let activity =
        create_test_activity(&service, &owner, &team.id, "practice", Utc::now()).await;

    let manage_link =
        create_test_share_link(&service, &owner, &team.id, &["manage-attendance"], None).await;
    let view_link =
        create_test_share_link(&service, &owner, &team.id, &["view-attendance"], None).await;

    let manager = Principal::with_token(UserId(Uuid::now_v7()), manage_link.token);
    let record = attendance::mark_attendance(
        &service,
        &manager,
        &activity.id,
        &participant.id,
        "present",
        None,
    )
    .await
    .unwrap();
    assert_eq!(record.recorded_by, manager.user_id);

    let viewer = Principal::with_token(UserId(Uuid::now_v7()), view_link.token);
    assert!(matches!(
        attendance::mark_attendance(
            &service,
            &viewer,
            &activity.id,
            &participant.id,
            "absent",
            None,
        )
        .await,
        Err(ServiceError::Unauthorized)
    ));
}

#[tokio::test]
async fn recent_feed_is_owner_scoped_ordered_and_capped() {
    let service = create_test_service();
    let alice = test_principal();
    let bob = test_principal();

    let a_team = create_test_team(&service, &alice, "alice-club", None).await;
    let b_team = create_test_team(&service, &bob, "bob-club", None).await;

    let base = Utc::now();
    for day in 0..25i64 {
        create_test_activity(
            &service,
            &alice,
            &a_team.id,
            &format!("a-{day}"),
            base + Duration::days(day),
        )
        .await;
    }
    create_test_activity(&service, &bob, &b_team.id, "b-0", base).await;

    let feed = attendance::recent_activities(&service, &alice, None, None)
        .await
        .unwrap();
    assert_eq!(feed.len(), 20, "feed is capped");
    assert_eq!(feed[0].activity.name, "a-24", "newest first");
    assert!(feed.iter().all(|e| e.team_name == "alice-club"));

    let bob_feed = attendance::recent_activities(&service, &bob, None, None)
        .await
        .unwrap();
    assert_eq!(bob_feed.len(), 1);
}
