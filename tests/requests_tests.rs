mod common;

use biblos_server::error::AppError;
use biblos_server::models::enums::{AcquisitionStatus, HelpStatus, VolunteerStatus};
use biblos_server::models::request::{
    CreateAcquisitionRequest, CreateHelpRequest, ResolveHelpRequest, VolunteerProfile,
};

// ---------------------------------------------------------------------------
// Acquisition requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn acquisition_request_lifecycle_appends_notes() {
    let (_pool, services) = common::setup().await;

    let created = services
        .requests
        .create_acquisition(
            1,
            &CreateAcquisitionRequest {
                title: "Piranesi".to_string(),
                author_creator: Some("Susanna Clarke".to_string()),
                publication_type: "Book".to_string(),
                notes: Some("Heard about it at book club".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.status, AcquisitionStatus::Pending);

    let processed = services
        .requests
        .process_acquisition(
            created.request_id,
            2,
            AcquisitionStatus::Approved,
            Some("Ordering two copies"),
        )
        .await
        .unwrap();
    assert_eq!(processed.status, AcquisitionStatus::Approved);
    assert_eq!(processed.staff_id, Some(2));
    assert_eq!(
        processed.notes.as_deref(),
        Some("Heard about it at book club\nOrdering two copies")
    );
}

#[tokio::test]
async fn processed_acquisition_request_is_terminal() {
    let (_pool, services) = common::setup().await;

    // Seed request 2 is already Approved.
    let err = services
        .requests
        .process_acquisition(2, 1, AcquisitionStatus::Rejected, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn pending_is_not_a_valid_decision() {
    let (_pool, services) = common::setup().await;

    let err = services
        .requests
        .process_acquisition(1, 1, AcquisitionStatus::Pending, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn acquisition_list_filters_by_status() {
    let (_pool, services) = common::setup().await;

    let pending = services
        .requests
        .list_acquisitions(Some(AcquisitionStatus::Pending))
        .await
        .unwrap();
    assert!(!pending.is_empty());
    assert!(pending.iter().all(|r| r.status == AcquisitionStatus::Pending));

    let all = services.requests.list_acquisitions(None).await.unwrap();
    assert!(all.len() > pending.len());
}

// ---------------------------------------------------------------------------
// Help requests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn help_request_lifecycle() {
    let (_pool, services) = common::setup().await;

    let created = services
        .requests
        .create_help(
            2,
            &CreateHelpRequest {
                description: "Cannot renew my loans online".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.status, HelpStatus::Open);
    assert!(created.staff_id.is_none());

    let assigned = services
        .requests
        .assign_help(created.request_id, 4)
        .await
        .unwrap();
    assert_eq!(assigned.status, HelpStatus::InProgress);
    assert_eq!(assigned.staff_id, Some(4));

    let resolved = services
        .requests
        .resolve_help(
            created.request_id,
            4,
            &ResolveHelpRequest {
                resolution: "Reset the account password and walked through renewal".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(resolved.status, HelpStatus::Resolved);
    assert!(resolved.resolution.is_some());
    assert!(resolved.closed_date.is_some());

    let err = services
        .requests
        .resolve_help(
            created.request_id,
            4,
            &ResolveHelpRequest {
                resolution: "Again".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn resolution_text_is_mandatory() {
    let (_pool, services) = common::setup().await;

    // Seed request 8 is Open.
    let err = services
        .requests
        .resolve_help(
            8,
            1,
            &ResolveHelpRequest {
                resolution: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Closing through the plain status setter is refused as well.
    let err = services
        .requests
        .set_help_status(8, HelpStatus::Resolved)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn help_list_filters_by_status_and_assignee() {
    let (_pool, services) = common::setup().await;

    let open = services
        .requests
        .list_help(Some(HelpStatus::Open), None)
        .await
        .unwrap();
    assert!(open.iter().all(|r| r.status == HelpStatus::Open));

    // Seed: staff 8 handled two requests.
    let mine = services.requests.list_help(None, Some(8)).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|r| r.staff_id == Some(8)));

    let all = services.requests.list_help(None, None).await.unwrap();
    assert_eq!(all.len(), 10);
}

#[tokio::test]
async fn reopening_clears_the_resolution() {
    let (_pool, services) = common::setup().await;

    // Seed request 1 is Resolved.
    let reopened = services
        .requests
        .set_help_status(1, HelpStatus::Open)
        .await
        .unwrap();
    assert_eq!(reopened.status, HelpStatus::Open);
    assert!(reopened.resolution.is_none());
    assert!(reopened.closed_date.is_none());
}

// ---------------------------------------------------------------------------
// Volunteers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn volunteer_enrollment_and_status_toggle() {
    let (pool, services) = common::setup().await;

    // Member 2 is not among the seeded volunteers.
    let err = services.requests.volunteer_profile(2).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let enrolled = services
        .requests
        .enroll_volunteer(
            2,
            &VolunteerProfile {
                skills_interests: Some("Shelving, story time".to_string()),
                availability_hours: Some("Saturdays".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(enrolled.status, VolunteerStatus::Active);

    let paused = services
        .requests
        .set_volunteer_status(2, VolunteerStatus::Inactive)
        .await
        .unwrap();
    assert_eq!(paused.status, VolunteerStatus::Inactive);

    // The profile stays editable while inactive; status does not change.
    let edited = services
        .requests
        .enroll_volunteer(
            2,
            &VolunteerProfile {
                skills_interests: Some("Shelving".to_string()),
                availability_hours: Some("Sundays".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.volunteer_id, enrolled.volunteer_id);
    assert_eq!(edited.status, VolunteerStatus::Inactive);
    assert_eq!(edited.availability_hours.as_deref(), Some("Sundays"));

    let back = services
        .requests
        .set_volunteer_status(2, VolunteerStatus::Active)
        .await
        .unwrap();
    assert_eq!(back.status, VolunteerStatus::Active);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Volunteer WHERE MemberID = 2")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn volunteer_list_filters_by_status() {
    let (_pool, services) = common::setup().await;

    let active = services
        .requests
        .list_volunteers(Some(VolunteerStatus::Active))
        .await
        .unwrap();
    assert_eq!(active.len(), 8);

    let all = services.requests.list_volunteers(None).await.unwrap();
    assert_eq!(all.len(), 10);
}

#[tokio::test]
async fn member_view_hides_resolved_help_requests() {
    let (_pool, services) = common::setup().await;

    // Seed: member 3's only help request is request 8, still Open.
    let before = services.requests.help_for_member(3).await.unwrap();
    assert_eq!(before.len(), 1);

    services
        .requests
        .resolve_help(
            8,
            1,
            &ResolveHelpRequest {
                resolution: "Issued a replacement card".to_string(),
            },
        )
        .await
        .unwrap();

    let after = services.requests.help_for_member(3).await.unwrap();
    assert!(after.is_empty());
}

#[tokio::test]
async fn member_views_their_own_requests() {
    let (_pool, services) = common::setup().await;

    // Seed: member 3 filed one acquisition request and one help request.
    let acquisitions = services.requests.acquisitions_for_member(3).await.unwrap();
    assert_eq!(acquisitions.len(), 1);
    assert_eq!(acquisitions[0].title, "Cloud Atlas");

    let help = services.requests.help_for_member(3).await.unwrap();
    assert_eq!(help.len(), 1);
    assert_eq!(help[0].status, HelpStatus::Open);
}
