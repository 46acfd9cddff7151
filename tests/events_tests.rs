mod common;

use biblos_server::error::AppError;
use biblos_server::models::enums::AttendanceStatus;
use biblos_server::models::event::{CreateEvent, EventQuery};
use biblos_server::models::EventType;
use chrono::{Duration, Utc};

fn future_event(title: &str, max_attendees: i64) -> CreateEvent {
    CreateEvent {
        title: title.to_string(),
        description: Some("Test event".to_string()),
        event_date: Utc::now().date_naive() + Duration::days(30),
        start_time: "14:00".to_string(),
        end_time: "16:00".to_string(),
        max_attendees,
        event_type: EventType::Workshop,
        target_audience: None,
        room_id: Some(1),
    }
}

#[tokio::test]
async fn created_event_appears_in_default_search() {
    let (_pool, services) = common::setup().await;

    let event = services
        .events
        .create(&future_event("Rust for Librarians", 10), 1)
        .await
        .unwrap();

    // Default search hides past events, so only the fresh one shows up
    // against the 2025 seed data.
    let found = services.events.search(&EventQuery::default()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].event_id, event.event_id);
    assert_eq!(found[0].registered_count, 0);
    assert_eq!(found[0].room_name.as_deref(), Some("Main Conference Room"));
}

#[tokio::test]
async fn include_past_widens_the_search() {
    let (_pool, services) = common::setup().await;

    let query = EventQuery {
        include_past: Some(true),
        ..Default::default()
    };
    let events = services.events.search(&query).await.unwrap();
    assert_eq!(events.len(), 10);
}

#[tokio::test]
async fn event_search_rejects_out_of_range_limits() {
    let (_pool, services) = common::setup().await;

    // A negative LIMIT would disable the row cap entirely in SQLite.
    for limit in [-1, 0, 201] {
        let query = EventQuery {
            limit: Some(limit),
            ..Default::default()
        };
        let err = services.events.search(&query).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

#[tokio::test]
async fn event_times_and_date_are_validated() {
    let (_pool, services) = common::setup().await;

    let mut bad_times = future_event("Backwards", 10);
    bad_times.start_time = "16:00".to_string();
    bad_times.end_time = "14:00".to_string();
    let err = services.events.create(&bad_times, 1).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut bad_format = future_event("Sloppy", 10);
    bad_format.start_time = "2pm".to_string();
    let err = services.events.create(&bad_format, 1).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut past = future_event("Yesterday", 10);
    past.event_date = Utc::now().date_naive() - Duration::days(1);
    let err = services.events.create(&past, 1).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn registration_stops_at_capacity_and_cancel_frees_a_slot() {
    let (_pool, services) = common::setup().await;

    let event = services
        .events
        .create(&future_event("Tiny Workshop", 2), 1)
        .await
        .unwrap();

    services.events.register(event.event_id, 1).await.unwrap();
    services.events.register(event.event_id, 2).await.unwrap();

    let err = services.events.register(event.event_id, 3).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    services
        .events
        .cancel_registration(event.event_id, 1)
        .await
        .unwrap();
    services.events.register(event.event_id, 3).await.unwrap();

    let details = services.events.get_event(event.event_id).await.unwrap();
    assert_eq!(details.registered_count, 2);
}

#[tokio::test]
async fn double_registration_conflicts() {
    let (_pool, services) = common::setup().await;

    let event = services
        .events
        .create(&future_event("Popular Talk", 10), 1)
        .await
        .unwrap();

    services.events.register(event.event_id, 1).await.unwrap();
    let err = services.events.register(event.event_id, 1).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn reregistration_reuses_the_cancelled_row() {
    let (pool, services) = common::setup().await;

    let event = services
        .events
        .create(&future_event("On Again Off Again", 10), 1)
        .await
        .unwrap();

    let first = services.events.register(event.event_id, 1).await.unwrap();
    services
        .events
        .cancel_registration(event.event_id, 1)
        .await
        .unwrap();
    let second = services.events.register(event.event_id, 1).await.unwrap();
    assert_eq!(first.attendance_id, second.attendance_id);
    assert_eq!(second.attendance_status, AttendanceStatus::Registered);

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM EventAttendance WHERE EventID = ? AND MemberID = 1",
    )
    .bind(event.event_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn registering_for_a_past_event_fails() {
    let (_pool, services) = common::setup().await;

    // Seed event 1 took place in June 2025.
    let err = services.events.register(1, 11).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn staff_can_mark_attendance() {
    let (_pool, services) = common::setup().await;

    let event = services
        .events
        .create(&future_event("Roll Call", 10), 1)
        .await
        .unwrap();
    let attendance = services.events.register(event.event_id, 1).await.unwrap();

    let updated = services
        .events
        .set_attendance_status(attendance.attendance_id, AttendanceStatus::Attended)
        .await
        .unwrap();
    assert_eq!(updated.attendance_status, AttendanceStatus::Attended);

    let roster = services.events.attendees(event.event_id).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].member_name, "John Doe");
    assert_eq!(roster[0].attendance_status, AttendanceStatus::Attended);
}

#[tokio::test]
async fn reactivating_attendance_respects_capacity() {
    let (_pool, services) = common::setup().await;

    let event = services
        .events
        .create(&future_event("Full House", 1), 1)
        .await
        .unwrap();
    let first = services.events.register(event.event_id, 1).await.unwrap();
    services
        .events
        .cancel_registration(event.event_id, 1)
        .await
        .unwrap();
    services.events.register(event.event_id, 2).await.unwrap();

    let err = services
        .events
        .set_attendance_status(first.attendance_id, AttendanceStatus::Registered)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn member_sees_their_upcoming_events() {
    let (_pool, services) = common::setup().await;

    let event = services
        .events
        .create(&future_event("Garden Party", 10), 1)
        .await
        .unwrap();
    services.events.register(event.event_id, 1).await.unwrap();

    // Member 1's seed registrations are all in the past.
    let upcoming = services.events.upcoming_for_member(1).await.unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].event_id, event.event_id);
}

#[tokio::test]
async fn event_requires_an_available_room() {
    let (pool, services) = common::setup().await;

    sqlx::query("UPDATE Room SET AvailabilityStatus = 'Maintenance' WHERE RoomID = 2")
        .execute(&pool)
        .await
        .unwrap();

    let mut event = future_event("Nowhere To Go", 10);
    event.room_id = Some(2);
    let err = services.events.create(&event, 1).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let rooms = services.events.available_rooms().await.unwrap();
    assert_eq!(rooms.len(), 9);
}
