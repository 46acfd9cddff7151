//! Event endpoints: listings, creation, registration and rosters

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::event::{
        AttendeeEntry, CreateEvent, Event, EventAttendance, EventDetails, EventQuery, Room,
        SetAttendanceStatus,
    },
    AppState,
};

use super::AuthenticatedActor;

/// Registration request. `member_id` is required for staff sessions and
/// ignored for member sessions, which always act on themselves.
#[derive(Deserialize, Default, ToSchema)]
pub struct RegistrationRequest {
    pub member_id: Option<i64>,
}

/// Search upcoming events
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    security(("bearer_auth" = [])),
    params(EventQuery),
    responses(
        (status = 200, description = "Matching events", body = Vec<EventDetails>)
    )
)]
pub async fn search_events(
    State(state): State<AppState>,
    AuthenticatedActor(_claims): AuthenticatedActor,
    Query(query): Query<EventQuery>,
) -> AppResult<Json<Vec<EventDetails>>> {
    let events = state.services.events.search(&query).await?;
    Ok(Json(events))
}

/// Get a single event with its registration count
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = EventDetails),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    AuthenticatedActor(_claims): AuthenticatedActor,
    Path(event_id): Path<i64>,
) -> AppResult<Json<EventDetails>> {
    let event = state.services.events.get_event(event_id).await?;
    Ok(Json(event))
}

/// Create an event (staff only)
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    security(("bearer_auth" = [])),
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid event payload"),
        (status = 403, description = "Staff only")
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Json(request): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    claims.require_staff()?;
    let event = state.services.events.create(&request, claims.actor_id).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Register for an event
#[utoipa::path(
    post,
    path = "/events/{id}/registrations",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registered", body = EventAttendance),
        (status = 409, description = "Already registered"),
        (status = 422, description = "Event is full or in the past")
    )
)]
pub async fn register_for_event(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(event_id): Path<i64>,
    Json(request): Json<RegistrationRequest>,
) -> AppResult<(StatusCode, Json<EventAttendance>)> {
    let member_id = claims.resolve_member_id(request.member_id)?;
    let attendance = state.services.events.register(event_id, member_id).await?;
    Ok((StatusCode::CREATED, Json(attendance)))
}

/// Cancel a registration
#[utoipa::path(
    post,
    path = "/events/{id}/registrations/cancel",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    request_body = RegistrationRequest,
    responses(
        (status = 200, description = "Registration cancelled", body = EventAttendance),
        (status = 404, description = "No registration found"),
        (status = 422, description = "Already cancelled")
    )
)]
pub async fn cancel_registration(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(event_id): Path<i64>,
    Json(request): Json<RegistrationRequest>,
) -> AppResult<Json<EventAttendance>> {
    let member_id = claims.resolve_member_id(request.member_id)?;
    let attendance = state
        .services
        .events
        .cancel_registration(event_id, member_id)
        .await?;
    Ok(Json(attendance))
}

/// Event roster (staff only)
#[utoipa::path(
    get,
    path = "/events/{id}/attendees",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Roster", body = Vec<AttendeeEntry>),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_attendees(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(event_id): Path<i64>,
) -> AppResult<Json<Vec<AttendeeEntry>>> {
    claims.require_staff()?;
    let attendees = state.services.events.attendees(event_id).await?;
    Ok(Json(attendees))
}

/// Set an attendance status directly (staff only)
#[utoipa::path(
    put,
    path = "/attendance/{id}",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Attendance ID")),
    request_body = SetAttendanceStatus,
    responses(
        (status = 200, description = "Status updated", body = EventAttendance),
        (status = 403, description = "Staff only"),
        (status = 422, description = "Event is full")
    )
)]
pub async fn set_attendance_status(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(attendance_id): Path<i64>,
    Json(request): Json<SetAttendanceStatus>,
) -> AppResult<Json<EventAttendance>> {
    claims.require_staff()?;
    let attendance = state
        .services
        .events
        .set_attendance_status(attendance_id, request.status)
        .await?;
    Ok(Json(attendance))
}

/// Rooms currently available for events (staff only)
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "events",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Available rooms", body = Vec<Room>),
        (status = 403, description = "Staff only")
    )
)]
pub async fn get_available_rooms(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
) -> AppResult<Json<Vec<Room>>> {
    claims.require_staff()?;
    let rooms = state.services.events.available_rooms().await?;
    Ok(Json(rooms))
}
