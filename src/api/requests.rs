//! Member services endpoints: acquisition requests, help requests and
//! volunteering

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::enums::{AcquisitionStatus, HelpStatus, VolunteerStatus},
    models::request::{
        AcquisitionRequest, CreateAcquisitionRequest, CreateHelpRequest, HelpRequest,
        ProcessAcquisitionRequest, ResolveHelpRequest, SetHelpStatus, SetVolunteerStatus,
        Volunteer, VolunteerProfile,
    },
    AppState,
};

use super::AuthenticatedActor;

#[derive(Deserialize, IntoParams)]
pub struct AcquisitionFilter {
    pub status: Option<AcquisitionStatus>,
}

#[derive(Deserialize, IntoParams)]
pub struct HelpFilter {
    pub status: Option<HelpStatus>,
    /// Restrict to requests assigned to this staff member
    pub assigned_to: Option<i64>,
}

#[derive(Deserialize, IntoParams)]
pub struct VolunteerFilter {
    pub status: Option<VolunteerStatus>,
}

// ---------------------------------------------------------------------------
// Acquisition requests
// ---------------------------------------------------------------------------

/// Submit an acquisition request (members only)
#[utoipa::path(
    post,
    path = "/acquisition-requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateAcquisitionRequest,
    responses(
        (status = 201, description = "Request submitted", body = AcquisitionRequest),
        (status = 403, description = "Members only")
    )
)]
pub async fn create_acquisition_request(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Json(request): Json<CreateAcquisitionRequest>,
) -> AppResult<(StatusCode, Json<AcquisitionRequest>)> {
    let member_id = claims.require_member()?;
    let created = state
        .services
        .requests
        .create_acquisition(member_id, &request)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List acquisition requests (staff only)
#[utoipa::path(
    get,
    path = "/acquisition-requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(AcquisitionFilter),
    responses(
        (status = 200, description = "Acquisition requests", body = Vec<AcquisitionRequest>),
        (status = 403, description = "Staff only")
    )
)]
pub async fn list_acquisition_requests(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Query(filter): Query<AcquisitionFilter>,
) -> AppResult<Json<Vec<AcquisitionRequest>>> {
    claims.require_staff()?;
    let requests = state.services.requests.list_acquisitions(filter.status).await?;
    Ok(Json(requests))
}

/// Approve or reject a pending acquisition request (staff only)
#[utoipa::path(
    put,
    path = "/acquisition-requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    request_body = ProcessAcquisitionRequest,
    responses(
        (status = 200, description = "Request processed", body = AcquisitionRequest),
        (status = 404, description = "Request not found"),
        (status = 422, description = "Already processed")
    )
)]
pub async fn process_acquisition_request(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(request_id): Path<i64>,
    Json(request): Json<ProcessAcquisitionRequest>,
) -> AppResult<Json<AcquisitionRequest>> {
    claims.require_staff()?;
    let processed = state
        .services
        .requests
        .process_acquisition(
            request_id,
            claims.actor_id,
            request.status,
            request.notes.as_deref(),
        )
        .await?;
    Ok(Json(processed))
}

// ---------------------------------------------------------------------------
// Help requests
// ---------------------------------------------------------------------------

/// File a help request (members only)
#[utoipa::path(
    post,
    path = "/help-requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateHelpRequest,
    responses(
        (status = 201, description = "Request filed", body = HelpRequest),
        (status = 403, description = "Members only")
    )
)]
pub async fn create_help_request(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Json(request): Json<CreateHelpRequest>,
) -> AppResult<(StatusCode, Json<HelpRequest>)> {
    let member_id = claims.require_member()?;
    let created = state.services.requests.create_help(member_id, &request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List help requests (staff only)
#[utoipa::path(
    get,
    path = "/help-requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(HelpFilter),
    responses(
        (status = 200, description = "Help requests", body = Vec<HelpRequest>),
        (status = 403, description = "Staff only")
    )
)]
pub async fn list_help_requests(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Query(filter): Query<HelpFilter>,
) -> AppResult<Json<Vec<HelpRequest>>> {
    claims.require_staff()?;
    let requests = state
        .services
        .requests
        .list_help(filter.status, filter.assigned_to)
        .await?;
    Ok(Json(requests))
}

/// Take ownership of a help request (staff only)
#[utoipa::path(
    post,
    path = "/help-requests/{id}/assign",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request assigned", body = HelpRequest),
        (status = 404, description = "Request not found"),
        (status = 422, description = "Already resolved")
    )
)]
pub async fn assign_help_request(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(request_id): Path<i64>,
) -> AppResult<Json<HelpRequest>> {
    claims.require_staff()?;
    let assigned = state
        .services
        .requests
        .assign_help(request_id, claims.actor_id)
        .await?;
    Ok(Json(assigned))
}

/// Resolve a help request with a resolution note (staff only)
#[utoipa::path(
    post,
    path = "/help-requests/{id}/resolve",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    request_body = ResolveHelpRequest,
    responses(
        (status = 200, description = "Request resolved", body = HelpRequest),
        (status = 404, description = "Request not found"),
        (status = 422, description = "Already resolved")
    )
)]
pub async fn resolve_help_request(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(request_id): Path<i64>,
    Json(request): Json<ResolveHelpRequest>,
) -> AppResult<Json<HelpRequest>> {
    claims.require_staff()?;
    let resolved = state
        .services
        .requests
        .resolve_help(request_id, claims.actor_id, &request)
        .await?;
    Ok(Json(resolved))
}

/// Reopen a help request or move it back in progress (staff only)
#[utoipa::path(
    put,
    path = "/help-requests/{id}/status",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Request ID")),
    request_body = SetHelpStatus,
    responses(
        (status = 200, description = "Status updated", body = HelpRequest),
        (status = 400, description = "Resolved is not valid here"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn set_help_request_status(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(request_id): Path<i64>,
    Json(request): Json<SetHelpStatus>,
) -> AppResult<Json<HelpRequest>> {
    claims.require_staff()?;
    let updated = state
        .services
        .requests
        .set_help_status(request_id, request.status)
        .await?;
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// Volunteers
// ---------------------------------------------------------------------------

/// Enroll as a volunteer or refresh the profile (members only)
#[utoipa::path(
    post,
    path = "/volunteers",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = VolunteerProfile,
    responses(
        (status = 200, description = "Enrollment recorded", body = Volunteer),
        (status = 403, description = "Members only")
    )
)]
pub async fn enroll_volunteer(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Json(profile): Json<VolunteerProfile>,
) -> AppResult<Json<Volunteer>> {
    let member_id = claims.require_member()?;
    let volunteer = state
        .services
        .requests
        .enroll_volunteer(member_id, &profile)
        .await?;
    Ok(Json(volunteer))
}

/// Volunteer profile of a member
#[utoipa::path(
    get,
    path = "/members/{id}/volunteer",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Volunteer profile", body = Volunteer),
        (status = 404, description = "Not enrolled")
    )
)]
pub async fn get_volunteer_profile(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Volunteer>> {
    claims.require_member_access(member_id)?;
    let volunteer = state.services.requests.volunteer_profile(member_id).await?;
    Ok(Json(volunteer))
}

/// Toggle a volunteer's status. The member themselves or staff.
#[utoipa::path(
    put,
    path = "/members/{id}/volunteer/status",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Member ID")),
    request_body = SetVolunteerStatus,
    responses(
        (status = 200, description = "Status updated", body = Volunteer),
        (status = 404, description = "Not enrolled")
    )
)]
pub async fn set_volunteer_status(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(member_id): Path<i64>,
    Json(request): Json<SetVolunteerStatus>,
) -> AppResult<Json<Volunteer>> {
    claims.require_member_access(member_id)?;
    let volunteer = state
        .services
        .requests
        .set_volunteer_status(member_id, request.status)
        .await?;
    Ok(Json(volunteer))
}

/// List volunteers (staff only)
#[utoipa::path(
    get,
    path = "/volunteers",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(VolunteerFilter),
    responses(
        (status = 200, description = "Volunteers", body = Vec<Volunteer>),
        (status = 403, description = "Staff only")
    )
)]
pub async fn list_volunteers(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Query(filter): Query<VolunteerFilter>,
) -> AppResult<Json<Vec<Volunteer>>> {
    claims.require_staff()?;
    let volunteers = state.services.requests.list_volunteers(filter.status).await?;
    Ok(Json(volunteers))
}
