//! Member account endpoints: registration and account views.
//!
//! Account views are reachable by the member themselves or by any staff
//! session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        borrowing::{BorrowingDetails, FineDetails},
        event::EventDetails,
        member::{CreateMember, Member},
        request::{AcquisitionRequest, HelpRequest},
    },
    AppState,
};

use super::AuthenticatedActor;

/// Register a new member (staff only)
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    security(("bearer_auth" = [])),
    request_body = CreateMember,
    responses(
        (status = 201, description = "Member created", body = Member),
        (status = 409, description = "Email already in use"),
        (status = 403, description = "Staff only")
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Json(request): Json<CreateMember>,
) -> AppResult<(StatusCode, Json<Member>)> {
    claims.require_staff()?;
    let member = state.services.auth.create_member(&request).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// Get a member record
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member record", body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Member>> {
    claims.require_member_access(member_id)?;
    let member = state.services.auth.get_member(member_id).await?;
    Ok(Json(member))
}

/// Open borrowings of a member
#[utoipa::path(
    get,
    path = "/members/{id}/borrowings",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Open borrowings", body = Vec<BorrowingDetails>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_open_borrowings(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Vec<BorrowingDetails>>> {
    claims.require_member_access(member_id)?;
    let borrowings = state.services.circulation.open_borrowings(member_id).await?;
    Ok(Json(borrowings))
}

/// Full borrowing history of a member
#[utoipa::path(
    get,
    path = "/members/{id}/borrowings/history",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Borrowing history", body = Vec<BorrowingDetails>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_borrowing_history(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Vec<BorrowingDetails>>> {
    claims.require_member_access(member_id)?;
    let borrowings = state.services.circulation.borrowing_history(member_id).await?;
    Ok(Json(borrowings))
}

/// Unpaid fines of a member
#[utoipa::path(
    get,
    path = "/members/{id}/fines",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Unpaid fines", body = Vec<FineDetails>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_unpaid_fines(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Vec<FineDetails>>> {
    claims.require_member_access(member_id)?;
    let fines = state.services.circulation.unpaid_fines(member_id).await?;
    Ok(Json(fines))
}

/// Upcoming events a member is registered for
#[utoipa::path(
    get,
    path = "/members/{id}/events",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Upcoming registrations", body = Vec<EventDetails>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_upcoming_events(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Vec<EventDetails>>> {
    claims.require_member_access(member_id)?;
    let events = state.services.events.upcoming_for_member(member_id).await?;
    Ok(Json(events))
}

/// Acquisition requests submitted by a member
#[utoipa::path(
    get,
    path = "/members/{id}/acquisition-requests",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Acquisition requests", body = Vec<AcquisitionRequest>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_acquisition_requests(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Vec<AcquisitionRequest>>> {
    claims.require_member_access(member_id)?;
    let requests = state.services.requests.acquisitions_for_member(member_id).await?;
    Ok(Json(requests))
}

/// Unresolved help requests filed by a member
#[utoipa::path(
    get,
    path = "/members/{id}/help-requests",
    tag = "members",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Unresolved help requests", body = Vec<HelpRequest>),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_help_requests(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Vec<HelpRequest>>> {
    claims.require_member_access(member_id)?;
    let requests = state.services.requests.help_for_member(member_id).await?;
    Ok(Json(requests))
}
