//! Circulation endpoints: checkouts, returns and fines

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::borrowing::{Borrowing, CreateBorrowing, Fine, FineLedger},
    models::enums::FineStatus,
    models::session::Role,
    AppState,
};

use super::AuthenticatedActor;

/// Return outcome, with the fine the late-return rule issued, if any
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    pub borrowing: Borrowing,
    pub fine: Option<Fine>,
}

/// Check an item out.
///
/// Member sessions borrow for themselves; staff sessions must name the
/// member and are recorded as the processing staff.
#[utoipa::path(
    post,
    path = "/borrowings",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    request_body = CreateBorrowing,
    responses(
        (status = 201, description = "Item checked out", body = Borrowing),
        (status = 404, description = "Item or member not found"),
        (status = 422, description = "Item is not available")
    )
)]
pub async fn create_borrowing(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Json(request): Json<CreateBorrowing>,
) -> AppResult<(StatusCode, Json<Borrowing>)> {
    let member_id = claims.resolve_member_id(request.member_id)?;
    let staff_id = match claims.role {
        Role::Staff => Some(claims.actor_id),
        Role::Member => None,
    };
    let borrowing = state
        .services
        .circulation
        .borrow(member_id, request.item_id, staff_id)
        .await?;
    Ok((StatusCode::CREATED, Json(borrowing)))
}

/// Record a return
#[utoipa::path(
    post,
    path = "/borrowings/{id}/return",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Borrowing ID")),
    responses(
        (status = 200, description = "Return recorded", body = ReturnResponse),
        (status = 404, description = "Borrowing not found"),
        (status = 422, description = "Already returned")
    )
)]
pub async fn return_borrowing(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(borrow_id): Path<i64>,
) -> AppResult<Json<ReturnResponse>> {
    let borrowing = state.services.circulation.get_borrowing(borrow_id).await?;
    claims.require_member_access(borrowing.member_id)?;
    let (borrowing, fine) = state.services.circulation.return_item(borrow_id).await?;
    Ok(Json(ReturnResponse { borrowing, fine }))
}

/// Query parameters for the fine ledger
#[derive(Deserialize, IntoParams)]
pub struct FineFilter {
    /// Filter by fine status
    pub status: Option<FineStatus>,
}

/// List fines across all members (staff only)
#[utoipa::path(
    get,
    path = "/fines",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(FineFilter),
    responses(
        (status = 200, description = "Fine ledger", body = FineLedger),
        (status = 403, description = "Staff only")
    )
)]
pub async fn list_fines(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Query(filter): Query<FineFilter>,
) -> AppResult<Json<FineLedger>> {
    claims.require_staff()?;
    let ledger = state.services.circulation.list_fines(filter.status).await?;
    Ok(Json(ledger))
}

/// Pay a fine
#[utoipa::path(
    post,
    path = "/fines/{id}/pay",
    tag = "borrowings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Fine ID")),
    responses(
        (status = 200, description = "Fine paid", body = Fine),
        (status = 404, description = "Fine not found"),
        (status = 422, description = "Already paid")
    )
)]
pub async fn pay_fine(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Path(fine_id): Path<i64>,
) -> AppResult<Json<Fine>> {
    let member_id = state.services.circulation.fine_member_id(fine_id).await?;
    claims.require_member_access(member_id)?;
    let fine = state.services.circulation.pay_fine(fine_id).await?;
    Ok(Json(fine))
}
