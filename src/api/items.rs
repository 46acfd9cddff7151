//! Catalog endpoints: search and donations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::item::{DonateItem, ItemQuery, ItemSummary, LibraryItem},
    AppState,
};

use super::AuthenticatedActor;

/// Search the catalog
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    security(("bearer_auth" = [])),
    params(ItemQuery),
    responses(
        (status = 200, description = "Matching items", body = Vec<ItemSummary>)
    )
)]
pub async fn search_items(
    State(state): State<AppState>,
    AuthenticatedActor(_claims): AuthenticatedActor,
    Query(query): Query<ItemQuery>,
) -> AppResult<Json<Vec<ItemSummary>>> {
    let items = state.services.catalog.search(&query).await?;
    Ok(Json(items))
}

/// Get a single catalog item
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item found", body = ItemSummary),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    AuthenticatedActor(_claims): AuthenticatedActor,
    Path(item_id): Path<i64>,
) -> AppResult<Json<ItemSummary>> {
    let item = state.services.catalog.get_item(item_id).await?;
    Ok(Json(item))
}

/// Accept a donated item into the catalog (staff only)
#[utoipa::path(
    post,
    path = "/items/donations",
    tag = "items",
    security(("bearer_auth" = [])),
    request_body = DonateItem,
    responses(
        (status = 201, description = "Item accepted", body = LibraryItem),
        (status = 400, description = "Invalid donation payload"),
        (status = 403, description = "Staff only")
    )
)]
pub async fn donate_item(
    State(state): State<AppState>,
    AuthenticatedActor(claims): AuthenticatedActor,
    Json(donation): Json<DonateItem>,
) -> AppResult<(StatusCode, Json<LibraryItem>)> {
    claims.require_staff()?;
    let item = state.services.catalog.donate(&donation).await?;
    Ok((StatusCode::CREATED, Json(item)))
}
