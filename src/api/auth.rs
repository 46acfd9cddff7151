//! Authentication endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::session::{LoginRequest, LoginResponse, Role},
    AppState,
};

use super::AuthenticatedActor;

/// Identity of the authenticated actor
#[derive(Serialize, ToSchema)]
pub struct SessionInfo {
    pub actor_id: i64,
    pub role: Role,
    pub email: String,
    pub name: String,
}

/// Log in as a member or staff account
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.services.auth.login(&request).await?;
    Ok(Json(response))
}

/// Identity of the current session
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session", body = SessionInfo),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(AuthenticatedActor(claims): AuthenticatedActor) -> Json<SessionInfo> {
    Json(SessionInfo {
        actor_id: claims.actor_id,
        role: claims.role,
        email: claims.sub,
        name: claims.name,
    })
}
