//! API handlers for Biblos REST endpoints

pub mod auth;
pub mod borrowings;
pub mod events;
pub mod health;
pub mod items;
pub mod members;
pub mod openapi;
pub mod requests;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::session::SessionClaims, AppState};

/// Extractor for the authenticated actor from a bearer JWT
pub struct AuthenticatedActor(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedActor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Authentication(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];
        let claims = SessionClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))?;

        Ok(AuthenticatedActor(claims))
    }
}
