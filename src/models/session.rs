//! Authenticated session claims
//!
//! The claims object is the explicit session context passed into every
//! operation; there is no process-wide "current user" state.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Role of the authenticated actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Member,
    Staff,
}

/// JWT claims for an authenticated session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionClaims {
    /// Email of the actor
    pub sub: String,
    /// MemberID or StaffID depending on role
    pub actor_id: i64,
    pub role: Role,
    /// Display name
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    /// Create a signed JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_staff(&self) -> bool {
        self.role == Role::Staff
    }

    /// Staff-only operations
    pub fn require_staff(&self) -> AppResult<()> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "This operation requires a staff account".to_string(),
            ))
        }
    }

    /// Member-only operations (self-service flows)
    pub fn require_member(&self) -> AppResult<i64> {
        if self.role == Role::Member {
            Ok(self.actor_id)
        } else {
            Err(AppError::Authorization(
                "This operation requires a member account".to_string(),
            ))
        }
    }

    /// Operations on a member's own records: the member themselves, or any
    /// staff account.
    pub fn require_member_access(&self, member_id: i64) -> AppResult<()> {
        if self.is_staff() || (self.role == Role::Member && self.actor_id == member_id) {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Members can only access their own records".to_string(),
            ))
        }
    }

    /// The member a self-or-staff operation acts on: members always act on
    /// themselves, staff must name the member explicitly.
    pub fn resolve_member_id(&self, requested: Option<i64>) -> AppResult<i64> {
        match self.role {
            Role::Member => match requested {
                Some(id) if id != self.actor_id => Err(AppError::Authorization(
                    "Members can only act on their own account".to_string(),
                )),
                _ => Ok(self.actor_id),
            },
            Role::Staff => requested.ok_or_else(|| {
                AppError::Validation("member_id is required for staff sessions".to_string())
            }),
        }
    }
}

/// Login request for both members and staff
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub role: Role,
    pub actor_id: i64,
    pub name: String,
}
