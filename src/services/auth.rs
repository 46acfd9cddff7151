//! Authentication: credential checks, password hashing and session tokens.
//!
//! Members and staff authenticate the same way. Passwords are stored as
//! Argon2 hashes and verified in constant time by the argon2 crate.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use validator::Validate;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};
use crate::models::member::{CreateMember, Member};
use crate::models::session::{LoginRequest, LoginResponse, Role, SessionClaims};
use crate::repository::Repository;

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate a member or staff account by email and password.
    /// Member accounts are tried first; the two email namespaces are
    /// independent tables.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        if let Some(member) = self.repository.members.get_by_email(&request.email).await? {
            if self.verify_password(&member.password_hash, &request.password)? {
                return self.issue_session(
                    Role::Member,
                    member.member_id,
                    &member.email,
                    member.full_name(),
                );
            }
            return Err(AppError::Authentication("Invalid credentials".to_string()));
        }

        if let Some(staff) = self.repository.staff.get_by_email(&request.email).await? {
            if self.verify_password(&staff.password_hash, &request.password)? {
                return self.issue_session(
                    Role::Staff,
                    staff.staff_id,
                    &staff.email,
                    staff.full_name(),
                );
            }
        }

        Err(AppError::Authentication("Invalid credentials".to_string()))
    }

    /// Register a new member account.
    pub async fn create_member(&self, data: &CreateMember) -> AppResult<Member> {
        data.validate()?;
        let password_hash = self.hash_password(&data.password)?;
        let today = Utc::now().date_naive();
        self.repository.members.create(data, &password_hash, today).await
    }

    pub async fn get_member(&self, member_id: i64) -> AppResult<Member> {
        self.repository.members.get_by_id(member_id).await
    }

    /// Parse and verify a bearer token into session claims.
    pub fn verify_token(&self, token: &str) -> AppResult<SessionClaims> {
        SessionClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))
    }

    fn issue_session(
        &self,
        role: Role,
        actor_id: i64,
        email: &str,
        name: String,
    ) -> AppResult<LoginResponse> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: email.to_string(),
            actor_id,
            role,
            name: name.clone(),
            exp: (now + Duration::hours(self.config.jwt_expiration_hours)).timestamp(),
            iat: now.timestamp(),
        };
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;
        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            role,
            actor_id,
            name,
        })
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, hash: &str, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
