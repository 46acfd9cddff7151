mod common;

use biblos_server::error::AppError;
use biblos_server::models::member::CreateMember;
use biblos_server::models::session::{LoginRequest, Role, SessionClaims};

fn new_member() -> CreateMember {
    CreateMember {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada.lovelace@email.com".to_string(),
        phone: None,
        address: None,
        password: "correct horse battery".to_string(),
    }
}

#[tokio::test]
async fn created_member_can_log_in() {
    let (_pool, services) = common::setup().await;

    let member = services.auth.create_member(&new_member()).await.unwrap();

    let response = services
        .auth
        .login(&LoginRequest {
            email: "ada.lovelace@email.com".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.role, Role::Member);
    assert_eq!(response.actor_id, member.member_id);
    assert_eq!(response.name, "Ada Lovelace");
    assert_eq!(response.token_type, "Bearer");

    let claims = services.auth.verify_token(&response.token).unwrap();
    assert_eq!(claims.actor_id, member.member_id);
    assert_eq!(claims.role, Role::Member);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let (_pool, services) = common::setup().await;

    services.auth.create_member(&new_member()).await.unwrap();
    let err = services
        .auth
        .login(&LoginRequest {
            email: "ada.lovelace@email.com".to_string(),
            password: "incorrect horse".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authentication(_)));
}

#[tokio::test]
async fn unknown_email_is_rejected_like_a_bad_password() {
    let (_pool, services) = common::setup().await;

    let err = services
        .auth
        .login(&LoginRequest {
            email: "nobody@email.com".to_string(),
            password: "whatever!".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Authentication(_)));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let (_pool, services) = common::setup().await;

    services.auth.create_member(&new_member()).await.unwrap();
    let err = services.auth.create_member(&new_member()).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn weak_or_malformed_registrations_are_rejected() {
    let (_pool, services) = common::setup().await;

    let mut short_password = new_member();
    short_password.password = "short".to_string();
    let err = services.auth.create_member(&short_password).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut bad_email = new_member();
    bad_email.email = "not-an-email".to_string();
    let err = services.auth.create_member(&bad_email).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn password_hashes_are_salted_argon2() {
    let (_pool, services) = common::setup().await;

    let member = services.auth.create_member(&new_member()).await.unwrap();
    assert!(member.password_hash.starts_with("$argon2id$"));
    assert_ne!(member.password_hash, "correct horse battery");

    let other = services.auth.hash_password("correct horse battery").unwrap();
    assert_ne!(member.password_hash, other);
}

#[tokio::test]
async fn expired_tokens_are_rejected() {
    let (_pool, services) = common::setup().await;

    let claims = SessionClaims {
        sub: "ada.lovelace@email.com".to_string(),
        actor_id: 1,
        role: Role::Member,
        name: "Ada Lovelace".to_string(),
        exp: chrono::Utc::now().timestamp() - 3600,
        iat: chrono::Utc::now().timestamp() - 7200,
    };
    let token = claims
        .create_token("change-this-secret-in-production")
        .unwrap();
    assert!(services.auth.verify_token(&token).is_err());
}
