//! Member (patron) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Member record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Member {
    #[sqlx(rename = "MemberID")]
    pub member_id: i64,
    #[sqlx(rename = "FirstName")]
    pub first_name: String,
    #[sqlx(rename = "LastName")]
    pub last_name: String,
    #[sqlx(rename = "Email")]
    pub email: String,
    #[sqlx(rename = "Phone")]
    pub phone: Option<String>,
    #[sqlx(rename = "Address")]
    pub address: Option<String>,
    #[sqlx(rename = "MembershipDate")]
    pub membership_date: NaiveDate,
    #[sqlx(rename = "PasswordHash")]
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create member request (staff-side registration)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMember {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 8))]
    pub password: String,
}
