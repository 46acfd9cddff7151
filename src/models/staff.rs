//! Staff model

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Staff record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Staff {
    #[sqlx(rename = "StaffID")]
    pub staff_id: i64,
    #[sqlx(rename = "FirstName")]
    pub first_name: String,
    #[sqlx(rename = "LastName")]
    pub last_name: String,
    #[sqlx(rename = "Position")]
    pub position: String,
    #[sqlx(rename = "Department")]
    pub department: String,
    #[sqlx(rename = "Email")]
    pub email: String,
    #[sqlx(rename = "Phone")]
    pub phone: Option<String>,
    #[sqlx(rename = "HireDate")]
    pub hire_date: NaiveDate,
    #[sqlx(rename = "Salary")]
    #[serde(skip_serializing)]
    pub salary: Option<f64>,
    #[sqlx(rename = "Schedule")]
    pub schedule: Option<String>,
    #[sqlx(rename = "PasswordHash")]
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl Staff {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
