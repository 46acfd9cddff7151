//! Staff repository

use sqlx::{Pool, Sqlite};

use crate::error::AppResult;
use crate::models::staff::Staff;

#[derive(Clone)]
pub struct StaffRepository {
    pool: Pool<Sqlite>,
}

impl StaffRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>("SELECT * FROM Staff WHERE Email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(staff)
    }
}
