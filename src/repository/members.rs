//! Member repository

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::member::{CreateMember, Member};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Sqlite>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, member_id: i64) -> AppResult<Member> {
        sqlx::query_as::<_, Member>("SELECT * FROM Member WHERE MemberID = ?")
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", member_id)))
    }

    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM Member WHERE Email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    /// Insert a new member. The password hash is computed by the auth
    /// service before it reaches this layer.
    pub async fn create(
        &self,
        data: &CreateMember,
        password_hash: &str,
        today: NaiveDate,
    ) -> AppResult<Member> {
        let mut tx = self.pool.begin().await?;

        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM Member WHERE Email = ?)")
                .bind(&data.email)
                .fetch_one(&mut *tx)
                .await?;
        if taken {
            return Err(AppError::Conflict(format!(
                "A member with email {} already exists",
                data.email
            )));
        }

        let member = sqlx::query_as::<_, Member>(
            "INSERT INTO Member (FirstName, LastName, Email, Phone, Address, MembershipDate, PasswordHash)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .bind(today)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(member)
    }
}
