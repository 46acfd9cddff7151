//! Circulation repository: checkouts, returns and fines.
//!
//! Item status flips and late-fine issuance live in database triggers; this
//! layer runs the application-level eligibility checks and keeps each
//! operation inside a single transaction.

use chrono::{Duration, NaiveDate};
use sqlx::{Pool, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::borrowing::{Borrowing, BorrowingDetails, Fine, FineDetails, FineLedgerEntry};
use crate::models::enums::{FineStatus, ItemStatus};

/// Loan period applied to every checkout, in days.
pub const LOAN_PERIOD_DAYS: i64 = 14;

#[derive(Clone)]
pub struct BorrowingsRepository {
    pool: Pool<Sqlite>,
}

impl BorrowingsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, borrow_id: i64) -> AppResult<Borrowing> {
        sqlx::query_as::<_, Borrowing>("SELECT * FROM Borrowing WHERE BorrowID = ?")
            .bind(borrow_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrowing {} not found", borrow_id)))
    }

    /// Check an item out to a member. The availability check is repeated by
    /// a trigger and a partial unique index, so a racing checkout fails at
    /// the database even if it passes the read here.
    pub async fn checkout(
        &self,
        member_id: i64,
        item_id: i64,
        staff_id: Option<i64>,
        today: NaiveDate,
    ) -> AppResult<Borrowing> {
        let mut tx = self.pool.begin().await?;

        let status: Option<ItemStatus> =
            sqlx::query_scalar("SELECT Status FROM LibraryItem WHERE ItemID = ?")
                .bind(item_id)
                .fetch_optional(&mut *tx)
                .await?;
        let status =
            status.ok_or_else(|| AppError::NotFound(format!("Item {} not found", item_id)))?;
        if status != ItemStatus::Available {
            return Err(AppError::BusinessRule(format!(
                "Item {} is not available for borrowing",
                item_id
            )));
        }

        let member_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM Member WHERE MemberID = ?)")
                .bind(member_id)
                .fetch_one(&mut *tx)
                .await?;
        if !member_exists {
            return Err(AppError::NotFound(format!("Member {} not found", member_id)));
        }

        let due_date = today + Duration::days(LOAN_PERIOD_DAYS);
        let borrowing = sqlx::query_as::<_, Borrowing>(
            "INSERT INTO Borrowing (MemberID, ItemID, BorrowDate, DueDate, StaffID)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(member_id)
        .bind(item_id)
        .bind(today)
        .bind(due_date)
        .bind(staff_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(borrowing)
    }

    /// Record a return. Triggers flip the item back to Available and issue
    /// (or top up) the fine when the return is late; any fine now attached
    /// to the borrowing is returned alongside it.
    pub async fn return_item(
        &self,
        borrow_id: i64,
        today: NaiveDate,
    ) -> AppResult<(Borrowing, Option<Fine>)> {
        let mut tx = self.pool.begin().await?;

        let borrowing: Option<Borrowing> =
            sqlx::query_as("SELECT * FROM Borrowing WHERE BorrowID = ?")
                .bind(borrow_id)
                .fetch_optional(&mut *tx)
                .await?;
        let borrowing = borrowing
            .ok_or_else(|| AppError::NotFound(format!("Borrowing {} not found", borrow_id)))?;
        if borrowing.return_date.is_some() {
            return Err(AppError::BusinessRule(format!(
                "Borrowing {} has already been returned",
                borrow_id
            )));
        }

        sqlx::query("UPDATE Borrowing SET ReturnDate = ? WHERE BorrowID = ?")
            .bind(today)
            .bind(borrow_id)
            .execute(&mut *tx)
            .await?;

        let updated: Borrowing = sqlx::query_as("SELECT * FROM Borrowing WHERE BorrowID = ?")
            .bind(borrow_id)
            .fetch_one(&mut *tx)
            .await?;
        let fine: Option<Fine> = sqlx::query_as("SELECT * FROM Fine WHERE BorrowID = ?")
            .bind(borrow_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((updated, fine))
    }

    /// The member a fine belongs to, through its borrowing.
    pub async fn fine_member_id(&self, fine_id: i64) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT b.MemberID FROM Fine f JOIN Borrowing b ON f.BorrowID = b.BorrowID
             WHERE f.FineID = ?",
        )
        .bind(fine_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Fine {} not found", fine_id)))
    }

    pub async fn pay_fine(&self, fine_id: i64, today: NaiveDate) -> AppResult<Fine> {
        let mut tx = self.pool.begin().await?;

        let fine: Option<Fine> = sqlx::query_as("SELECT * FROM Fine WHERE FineID = ?")
            .bind(fine_id)
            .fetch_optional(&mut *tx)
            .await?;
        let fine =
            fine.ok_or_else(|| AppError::NotFound(format!("Fine {} not found", fine_id)))?;
        if fine.status == FineStatus::Paid {
            return Err(AppError::BusinessRule(format!(
                "Fine {} has already been paid",
                fine_id
            )));
        }

        let paid: Fine = sqlx::query_as(
            "UPDATE Fine SET Status = 'Paid', PaidDate = ? WHERE FineID = ? RETURNING *",
        )
        .bind(today)
        .bind(fine_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(paid)
    }

    /// Open borrowings for a member, soonest due first.
    pub async fn open_for_member(
        &self,
        member_id: i64,
        today: NaiveDate,
    ) -> AppResult<Vec<BorrowingDetails>> {
        let rows = sqlx::query_as::<_, BorrowingDetails>(
            "SELECT b.BorrowID AS borrow_id,
                    b.ItemID AS item_id,
                    i.Title AS title,
                    i.ItemType AS item_type,
                    b.BorrowDate AS borrow_date,
                    b.DueDate AS due_date,
                    b.ReturnDate AS return_date,
                    (b.DueDate < ?) AS overdue
             FROM Borrowing b
             JOIN LibraryItem i ON b.ItemID = i.ItemID
             WHERE b.MemberID = ? AND b.ReturnDate IS NULL
             ORDER BY b.DueDate ASC",
        )
        .bind(today)
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Full borrowing history for a member, newest first.
    pub async fn history_for_member(
        &self,
        member_id: i64,
        today: NaiveDate,
    ) -> AppResult<Vec<BorrowingDetails>> {
        let rows = sqlx::query_as::<_, BorrowingDetails>(
            "SELECT b.BorrowID AS borrow_id,
                    b.ItemID AS item_id,
                    i.Title AS title,
                    i.ItemType AS item_type,
                    b.BorrowDate AS borrow_date,
                    b.DueDate AS due_date,
                    b.ReturnDate AS return_date,
                    (b.ReturnDate IS NULL AND b.DueDate < ?) AS overdue
             FROM Borrowing b
             JOIN LibraryItem i ON b.ItemID = i.ItemID
             WHERE b.MemberID = ?
             ORDER BY b.BorrowDate DESC, b.BorrowID DESC",
        )
        .bind(today)
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Fines across all members, optionally filtered by status, newest first.
    pub async fn list_fines(&self, status: Option<FineStatus>) -> AppResult<Vec<FineLedgerEntry>> {
        let mut sql = "SELECT f.FineID AS fine_id,
                    f.BorrowID AS borrow_id,
                    b.MemberID AS member_id,
                    m.FirstName || ' ' || m.LastName AS member_name,
                    i.Title AS title,
                    f.Amount AS amount,
                    f.Status AS status,
                    f.IssuedDate AS issued_date,
                    f.PaidDate AS paid_date
             FROM Fine f
             JOIN Borrowing b ON f.BorrowID = b.BorrowID
             JOIN Member m ON b.MemberID = m.MemberID
             JOIN LibraryItem i ON b.ItemID = i.ItemID"
            .to_string();
        if status.is_some() {
            sql.push_str(" WHERE f.Status = ?");
        }
        sql.push_str(" ORDER BY f.IssuedDate DESC, f.FineID DESC");

        let mut q = sqlx::query_as::<_, FineLedgerEntry>(&sql);
        if let Some(status) = status {
            q = q.bind(status);
        }

        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Unpaid fines for a member, oldest first.
    pub async fn unpaid_fines_for_member(&self, member_id: i64) -> AppResult<Vec<FineDetails>> {
        let rows = sqlx::query_as::<_, FineDetails>(
            "SELECT f.FineID AS fine_id,
                    f.BorrowID AS borrow_id,
                    i.Title AS title,
                    f.Amount AS amount,
                    f.Status AS status,
                    f.IssuedDate AS issued_date,
                    b.DueDate AS due_date,
                    b.ReturnDate AS return_date
             FROM Fine f
             JOIN Borrowing b ON f.BorrowID = b.BorrowID
             JOIN LibraryItem i ON b.ItemID = i.ItemID
             WHERE b.MemberID = ? AND f.Status = 'Unpaid'
             ORDER BY f.IssuedDate ASC, f.FineID ASC",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
