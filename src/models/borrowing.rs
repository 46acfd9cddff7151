//! Borrowing and fine models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{FineStatus, ItemType};

/// Borrowing record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Borrowing {
    #[sqlx(rename = "BorrowID")]
    pub borrow_id: i64,
    #[sqlx(rename = "MemberID")]
    pub member_id: i64,
    #[sqlx(rename = "ItemID")]
    pub item_id: i64,
    #[sqlx(rename = "BorrowDate")]
    pub borrow_date: NaiveDate,
    #[sqlx(rename = "DueDate")]
    pub due_date: NaiveDate,
    #[sqlx(rename = "ReturnDate")]
    pub return_date: Option<NaiveDate>,
    #[sqlx(rename = "StaffID")]
    pub staff_id: Option<i64>,
}

impl Borrowing {
    /// An open borrowing has no return date yet
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Borrowing joined with its item, for account views
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowingDetails {
    pub borrow_id: i64,
    pub item_id: i64,
    pub title: String,
    pub item_type: ItemType,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub overdue: bool,
}

/// Create borrowing request. `member_id` is required when a staff session
/// processes the checkout; member sessions always borrow for themselves.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBorrowing {
    pub item_id: i64,
    pub member_id: Option<i64>,
}

/// Fine record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Fine {
    #[sqlx(rename = "FineID")]
    pub fine_id: i64,
    #[sqlx(rename = "BorrowID")]
    pub borrow_id: i64,
    #[sqlx(rename = "Amount")]
    pub amount: f64,
    #[sqlx(rename = "Status")]
    pub status: FineStatus,
    #[sqlx(rename = "IssuedDate")]
    pub issued_date: NaiveDate,
    #[sqlx(rename = "PaidDate")]
    pub paid_date: Option<NaiveDate>,
}

/// Fine joined with its member and item, for the staff fine ledger
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FineLedgerEntry {
    pub fine_id: i64,
    pub borrow_id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub title: String,
    pub amount: f64,
    pub status: FineStatus,
    pub issued_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// Fine ledger with the summed amount of the listed fines
#[derive(Debug, Serialize, ToSchema)]
pub struct FineLedger {
    pub fines: Vec<FineLedgerEntry>,
    pub total: f64,
}

/// Fine joined with its borrowing and item, for account views
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct FineDetails {
    pub fine_id: i64,
    pub borrow_id: i64,
    pub title: String,
    pub amount: f64,
    pub status: FineStatus,
    pub issued_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}
