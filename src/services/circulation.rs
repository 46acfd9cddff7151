//! Circulation operations: checkouts, returns, fines and account views.

use chrono::Utc;

use crate::error::AppResult;
use crate::models::borrowing::{Borrowing, BorrowingDetails, Fine, FineDetails, FineLedger};
use crate::models::enums::FineStatus;
use crate::repository::Repository;

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check an item out to a member. `staff_id` is recorded when a staff
    /// session processes the checkout at the desk.
    pub async fn borrow(
        &self,
        member_id: i64,
        item_id: i64,
        staff_id: Option<i64>,
    ) -> AppResult<Borrowing> {
        let today = Utc::now().date_naive();
        self.repository
            .borrowings
            .checkout(member_id, item_id, staff_id, today)
            .await
    }

    /// Record a return, yielding the updated borrowing and the fine the
    /// late-return trigger issued, if any.
    pub async fn return_item(&self, borrow_id: i64) -> AppResult<(Borrowing, Option<Fine>)> {
        let today = Utc::now().date_naive();
        self.repository.borrowings.return_item(borrow_id, today).await
    }

    pub async fn get_borrowing(&self, borrow_id: i64) -> AppResult<Borrowing> {
        self.repository.borrowings.get_by_id(borrow_id).await
    }

    pub async fn pay_fine(&self, fine_id: i64) -> AppResult<Fine> {
        let today = Utc::now().date_naive();
        self.repository.borrowings.pay_fine(fine_id, today).await
    }

    /// The member a fine belongs to, for access checks.
    pub async fn fine_member_id(&self, fine_id: i64) -> AppResult<i64> {
        self.repository.borrowings.fine_member_id(fine_id).await
    }

    pub async fn open_borrowings(&self, member_id: i64) -> AppResult<Vec<BorrowingDetails>> {
        self.repository.members.get_by_id(member_id).await?;
        let today = Utc::now().date_naive();
        self.repository.borrowings.open_for_member(member_id, today).await
    }

    pub async fn borrowing_history(&self, member_id: i64) -> AppResult<Vec<BorrowingDetails>> {
        self.repository.members.get_by_id(member_id).await?;
        let today = Utc::now().date_naive();
        self.repository
            .borrowings
            .history_for_member(member_id, today)
            .await
    }

    /// Fines across all members with the summed amount, for staff review.
    pub async fn list_fines(&self, status: Option<FineStatus>) -> AppResult<FineLedger> {
        let fines = self.repository.borrowings.list_fines(status).await?;
        let total = fines.iter().map(|f| f.amount).sum();
        Ok(FineLedger { fines, total })
    }

    pub async fn unpaid_fines(&self, member_id: i64) -> AppResult<Vec<FineDetails>> {
        self.repository.members.get_by_id(member_id).await?;
        self.repository.borrowings.unpaid_fines_for_member(member_id).await
    }
}
