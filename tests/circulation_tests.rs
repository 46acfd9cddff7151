mod common;

use biblos_server::error::AppError;
use biblos_server::models::enums::{FineStatus, ItemStatus};
use chrono::{Duration, NaiveDate, Utc};

// Seed facts used below: items 1-10 are the classic books, all Available
// except the ones held by the seven open borrowings (items 3, 7, 12, 15,
// 35, 45, 50). Fine 1 is the manual 2.50 fine on borrowing 3 (member 3).

#[tokio::test]
async fn borrow_flips_item_to_borrowed_and_sets_due_date() {
    let (pool, services) = common::setup().await;

    let borrowing = services.circulation.borrow(1, 2, None).await.unwrap();
    let today = Utc::now().date_naive();
    assert_eq!(borrowing.member_id, 1);
    assert_eq!(borrowing.item_id, 2);
    assert_eq!(borrowing.borrow_date, today);
    assert_eq!(borrowing.due_date, today + Duration::days(14));
    assert!(borrowing.is_open());

    let status: ItemStatus =
        sqlx::query_scalar("SELECT Status FROM LibraryItem WHERE ItemID = 2")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, ItemStatus::Borrowed);
}

#[tokio::test]
async fn borrowed_item_cannot_be_borrowed_again() {
    let (_pool, services) = common::setup().await;

    services.circulation.borrow(1, 2, None).await.unwrap();
    let err = services.circulation.borrow(4, 2, None).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn borrow_unknown_item_or_member_is_not_found() {
    let (_pool, services) = common::setup().await;

    let err = services.circulation.borrow(1, 9999, None).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = services.circulation.borrow(9999, 2, None).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn on_time_return_issues_no_fine() {
    let (pool, services) = common::setup().await;

    let borrowing = services.circulation.borrow(1, 2, None).await.unwrap();
    let (returned, fine) = services
        .circulation
        .return_item(borrowing.borrow_id)
        .await
        .unwrap();
    assert!(returned.return_date.is_some());
    assert!(fine.is_none());

    let status: ItemStatus =
        sqlx::query_scalar("SELECT Status FROM LibraryItem WHERE ItemID = 2")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, ItemStatus::Available);
}

#[tokio::test]
async fn returning_twice_fails() {
    let (_pool, services) = common::setup().await;

    let borrowing = services.circulation.borrow(1, 2, None).await.unwrap();
    services.circulation.return_item(borrowing.borrow_id).await.unwrap();
    let err = services
        .circulation
        .return_item(borrowing.borrow_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn late_return_issues_fine_at_fifty_cents_per_day() {
    let (pool, services) = common::setup().await;

    // Six days late: 2025-04-30 against a 2025-04-24 due date.
    sqlx::query(
        "INSERT INTO Borrowing (MemberID, ItemID, BorrowDate, DueDate, StaffID)
         VALUES (1, 2, '2025-04-10', '2025-04-24', NULL)",
    )
    .execute(&pool)
    .await
    .unwrap();
    let borrow_id: i64 = sqlx::query_scalar("SELECT last_insert_rowid()")
        .fetch_one(&pool)
        .await
        .unwrap();

    sqlx::query("UPDATE Borrowing SET ReturnDate = '2025-04-30' WHERE BorrowID = ?")
        .bind(borrow_id)
        .execute(&pool)
        .await
        .unwrap();

    let fine = services.circulation.unpaid_fines(1).await.unwrap();
    let issued = fine.iter().find(|f| f.borrow_id == borrow_id).unwrap();
    assert_eq!(issued.amount, 3.00);
    assert_eq!(issued.status, FineStatus::Unpaid);
    assert_eq!(
        issued.issued_date,
        NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()
    );

    let status: ItemStatus =
        sqlx::query_scalar("SELECT Status FROM LibraryItem WHERE ItemID = 2")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, ItemStatus::Available);
}

#[tokio::test]
async fn late_return_reuses_manual_fine_row() {
    let (pool, _services) = common::setup().await;

    sqlx::query(
        "INSERT INTO Borrowing (MemberID, ItemID, BorrowDate, DueDate, StaffID)
         VALUES (1, 2, '2025-04-10', '2025-04-24', NULL)",
    )
    .execute(&pool)
    .await
    .unwrap();
    let borrow_id: i64 = sqlx::query_scalar("SELECT last_insert_rowid()")
        .fetch_one(&pool)
        .await
        .unwrap();

    // A manual damage fine already exists for the borrowing.
    sqlx::query(
        "INSERT INTO Fine (BorrowID, Amount, Status, IssuedDate)
         VALUES (?, 1.00, 'Unpaid', '2025-04-20')",
    )
    .bind(borrow_id)
    .execute(&pool)
    .await
    .unwrap();

    sqlx::query("UPDATE Borrowing SET ReturnDate = '2025-04-30' WHERE BorrowID = ?")
        .bind(borrow_id)
        .execute(&pool)
        .await
        .unwrap();

    let (count, amount): (i64, f64) =
        sqlx::query_as("SELECT COUNT(*), MAX(Amount) FROM Fine WHERE BorrowID = ?")
            .bind(borrow_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
    assert_eq!(amount, 3.00);
}

#[tokio::test]
async fn paying_a_fine_sets_paid_date_and_cannot_repeat() {
    let (_pool, services) = common::setup().await;

    let paid = services.circulation.pay_fine(1).await.unwrap();
    assert_eq!(paid.status, FineStatus::Paid);
    assert_eq!(paid.paid_date, Some(Utc::now().date_naive()));

    let err = services.circulation.pay_fine(1).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));
}

#[tokio::test]
async fn open_borrowings_view_marks_overdue_loans() {
    let (_pool, services) = common::setup().await;

    // Member 1 holds item 7 since 2025-05-12, long past due by now.
    let open = services.circulation.open_borrowings(1).await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].item_id, 7);
    assert!(open[0].overdue);
    assert!(open[0].return_date.is_none());
}

#[tokio::test]
async fn borrowing_history_includes_closed_loans() {
    let (_pool, services) = common::setup().await;

    // Member 1: one returned loan (item 1) and one open loan (item 7).
    let history = services.circulation.borrowing_history(1).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().any(|b| b.item_id == 1 && b.return_date.is_some()));
    assert!(history.iter().any(|b| b.item_id == 7 && b.return_date.is_none()));
}

#[tokio::test]
async fn unpaid_fines_view_joins_the_item() {
    let (_pool, services) = common::setup().await;

    let fines = services.circulation.unpaid_fines(3).await.unwrap();
    assert_eq!(fines.len(), 1);
    assert_eq!(fines[0].amount, 2.50);
    assert_eq!(fines[0].title, "The Da Vinci Code");
}

#[tokio::test]
async fn fine_ledger_spans_all_members_and_sums_the_amounts() {
    let (_pool, services) = common::setup().await;

    let unpaid = services
        .circulation
        .list_fines(Some(FineStatus::Unpaid))
        .await
        .unwrap();
    assert_eq!(unpaid.fines.len(), 1);
    assert_eq!(unpaid.fines[0].fine_id, 1);
    assert_eq!(unpaid.fines[0].member_name, "Robert Johnson");
    assert_eq!(unpaid.fines[0].title, "The Da Vinci Code");
    assert_eq!(unpaid.total, 2.50);

    services.circulation.pay_fine(1).await.unwrap();

    let unpaid = services
        .circulation
        .list_fines(Some(FineStatus::Unpaid))
        .await
        .unwrap();
    assert!(unpaid.fines.is_empty());
    assert_eq!(unpaid.total, 0.0);

    let all = services.circulation.list_fines(None).await.unwrap();
    assert_eq!(all.fines.len(), 1);
    assert_eq!(all.fines[0].status, FineStatus::Paid);
}

#[tokio::test]
async fn item_is_borrowed_iff_it_has_an_open_borrowing() {
    let (pool, services) = common::setup().await;

    // Churn some state first.
    let b = services.circulation.borrow(1, 2, None).await.unwrap();
    services.circulation.return_item(b.borrow_id).await.unwrap();
    services.circulation.borrow(2, 4, None).await.unwrap();

    let mismatches: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM LibraryItem i
         WHERE (i.Status = 'Borrowed') != (
             SELECT COUNT(*) > 0 FROM Borrowing b
             WHERE b.ItemID = i.ItemID AND b.ReturnDate IS NULL
         )",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(mismatches, 0);

    let double_open: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM (
             SELECT ItemID FROM Borrowing WHERE ReturnDate IS NULL
             GROUP BY ItemID HAVING COUNT(*) > 1
         )",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(double_open, 0);
}
