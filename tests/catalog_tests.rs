mod common;

use biblos_server::error::AppError;
use biblos_server::models::enums::{BookFormat, ItemStatus, ItemType};
use biblos_server::models::item::{DonateItem, ItemDetails, ItemQuery};

#[tokio::test]
async fn search_by_title_substring_is_case_insensitive() {
    let (_pool, services) = common::setup().await;

    let query = ItemQuery {
        title: Some("hobbit".to_string()),
        ..Default::default()
    };
    let items = services.catalog.search(&query).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "The Hobbit");
    assert_eq!(items[0].creator.as_deref(), Some("J.R.R. Tolkien"));
}

#[tokio::test]
async fn search_by_creator_spans_all_subtypes() {
    let (_pool, services) = common::setup().await;

    let query = ItemQuery {
        creator: Some("Tolkien".to_string()),
        ..Default::default()
    };
    let items = services.catalog.search(&query).await.unwrap();
    // The Hobbit and The Lord of the Rings.
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.item_type == ItemType::Book));
}

#[tokio::test]
async fn search_by_type_returns_only_that_subtype() {
    let (_pool, services) = common::setup().await;

    let query = ItemQuery {
        item_type: Some(ItemType::Magazine),
        ..Default::default()
    };
    let items = services.catalog.search(&query).await.unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|i| i.item_type == ItemType::Magazine));
}

#[tokio::test]
async fn search_results_are_ordered_by_title() {
    let (_pool, services) = common::setup().await;

    let items = services.catalog.search(&ItemQuery::default()).await.unwrap();
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
}

#[tokio::test]
async fn search_rejects_out_of_range_limit() {
    let (_pool, services) = common::setup().await;

    let query = ItemQuery {
        limit: Some(0),
        ..Default::default()
    };
    let err = services.catalog.search(&query).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn donated_book_is_available_and_searchable() {
    let (pool, services) = common::setup().await;

    let donation = DonateItem {
        title: "The Name of the Wind".to_string(),
        publication_date: Some(chrono::NaiveDate::from_ymd_opt(2007, 3, 27).unwrap()),
        location: Some("Fantasy Section - Shelf 1C".to_string()),
        details: ItemDetails::Book {
            isbn: Some("9780756404079".to_string()),
            author: "Patrick Rothfuss".to_string(),
            publisher: Some("DAW Books".to_string()),
            genre: Some("Fantasy".to_string()),
            page_count: Some(662),
            format: Some(BookFormat::Hardcover),
        },
    };
    let item = services.catalog.donate(&donation).await.unwrap();
    assert_eq!(item.status, ItemStatus::Available);
    assert_eq!(item.item_type, ItemType::Book);

    let author: String = sqlx::query_scalar("SELECT Author FROM Book WHERE ItemID = ?")
        .bind(item.item_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(author, "Patrick Rothfuss");

    let query = ItemQuery {
        creator: Some("Rothfuss".to_string()),
        ..Default::default()
    };
    let found = services.catalog.search(&query).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].item_id, item.item_id);
}

#[tokio::test]
async fn failed_donation_leaves_no_orphan_item() {
    let (pool, services) = common::setup().await;

    let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM LibraryItem")
        .fetch_one(&pool)
        .await
        .unwrap();

    // ISBN of the seeded copy of The Great Gatsby; the unique constraint
    // rejects the subtype insert after the supertype row was written.
    let donation = DonateItem {
        title: "The Great Gatsby (duplicate)".to_string(),
        publication_date: None,
        location: None,
        details: ItemDetails::Book {
            isbn: Some("9780743273565".to_string()),
            author: "F. Scott Fitzgerald".to_string(),
            publisher: None,
            genre: None,
            page_count: None,
            format: None,
        },
    };
    let err = services.catalog.donate(&donation).await.unwrap_err();
    assert!(matches!(err, AppError::Database(_)));

    let after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM LibraryItem")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn donation_with_blank_author_is_rejected() {
    let (_pool, services) = common::setup().await;

    let donation = DonateItem {
        title: "Anonymous Work".to_string(),
        publication_date: None,
        location: None,
        details: ItemDetails::Book {
            isbn: None,
            author: "   ".to_string(),
            publisher: None,
            genre: None,
            page_count: None,
            format: None,
        },
    };
    let err = services.catalog.donate(&donation).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn get_item_surfaces_not_found() {
    let (_pool, services) = common::setup().await;

    let item = services.catalog.get_item(1).await.unwrap();
    assert_eq!(item.title, "The Great Gatsby");

    let err = services.catalog.get_item(9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
