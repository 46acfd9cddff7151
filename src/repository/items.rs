//! Catalog repository: polymorphic search over the item subtype tables and
//! transactional item intake.

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::error::{AppError, AppResult};
use crate::models::item::{DonateItem, ItemDetails, ItemQuery, ItemSummary, LibraryItem};

const DEFAULT_SEARCH_LIMIT: i64 = 50;

/// Shared projection joining the supertype to all five subtype tables.
/// `creator` picks the human-facing name column for each subtype.
const ITEM_SEARCH_SELECT: &str = "
    SELECT i.ItemID AS item_id,
           i.Title AS title,
           i.Status AS status,
           i.ItemType AS item_type,
           i.Location AS location,
           CASE i.ItemType
               WHEN 'Book' THEN b.Author
               WHEN 'Ebook' THEN e.Author
               WHEN 'Magazine' THEN mg.Publisher
               WHEN 'Journal' THEN j.Publisher
               WHEN 'Media' THEN md.Artist
           END AS creator
    FROM LibraryItem i
    LEFT JOIN Book b ON i.ItemID = b.ItemID
    LEFT JOIN Ebook e ON i.ItemID = e.ItemID
    LEFT JOIN Magazine mg ON i.ItemID = mg.ItemID
    LEFT JOIN Journal j ON i.ItemID = j.ItemID
    LEFT JOIN Media md ON i.ItemID = md.ItemID";

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Sqlite>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Search the catalog. All filters are optional and conjunctive.
    pub async fn search(&self, query: &ItemQuery) -> AppResult<Vec<ItemSummary>> {
        let mut conditions: Vec<&str> = Vec::new();

        if query.title.is_some() {
            conditions.push("i.Title LIKE ?");
        }
        if query.creator.is_some() {
            conditions.push(
                "(b.Author LIKE ? OR e.Author LIKE ? OR mg.Publisher LIKE ? \
                 OR j.Publisher LIKE ? OR md.Artist LIKE ?)",
            );
        }
        if query.item_type.is_some() {
            conditions.push("i.ItemType = ?");
        }

        let mut sql = ITEM_SEARCH_SELECT.to_string();
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY i.Title ASC LIMIT ?");

        let mut q = sqlx::query_as::<_, ItemSummary>(&sql);
        if let Some(title) = &query.title {
            q = q.bind(format!("%{}%", title));
        }
        if let Some(creator) = &query.creator {
            let pattern = format!("%{}%", creator);
            for _ in 0..5 {
                q = q.bind(pattern.clone());
            }
        }
        if let Some(item_type) = query.item_type {
            q = q.bind(item_type);
        }
        q = q.bind(query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT));

        let items = q.fetch_all(&self.pool).await?;
        Ok(items)
    }

    pub async fn get_summary(&self, item_id: i64) -> AppResult<ItemSummary> {
        let sql = format!("{} WHERE i.ItemID = ?", ITEM_SEARCH_SELECT);
        sqlx::query_as::<_, ItemSummary>(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", item_id)))
    }

    /// Insert a donated item. The supertype row and its subtype row are
    /// written in one transaction so a subtype failure leaves no orphan.
    pub async fn donate(&self, donation: &DonateItem, today: NaiveDate) -> AppResult<LibraryItem> {
        let mut tx = self.pool.begin().await?;

        let item_id: i64 = sqlx::query_scalar(
            "INSERT INTO LibraryItem (Title, PublicationDate, Status, AcquisitionDate, Location, ItemType)
             VALUES (?, ?, 'Available', ?, ?, ?)
             RETURNING ItemID",
        )
        .bind(&donation.title)
        .bind(donation.publication_date)
        .bind(today)
        .bind(&donation.location)
        .bind(donation.details.item_type())
        .fetch_one(&mut *tx)
        .await?;

        match &donation.details {
            ItemDetails::Book {
                isbn,
                author,
                publisher,
                genre,
                page_count,
                format,
            } => {
                sqlx::query(
                    "INSERT INTO Book (ItemID, ISBN, Author, Publisher, Genre, PageCount, Format)
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(item_id)
                .bind(isbn)
                .bind(author)
                .bind(publisher)
                .bind(genre)
                .bind(page_count)
                .bind(format)
                .execute(&mut *tx)
                .await?;
            }
            ItemDetails::Ebook {
                isbn,
                author,
                publisher,
                genre,
                file_format,
                file_size,
            } => {
                sqlx::query(
                    "INSERT INTO Ebook (ItemID, ISBN, Author, Publisher, Genre, FileFormat, FileSize)
                     VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(item_id)
                .bind(isbn)
                .bind(author)
                .bind(publisher)
                .bind(genre)
                .bind(file_format)
                .bind(file_size)
                .execute(&mut *tx)
                .await?;
            }
            ItemDetails::Magazine {
                issue_number,
                publisher,
                category,
                frequency,
            } => {
                sqlx::query(
                    "INSERT INTO Magazine (ItemID, IssueNumber, Publisher, Category, Frequency)
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(item_id)
                .bind(issue_number)
                .bind(publisher)
                .bind(category)
                .bind(frequency)
                .execute(&mut *tx)
                .await?;
            }
            ItemDetails::Journal {
                volume,
                issue,
                publisher,
                field,
                peer_reviewed,
            } => {
                sqlx::query(
                    "INSERT INTO Journal (ItemID, Volume, Issue, Publisher, Field, PeerReviewed)
                     VALUES (?, ?, ?, ?, ?, ?)",
                )
                .bind(item_id)
                .bind(volume)
                .bind(issue)
                .bind(publisher)
                .bind(field)
                .bind(peer_reviewed)
                .execute(&mut *tx)
                .await?;
            }
            ItemDetails::Media {
                media_type,
                artist,
                runtime,
                format,
            } => {
                sqlx::query(
                    "INSERT INTO Media (ItemID, MediaType, Artist, Runtime, Format)
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(item_id)
                .bind(media_type)
                .bind(artist)
                .bind(runtime)
                .bind(format)
                .execute(&mut *tx)
                .await?;
            }
        }

        let item = sqlx::query_as::<_, LibraryItem>("SELECT * FROM LibraryItem WHERE ItemID = ?")
            .bind(item_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(item)
    }
}
