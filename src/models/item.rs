//! Library item models (supertype + the five subtype payloads)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{BookFormat, ItemStatus, ItemType, MediaKind};

/// LibraryItem supertype row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LibraryItem {
    #[sqlx(rename = "ItemID")]
    pub item_id: i64,
    #[sqlx(rename = "Title")]
    pub title: String,
    #[sqlx(rename = "PublicationDate")]
    pub publication_date: Option<NaiveDate>,
    #[sqlx(rename = "Status")]
    pub status: ItemStatus,
    #[sqlx(rename = "AcquisitionDate")]
    pub acquisition_date: Option<NaiveDate>,
    #[sqlx(rename = "Location")]
    pub location: Option<String>,
    #[sqlx(rename = "ItemType")]
    pub item_type: ItemType,
}

/// Uniform search projection over all item subtypes.
/// `creator` is the Author (Book/Ebook), Publisher (Magazine/Journal) or
/// Artist (Media) depending on the subtype.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ItemSummary {
    pub item_id: i64,
    pub title: String,
    pub status: ItemStatus,
    pub item_type: ItemType,
    pub location: Option<String>,
    pub creator: Option<String>,
}

/// Query parameters for catalog search
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ItemQuery {
    /// Case-insensitive title substring
    pub title: Option<String>,
    /// Case-insensitive creator substring (author, publisher or artist)
    pub creator: Option<String>,
    /// Exact item type
    pub item_type: Option<ItemType>,
    /// Row cap (default 50)
    pub limit: Option<i64>,
}

/// Subtype payload for item intake, tagged by the discriminator
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "item_type")]
pub enum ItemDetails {
    Book {
        isbn: Option<String>,
        author: String,
        publisher: Option<String>,
        genre: Option<String>,
        page_count: Option<i64>,
        format: Option<BookFormat>,
    },
    Ebook {
        isbn: Option<String>,
        author: String,
        publisher: Option<String>,
        genre: Option<String>,
        file_format: Option<String>,
        file_size: Option<String>,
    },
    Magazine {
        issue_number: Option<String>,
        publisher: Option<String>,
        category: Option<String>,
        frequency: Option<String>,
    },
    Journal {
        volume: Option<String>,
        issue: Option<String>,
        publisher: Option<String>,
        field: Option<String>,
        peer_reviewed: Option<bool>,
    },
    Media {
        media_type: Option<MediaKind>,
        artist: Option<String>,
        runtime: Option<String>,
        format: Option<String>,
    },
}

impl ItemDetails {
    /// The discriminator this payload belongs to
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemDetails::Book { .. } => ItemType::Book,
            ItemDetails::Ebook { .. } => ItemType::Ebook,
            ItemDetails::Magazine { .. } => ItemType::Magazine,
            ItemDetails::Journal { .. } => ItemType::Journal,
            ItemDetails::Media { .. } => ItemType::Media,
        }
    }
}

/// Donation (item intake) request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DonateItem {
    #[validate(length(min = 1))]
    pub title: String,
    pub publication_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub details: ItemDetails,
}
