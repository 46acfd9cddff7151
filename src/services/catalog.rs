//! Catalog operations: search and item intake.

use chrono::Utc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::item::{DonateItem, ItemDetails, ItemQuery, ItemSummary, LibraryItem};
use crate::repository::Repository;

const MAX_SEARCH_LIMIT: i64 = 200;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn search(&self, query: &ItemQuery) -> AppResult<Vec<ItemSummary>> {
        if let Some(limit) = query.limit {
            if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
                return Err(AppError::Validation(format!(
                    "limit must be between 1 and {}",
                    MAX_SEARCH_LIMIT
                )));
            }
        }
        self.repository.items.search(query).await
    }

    pub async fn get_item(&self, item_id: i64) -> AppResult<ItemSummary> {
        self.repository.items.get_summary(item_id).await
    }

    /// Accept a donated item into the catalog.
    pub async fn donate(&self, donation: &DonateItem) -> AppResult<LibraryItem> {
        donation.validate()?;
        match &donation.details {
            ItemDetails::Book { author, .. } | ItemDetails::Ebook { author, .. }
                if author.trim().is_empty() =>
            {
                return Err(AppError::Validation("author must not be empty".to_string()));
            }
            _ => {}
        }
        let today = Utc::now().date_naive();
        self.repository.items.donate(donation, today).await
    }
}
