//! Repository layer for database operations

pub mod borrowings;
pub mod events;
pub mod items;
pub mod members;
pub mod requests;
pub mod staff;

use sqlx::{Pool, Sqlite};

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub members: members::MembersRepository,
    pub staff: staff::StaffRepository,
    pub items: items::ItemsRepository,
    pub borrowings: borrowings::BorrowingsRepository,
    pub events: events::EventsRepository,
    pub requests: requests::RequestsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            members: members::MembersRepository::new(pool.clone()),
            staff: staff::StaffRepository::new(pool.clone()),
            items: items::ItemsRepository::new(pool.clone()),
            borrowings: borrowings::BorrowingsRepository::new(pool.clone()),
            events: events::EventsRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            pool,
        }
    }
}
