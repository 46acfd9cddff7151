//! Shared test setup: an in-memory database with the full schema, triggers
//! and seed data, plus the service stack on top of it.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use biblos_server::config::AuthConfig;
use biblos_server::repository::Repository;
use biblos_server::services::Services;

/// One connection only: every pool connection to an in-memory SQLite
/// database would otherwise see its own empty database.
pub async fn setup() -> (Pool<Sqlite>, Services) {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid connection string")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(options)
        .await
        .expect("open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    let repository = Repository::new(pool.clone());
    let services = Services::new(repository, AuthConfig::default());
    (pool, services)
}
