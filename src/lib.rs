//! Biblos - Community Library Circulation Server
//!
//! A REST JSON API for a single-branch community library: catalog search,
//! circulation with fines, events with capacity limits, and member services
//! such as acquisition requests, help requests and volunteering. Business
//! invariants that must hold under concurrency (item availability, event
//! capacity, late fines) are enforced by database triggers and constraints;
//! the service layer provides the readable errors.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
