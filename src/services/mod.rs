//! Business logic services

pub mod auth;
pub mod catalog;
pub mod circulation;
pub mod events;
pub mod requests;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub circulation: circulation::CirculationService,
    pub events: events::EventsService,
    pub requests: requests::RequestsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            circulation: circulation::CirculationService::new(repository.clone()),
            events: events::EventsService::new(repository.clone()),
            requests: requests::RequestsService::new(repository),
        }
    }
}
