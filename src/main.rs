//! Biblos Server - Community Library Circulation System
//!
//! A Rust REST API server for a single-branch community library.

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblos_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblos_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblos Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool. Foreign keys are off by default in
    // SQLite and the schema relies on them.
    let connect_options = SqliteConnectOptions::from_str(&format!(
        "sqlite://{}",
        config.database.path
    ))?
    .create_if_missing(true)
    .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect_with(connect_options)
        .await
        .expect("Failed to open database");

    tracing::info!("Opened database at {}", config.database.path);

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Members
        .route("/members", post(api::members::create_member))
        .route("/members/:id", get(api::members::get_member))
        .route("/members/:id/borrowings", get(api::members::get_open_borrowings))
        .route(
            "/members/:id/borrowings/history",
            get(api::members::get_borrowing_history),
        )
        .route("/members/:id/fines", get(api::members::get_unpaid_fines))
        .route("/members/:id/events", get(api::members::get_upcoming_events))
        .route(
            "/members/:id/acquisition-requests",
            get(api::members::get_acquisition_requests),
        )
        .route("/members/:id/help-requests", get(api::members::get_help_requests))
        .route("/members/:id/volunteer", get(api::requests::get_volunteer_profile))
        .route(
            "/members/:id/volunteer/status",
            put(api::requests::set_volunteer_status),
        )
        // Items (catalog)
        .route("/items", get(api::items::search_items))
        .route("/items/donations", post(api::items::donate_item))
        .route("/items/:id", get(api::items::get_item))
        // Borrowings
        .route("/borrowings", post(api::borrowings::create_borrowing))
        .route("/borrowings/:id/return", post(api::borrowings::return_borrowing))
        .route("/fines", get(api::borrowings::list_fines))
        .route("/fines/:id/pay", post(api::borrowings::pay_fine))
        // Events
        .route("/events", get(api::events::search_events))
        .route("/events", post(api::events::create_event))
        .route("/events/:id", get(api::events::get_event))
        .route(
            "/events/:id/registrations",
            post(api::events::register_for_event),
        )
        .route(
            "/events/:id/registrations/cancel",
            post(api::events::cancel_registration),
        )
        .route("/events/:id/attendees", get(api::events::get_attendees))
        .route("/attendance/:id", put(api::events::set_attendance_status))
        .route("/rooms", get(api::events::get_available_rooms))
        // Acquisition requests
        .route(
            "/acquisition-requests",
            post(api::requests::create_acquisition_request),
        )
        .route(
            "/acquisition-requests",
            get(api::requests::list_acquisition_requests),
        )
        .route(
            "/acquisition-requests/:id",
            put(api::requests::process_acquisition_request),
        )
        // Help requests
        .route("/help-requests", post(api::requests::create_help_request))
        .route("/help-requests", get(api::requests::list_help_requests))
        .route(
            "/help-requests/:id/assign",
            post(api::requests::assign_help_request),
        )
        .route(
            "/help-requests/:id/resolve",
            post(api::requests::resolve_help_request),
        )
        .route(
            "/help-requests/:id/status",
            put(api::requests::set_help_request_status),
        )
        // Volunteers
        .route("/volunteers", post(api::requests::enroll_volunteer))
        .route("/volunteers", get(api::requests::list_volunteers))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
