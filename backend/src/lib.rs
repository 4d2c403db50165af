//! # Dojo Portal Backend
//!
//! Student registration, belt fee schedules and fee reporting for a
//! martial-arts school, served as a local JSON API.
//!
//! ## Architecture
//!
//! ```text
//! Presentation layer (browser)
//!     ↓
//! REST layer (axum handlers)
//!     ↓
//! Domain layer (catalog, registration, aggregation)
//!     ↓
//! Storage layer (key-value snapshot in SQLite)
//! ```
//!
//! The whole student set is one JSON snapshot under a single key. It is read
//! once at start-up and rewritten after every registration.

pub mod config;
pub mod db;
pub mod domain;
pub mod rest;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::db::DbConnection;
use crate::domain::{DirectoryService, RegistrationService, StudentStore};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: StudentStore,
    pub registration_service: RegistrationService,
    pub directory_service: DirectoryService,
}

impl AppState {
    pub fn new(store: StudentStore, config: &AppConfig) -> Self {
        Self {
            registration_service: RegistrationService::new(store.clone()),
            directory_service: DirectoryService::new(store.clone(), config.fee_tier_policy),
            store,
        }
    }
}

/// Open storage, load the student snapshot and wire up the services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Loading student records from '{}'", config.storage_key);
    let store = StudentStore::open(db, config.storage_key.clone()).await?;

    info!("Fee tier policy: {:?}", config.fee_tier_policy);
    Ok(AppState::new(store, config))
}

/// Build the router with every API route under `/api`
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let cors = match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any origin", config.cors_origin);
            CorsLayer::new().allow_origin(Any)
        }
    }
    .allow_methods([Method::GET, Method::POST])
    .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/belts", get(rest::list_belts))
        .route("/belts/:id", get(rest::get_belt))
        .route("/students", get(rest::list_students).post(rest::register_student))
        .route("/students/table", get(rest::get_student_table))
        .route("/students/stats", get(rest::get_student_stats))
        .route("/summary", get(rest::get_summary))
        .route("/analytics/belts", get(rest::get_belt_analytics));

    let router = Router::new().nest("/api", api_routes);
    let router = match &config.static_dir {
        Some(dir) => {
            info!("Serving presentation layer from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    router.layer(cors).with_state(app_state)
}
