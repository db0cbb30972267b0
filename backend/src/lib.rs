//! # Injection Tracker Backend
//!
//! Contains all non-UI logic for the injection tracker.
//!
//! This crate is the orchestration layer that brings together:
//! - **Domain**: Business rules for injections, side effects, and analytics
//! - **Storage**: The record store with its remote and local CSV sources
//! - **IO**: The REST interface exposed to dashboard frontends
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Dashboard frontend
//!     ↓
//! IO Layer (REST API, handlers, mappers)
//!     ↓
//! Domain Layer (services, metrics)
//!     ↓
//! Storage Layer (record store, sheet client, CSV files)
//! ```
//!
//! The record store reads from the first source that answers (remote sheet
//! when configured, local CSV otherwise) and caches the result briefly, so
//! the REST layer never blocks on a slow spreadsheet service twice in a row.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{AnalyticsService, InjectionService, SideEffectService};
use crate::storage::{CsvConnection, RecordStore, TrackerConfig};

pub use domain::*;
pub use io::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub injection_service: InjectionService,
    pub side_effect_service: SideEffectService,
    pub analytics_service: AnalyticsService,
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            injection_service: InjectionService::new(store.clone()),
            side_effect_service: SideEffectService::new(store.clone()),
            analytics_service: AnalyticsService::new(store.clone()),
            store,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up local storage");
    let connection = CsvConnection::new_default()?;

    info!("Loading tracker configuration");
    let config = TrackerConfig::load(&connection.config_file_path());

    info!("Setting up application state");
    let store = Arc::new(RecordStore::from_config(&config, connection));
    Ok(AppState::new(store))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the dashboard frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route("/injections", get(io::list_injections).post(io::log_injection))
        .route(
            "/side-effects",
            get(io::list_side_effects).post(io::log_side_effect),
        )
        .route("/analytics", get(io::get_analytics))
        .route("/data/refresh", post(io::refresh_data));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
