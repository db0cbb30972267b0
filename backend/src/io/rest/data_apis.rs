//! # REST API for Data Management
//!
//! Endpoint for forcing a reload of the record store, bypassing the cache.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::info;

use crate::AppState;
use shared::RefreshDataResponse;

/// Drop the cached dataset and reload from the configured sources
pub async fn refresh_data(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/data/refresh");

    let outcome = state.store.reload().await;
    let response = RefreshDataResponse {
        source: outcome.source.to_string(),
        injection_count: outcome.dataset.injections.len(),
        side_effect_count: outcome.dataset.side_effects.len(),
        warnings: outcome.warnings,
        success_message: format!("Data refreshed from the {} source", outcome.source),
    };

    (StatusCode::OK, Json(response)).into_response()
}
