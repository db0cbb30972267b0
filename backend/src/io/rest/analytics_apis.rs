//! # REST API for Analytics
//!
//! Endpoint serving the derived chart data: weight and dosage series with
//! their overlays, timeline markers, and the headline summary.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::domain::commands::analytics::AnalyticsQuery;
use crate::io::rest::mappers::analytics_mapper::AnalyticsMapper;
use crate::AppState;

// Query parameters for the analytics API
#[derive(Debug, Deserialize)]
pub struct AnalyticsRequestQuery {
    pub user: Option<String>,
}

/// Build the analytics report for the dashboard charts
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsRequestQuery>,
) -> impl IntoResponse {
    info!("GET /api/analytics - query: {:?}", query);

    let request = AnalyticsQuery { user: query.user };

    match state.analytics_service.build_report(request).await {
        Ok(report) => (StatusCode::OK, Json(AnalyticsMapper::to_dto(report))).into_response(),
        Err(e) => {
            error!("Failed to build analytics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error building analytics").into_response()
        }
    }
}
