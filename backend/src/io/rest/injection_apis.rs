//! # REST API for Injections
//!
//! Endpoints for logging new injections and listing recent ones.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::domain::commands::injections::InjectionListQuery;
use crate::io::rest::mappers::injection_mapper::InjectionMapper;
use crate::AppState;
use shared::{InjectionListResponse, LogInjectionRequest, LogInjectionResponse};

// Query parameters for the injection listing API
#[derive(Debug, Deserialize)]
pub struct InjectionHistoryQuery {
    pub user: Option<String>,
    pub limit: Option<u32>,
}

/// List the most recent injections, newest first
pub async fn list_injections(
    State(state): State<AppState>,
    Query(query): Query<InjectionHistoryQuery>,
) -> impl IntoResponse {
    info!("GET /api/injections - query: {:?}", query);

    let request = InjectionListQuery {
        user: query.user,
        limit: query.limit,
    };

    match state.injection_service.list_recent(request).await {
        Ok(result) => {
            let response = InjectionListResponse {
                injections: result
                    .injections
                    .into_iter()
                    .map(InjectionMapper::to_dto)
                    .collect(),
                total_count: result.total_count,
                source: result.source.to_string(),
                warnings: result.warnings,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list injections: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing injections").into_response()
        }
    }
}

/// Record a new injection
pub async fn log_injection(
    State(state): State<AppState>,
    Json(request): Json<LogInjectionRequest>,
) -> impl IntoResponse {
    info!("POST /api/injections - request: {:?}", request);

    let command = InjectionMapper::to_command(request);
    match state.injection_service.log_injection(command).await {
        Ok(injection) => {
            let date_text = injection.date.map(|date| date.to_string()).unwrap_or_default();
            let response = LogInjectionResponse {
                injection: InjectionMapper::to_dto(injection),
                success_message: format!("Injection logged for {}", date_text),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to log injection: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
