//! # REST API for Side Effects
//!
//! Endpoints for logging side effect notes and listing recent ones.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};
use serde::Deserialize;

use crate::domain::commands::side_effects::SideEffectListQuery;
use crate::io::rest::mappers::side_effect_mapper::SideEffectMapper;
use crate::AppState;
use shared::{LogSideEffectRequest, LogSideEffectResponse, SideEffectListResponse};

// Query parameters for the side effect listing API
#[derive(Debug, Deserialize)]
pub struct SideEffectHistoryQuery {
    pub user: Option<String>,
    pub limit: Option<u32>,
}

/// List the most recent side effect notes, newest first
pub async fn list_side_effects(
    State(state): State<AppState>,
    Query(query): Query<SideEffectHistoryQuery>,
) -> impl IntoResponse {
    info!("GET /api/side-effects - query: {:?}", query);

    let request = SideEffectListQuery {
        user: query.user,
        limit: query.limit,
    };

    match state.side_effect_service.list_recent(request).await {
        Ok(result) => {
            let response = SideEffectListResponse {
                side_effects: result
                    .side_effects
                    .into_iter()
                    .map(SideEffectMapper::to_dto)
                    .collect(),
                total_count: result.total_count,
                source: result.source.to_string(),
                warnings: result.warnings,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list side effects: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing side effects").into_response()
        }
    }
}

/// Record a new side effect note
pub async fn log_side_effect(
    State(state): State<AppState>,
    Json(request): Json<LogSideEffectRequest>,
) -> impl IntoResponse {
    info!("POST /api/side-effects - request: {:?}", request);

    let command = SideEffectMapper::to_command(request);
    match state.side_effect_service.log_side_effect(command).await {
        Ok(side_effect) => {
            let date_text = side_effect.date.map(|date| date.to_string()).unwrap_or_default();
            let response = LogSideEffectResponse {
                side_effect: SideEffectMapper::to_dto(side_effect),
                success_message: format!("Side effects logged for {}", date_text),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to log side effects: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::{CsvConnection, LocalCsvSource};
    use crate::storage::RecordStore;
    use crate::AppState;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn setup_test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let store = Arc::new(RecordStore::new(vec![Box::new(LocalCsvSource::new(connection))]));
        (AppState::new(store), temp_dir)
    }

    #[tokio::test]
    async fn test_log_side_effect_handler() {
        let (state, _temp_dir) = setup_test_state();

        let request = LogSideEffectRequest {
            date: Some("2024-01-16".to_string()),
            notes: "Mild nausea in the evening".to_string(),
            user: None,
        };
        let response = log_side_effect(State(state), Json(request)).await;

        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_log_side_effect_requires_notes() {
        let (state, _temp_dir) = setup_test_state();

        let request = LogSideEffectRequest {
            date: None,
            notes: "   ".to_string(),
            user: None,
        };
        let response = log_side_effect(State(state), Json(request)).await;

        assert_eq!(response.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_side_effects_handler() {
        let (state, _temp_dir) = setup_test_state();

        let request = LogSideEffectRequest {
            date: Some("2024-01-16".to_string()),
            notes: "Headache".to_string(),
            user: None,
        };
        let created = log_side_effect(State(state.clone()), Json(request)).await;
        assert_eq!(created.into_response().status(), StatusCode::CREATED);

        let query = SideEffectHistoryQuery {
            user: None,
            limit: None,
        };
        let response = list_side_effects(State(state), Query(query)).await;

        assert_eq!(response.into_response().status(), StatusCode::OK);
    }
}
