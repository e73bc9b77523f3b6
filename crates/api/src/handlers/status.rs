//! Handler for the `/status` resource: service health and database stats.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use mural_core::types::Timestamp;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub updated_at: Timestamp,
    pub dependencies: Dependencies,
}

#[derive(Debug, Serialize)]
pub struct Dependencies {
    pub database: DatabaseStatus,
}

#[derive(Debug, Serialize)]
pub struct DatabaseStatus {
    pub version: String,
    pub max_connections: i64,
    pub opened_connections: i64,
}

/// GET /api/v1/status
pub async fn get_status(State(state): State<AppState>) -> AppResult<Json<StatusResponse>> {
    let version: String = sqlx::query_scalar("SHOW server_version")
        .fetch_one(&state.pool)
        .await?;

    let max_connections: String = sqlx::query_scalar("SHOW max_connections")
        .fetch_one(&state.pool)
        .await?;

    let opened_connections: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)::bigint FROM pg_stat_activity WHERE datname = current_database()",
    )
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(StatusResponse {
        updated_at: Utc::now(),
        dependencies: Dependencies {
            database: DatabaseStatus {
                version,
                max_connections: max_connections.parse().unwrap_or_default(),
                opened_connections,
            },
        },
    }))
}
