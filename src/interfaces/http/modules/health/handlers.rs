use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::warn;

use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::AppState;

use super::dto::HealthDto;

/// Liveness and database reachability probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service healthy", body = ApiResponse<HealthDto>),
        (status = 503, description = "Database unreachable", body = ApiResponse<HealthDto>)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<HealthDto>>) {
    let database_up = match state.repos.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Health check: database ping failed");
            false
        }
    };

    let dto = HealthDto {
        status: if database_up { "ok" } else { "degraded" }.to_string(),
        database: if database_up { "up" } else { "down" }.to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let status = if database_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ApiResponse::success(dto)))
}
