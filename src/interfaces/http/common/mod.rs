//! Shared HTTP plumbing: response envelope and error mapping

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard envelope for all REST responses.
///
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for each error in the taxonomy.
///
/// Validation maps to 422, conflicts and illegal transitions to 409,
/// unknown entities to 404.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::InvalidState(_) => StatusCode::CONFLICT,
    }
}

/// Map a domain error into the envelope + status pair handlers return.
pub fn domain_error<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    (status_for(&err), Json(ApiResponse::error(err.to_string())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(
            status_for(&DomainError::not_found("Room", "room_no", 101)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::Validation("bad".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&DomainError::Conflict("taken".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::InvalidState("terminal".into())),
            StatusCode::CONFLICT
        );
    }
}
