use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::interfaces::http::common::{domain_error, ApiResponse};
use crate::interfaces::http::modules::rooms::dto::RoomDto;
use crate::interfaces::http::AppState;

use super::dto::AvailabilityQuery;

/// Rooms free for the whole requested date range
#[utoipa::path(
    get,
    path = "/api/v1/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Rooms free for the range", body = ApiResponse<Vec<RoomDto>>),
        (status = 422, description = "Invalid date range")
    ),
    tag = "availability"
)]
pub async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, (StatusCode, Json<ApiResponse<Vec<RoomDto>>>)> {
    let rooms = state
        .availability
        .available_rooms(
            query.check_in,
            query.check_out,
            query.exclude_booking.as_deref(),
        )
        .await
        .map_err(domain_error)?;

    let dtos: Vec<RoomDto> = rooms.iter().map(RoomDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}
