use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::domain::DomainError;
use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};
use crate::interfaces::http::AppState;

use super::dto::{CreateRoomRequest, RoomDto, UpdateRoomRequest};

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

/// List all rooms in the inventory
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    responses(
        (status = 200, description = "All rooms", body = ApiResponse<Vec<RoomDto>>)
    ),
    tag = "rooms"
)]
pub async fn list_rooms(State(state): State<AppState>) -> HandlerResult<Vec<RoomDto>> {
    let rooms = state.repos.rooms().find_all().await.map_err(domain_error)?;
    let dtos: Vec<RoomDto> = rooms.iter().map(RoomDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Get a single room by number
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room_no}",
    params(("room_no" = i32, Path, description = "Room number")),
    responses(
        (status = 200, description = "Room found", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room not found")
    ),
    tag = "rooms"
)]
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_no): Path<i32>,
) -> HandlerResult<RoomDto> {
    let room = state
        .repos
        .rooms()
        .find_by_no(room_no)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Room", "room_no", room_no)))?;
    Ok(Json(ApiResponse::success(RoomDto::from(&room))))
}

/// Add a room to the inventory
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = ApiResponse<RoomDto>),
        (status = 409, description = "Room number already exists"),
        (status = 422, description = "Validation failed")
    ),
    tag = "rooms"
)]
pub async fn create_room(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomDto>>), (StatusCode, Json<ApiResponse<RoomDto>>)> {
    if state
        .repos
        .rooms()
        .find_by_no(body.room_no)
        .await
        .map_err(domain_error)?
        .is_some()
    {
        return Err(domain_error(DomainError::Conflict(format!(
            "room {} already exists",
            body.room_no
        ))));
    }

    let room = body.into_domain();
    state
        .repos
        .rooms()
        .save(room.clone())
        .await
        .map_err(domain_error)?;
    info!(room_no = room.room_no, "Room created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RoomDto::from(&room))),
    ))
}

/// Update room attributes
#[utoipa::path(
    put,
    path = "/api/v1/rooms/{room_no}",
    params(("room_no" = i32, Path, description = "Room number")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room not found")
    ),
    tag = "rooms"
)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(room_no): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateRoomRequest>,
) -> HandlerResult<RoomDto> {
    let mut room = state
        .repos
        .rooms()
        .find_by_no(room_no)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Room", "room_no", room_no)))?;

    body.apply(&mut room);
    state
        .repos
        .rooms()
        .update(room.clone())
        .await
        .map_err(domain_error)?;
    info!(room_no, "Room updated");

    Ok(Json(ApiResponse::success(RoomDto::from(&room))))
}

/// Remove a room from the inventory
#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{room_no}",
    params(("room_no" = i32, Path, description = "Room number")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room is held by a live booking")
    ),
    tag = "rooms"
)]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(room_no): Path<i32>,
) -> Result<StatusCode, (StatusCode, Json<ApiResponse<()>>)> {
    state
        .repos
        .rooms()
        .find_by_no(room_no)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Room", "room_no", room_no)))?;

    // A room referenced by any live booking stays in the inventory.
    let bookings = state.repos.bookings().find_all().await.map_err(domain_error)?;
    if bookings
        .iter()
        .any(|b| b.blocks_rooms() && b.room_numbers.contains(&room_no))
    {
        return Err(domain_error(DomainError::Conflict(format!(
            "room {} is held by a live booking",
            room_no
        ))));
    }

    state
        .repos
        .rooms()
        .delete(room_no)
        .await
        .map_err(domain_error)?;
    info!(room_no, "Room deleted");

    Ok(StatusCode::NO_CONTENT)
}
