use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Room, RoomStatus, RoomType};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub room_no: i32,
    pub room_type: String,
    /// Nightly rate in smallest currency unit
    pub price_per_night: i64,
    pub capacity: u32,
    pub status: String,
}

impl From<&Room> for RoomDto {
    fn from(room: &Room) -> Self {
        Self {
            room_no: room.room_no,
            room_type: room.room_type.as_str().to_string(),
            price_per_night: room.price_per_night,
            capacity: room.capacity,
            status: room.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[validate(range(min = 1, message = "room number must be positive"))]
    pub room_no: i32,
    #[validate(length(min = 1, message = "room type must not be empty"))]
    pub room_type: String,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_per_night: i64,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: u32,
}

impl CreateRoomRequest {
    pub fn into_domain(self) -> Room {
        Room::new(
            self.room_no,
            RoomType::from_str(&self.room_type),
            self.price_per_night,
            self.capacity,
        )
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub room_type: Option<String>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_per_night: Option<i64>,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: Option<u32>,
    pub status: Option<String>,
}

impl UpdateRoomRequest {
    /// Apply the provided fields onto an existing room.
    pub fn apply(self, room: &mut Room) {
        if let Some(ty) = self.room_type {
            room.room_type = RoomType::from_str(&ty);
        }
        if let Some(price) = self.price_per_night {
            room.price_per_night = price;
        }
        if let Some(capacity) = self.capacity {
            room.capacity = capacity;
        }
        if let Some(status) = self.status {
            room.status = RoomStatus::from_str(&status);
        }
        room.updated_at = chrono::Utc::now();
    }
}
