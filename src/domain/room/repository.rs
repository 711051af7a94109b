//! Room repository interface

use async_trait::async_trait;

use super::model::Room;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Save a new room; fails with Conflict if the number is taken
    async fn save(&self, room: Room) -> DomainResult<()>;

    /// Find room by room number
    async fn find_by_no(&self, room_no: i32) -> DomainResult<Option<Room>>;

    /// Update an existing room
    async fn update(&self, room: Room) -> DomainResult<()>;

    /// Remove a room from the inventory
    async fn delete(&self, room_no: i32) -> DomainResult<()>;

    /// All rooms, ordered by room number
    async fn find_all(&self) -> DomainResult<Vec<Room>>;
}
