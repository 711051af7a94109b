//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::room::{Room, RoomRepository, RoomStatus, RoomType};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::room;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: room::Model) -> Room {
    Room {
        room_no: m.room_no,
        room_type: RoomType::from_str(&m.room_type),
        price_per_night: m.price_per_night,
        capacity: m.capacity.max(0) as u32,
        status: RoomStatus::from_str(&m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(r: &Room) -> room::ActiveModel {
    room::ActiveModel {
        room_no: Set(r.room_no),
        room_type: Set(r.room_type.as_str().to_string()),
        price_per_night: Set(r.price_per_night),
        capacity: Set(r.capacity as i32),
        status: Set(r.status.as_str().to_string()),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn save(&self, r: Room) -> DomainResult<()> {
        debug!(room_no = r.room_no, "Saving room");

        let existing = room::Entity::find_by_id(r.room_no)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Err(DomainError::Conflict(format!(
                "room {} already exists",
                r.room_no
            )));
        }

        domain_to_active(&r).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_no(&self, room_no: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(room_no)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, r: Room) -> DomainResult<()> {
        debug!(room_no = r.room_no, "Updating room");

        let existing = room::Entity::find_by_id(r.room_no)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Room", "room_no", r.room_no));
        }

        domain_to_active(&r).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, room_no: i32) -> DomainResult<()> {
        let result = room::Entity::delete_by_id(room_no)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Room", "room_no", room_no));
        }
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::RoomNo)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
