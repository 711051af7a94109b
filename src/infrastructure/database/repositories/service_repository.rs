//! SeaORM implementation of GuestServiceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::service::{GuestService, GuestServiceRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::guest_service;

pub struct SeaOrmGuestServiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmGuestServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: guest_service::Model) -> GuestService {
    GuestService {
        id: m.id,
        name: m.name,
        category: m.category,
        price: m.price,
        available: m.available,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── GuestServiceRepository impl ─────────────────────────────────

#[async_trait]
impl GuestServiceRepository for SeaOrmGuestServiceRepository {
    async fn save(&self, s: GuestService) -> DomainResult<GuestService> {
        debug!(name = %s.name, "Saving guest service");

        let model = guest_service::ActiveModel {
            id: NotSet,
            name: Set(s.name),
            category: Set(s.category),
            price: Set(s.price),
            available: Set(s.available),
            created_at: Set(s.created_at),
            updated_at: Set(s.updated_at),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<GuestService>> {
        let model = guest_service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, s: GuestService) -> DomainResult<()> {
        debug!(id = s.id, "Updating guest service");

        let existing = guest_service::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Service", "id", s.id));
        }

        let model = guest_service::ActiveModel {
            id: Set(s.id),
            name: Set(s.name),
            category: Set(s.category),
            price: Set(s.price),
            available: Set(s.available),
            created_at: Set(s.created_at),
            updated_at: Set(s.updated_at),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<GuestService>> {
        let models = guest_service::Entity::find()
            .order_by_asc(guest_service::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
