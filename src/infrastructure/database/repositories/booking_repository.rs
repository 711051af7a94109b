//! SeaORM implementation of BookingRepository
//!
//! Room numbers and service ids travel as JSON text columns; the
//! overlap query pushes the half-open interval test into SQL.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::booking::{Booking, BookingRepository, Guest};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let room_numbers: Vec<i32> = serde_json::from_str(&m.room_numbers)
        .map_err(|e| DomainError::Validation(format!("corrupt room_numbers column: {}", e)))?;
    let service_ids: Vec<i32> = serde_json::from_str(&m.service_ids)
        .map_err(|e| DomainError::Validation(format!("corrupt service_ids column: {}", e)))?;

    Ok(Booking {
        code: m.code,
        guest: Guest {
            name: m.guest_name,
            phone: m.phone,
            identity_number: m.identity_number,
            nationality: m.nationality,
            address: m.address,
        },
        guest_count: m.guest_count.max(0) as u32,
        check_in: m.check_in,
        check_out: m.check_out,
        room_numbers,
        special_requests: m.special_requests,
        foreign_guest: m.foreign_guest,
        cancelled: m.cancelled,
        checked_out: m.checked_out,
        service_ids,
        idempotency_key: m.idempotency_key,
        created_at: m.created_at,
    })
}

fn domain_to_active(b: &Booking) -> DomainResult<booking::ActiveModel> {
    let room_numbers = serde_json::to_string(&b.room_numbers)
        .map_err(|e| DomainError::Validation(format!("cannot serialize room_numbers: {}", e)))?;
    let service_ids = serde_json::to_string(&b.service_ids)
        .map_err(|e| DomainError::Validation(format!("cannot serialize service_ids: {}", e)))?;

    Ok(booking::ActiveModel {
        code: Set(b.code.clone()),
        guest_name: Set(b.guest.name.clone()),
        phone: Set(b.guest.phone.clone()),
        identity_number: Set(b.guest.identity_number.clone()),
        nationality: Set(b.guest.nationality.clone()),
        address: Set(b.guest.address.clone()),
        guest_count: Set(b.guest_count as i32),
        check_in: Set(b.check_in),
        check_out: Set(b.check_out),
        room_numbers: Set(room_numbers),
        special_requests: Set(b.special_requests.clone()),
        foreign_guest: Set(b.foreign_guest),
        cancelled: Set(b.cancelled),
        checked_out: Set(b.checked_out),
        service_ids: Set(service_ids),
        idempotency_key: Set(b.idempotency_key.clone()),
        created_at: Set(b.created_at),
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn save(&self, b: Booking) -> DomainResult<()> {
        debug!(booking_code = %b.code, "Saving booking");
        domain_to_active(&b)?.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(code)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn update(&self, b: Booking) -> DomainResult<()> {
        debug!(booking_code = %b.code, "Updating booking");

        let existing = booking::Entity::find_by_id(&b.code)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Booking", "code", &b.code));
        }

        domain_to_active(&b)?.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, code: &str) -> DomainResult<()> {
        let result = booking::Entity::delete_by_id(code)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Booking", "code", code));
        }
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_blocking_overlapping(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::Cancelled.eq(false))
            .filter(booking::Column::CheckIn.lt(check_out))
            .filter(booking::Column::CheckOut.gt(check_in))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_by_idempotency_key(&self, key: &str) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find()
            .filter(booking::Column::IdempotencyKey.eq(key))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }
}
