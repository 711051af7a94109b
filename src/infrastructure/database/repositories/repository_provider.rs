//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::domain::booking::BookingRepository;
use crate::domain::invoice::InvoiceRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::RoomRepository;
use crate::domain::service::GuestServiceRepository;
use crate::domain::{DomainError, DomainResult};

use super::booking_repository::SeaOrmBookingRepository;
use super::invoice_repository::SeaOrmInvoiceRepository;
use super::room_repository::SeaOrmRoomRepository;
use super::service_repository::SeaOrmGuestServiceRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_no(101).await?;
/// let booking = repos.bookings().find_by_code("BK-4F2A9C1E").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    rooms: SeaOrmRoomRepository,
    bookings: SeaOrmBookingRepository,
    services: SeaOrmGuestServiceRepository,
    invoices: SeaOrmInvoiceRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            rooms: SeaOrmRoomRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            services: SeaOrmGuestServiceRepository::new(db.clone()),
            invoices: SeaOrmInvoiceRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn services(&self) -> &dyn GuestServiceRepository {
        &self.services
    }

    fn invoices(&self) -> &dyn InvoiceRepository {
        &self.invoices
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map_err(|e| DomainError::Validation(format!("Database error: {}", e)))?;
        Ok(())
    }
}
