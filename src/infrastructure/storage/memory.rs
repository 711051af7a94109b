//! In-memory repository provider for development and testing

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use crate::domain::booking::BookingRepository;
use crate::domain::invoice::InvoiceRepository;
use crate::domain::room::RoomRepository;
use crate::domain::service::GuestServiceRepository;
use crate::domain::{
    Booking, DomainError, DomainResult, GuestService, Invoice, RepositoryProvider, Room,
};

/// DashMap-backed implementation of every repository.
///
/// Mirrors the SeaORM provider's semantics (key conflicts, missing
/// updates) so application tests exercise the same error paths.
pub struct InMemoryRepositoryProvider {
    rooms: DashMap<i32, Room>,
    bookings: DashMap<String, Booking>,
    services: DashMap<i32, GuestService>,
    invoices: DashMap<String, Invoice>,
    service_counter: AtomicI32,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            bookings: DashMap::new(),
            services: DashMap::new(),
            invoices: DashMap::new(),
            service_counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryRepositoryProvider {
    fn rooms(&self) -> &dyn RoomRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn services(&self) -> &dyn GuestServiceRepository {
        self
    }

    fn invoices(&self) -> &dyn InvoiceRepository {
        self
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}

#[async_trait]
impl RoomRepository for InMemoryRepositoryProvider {
    async fn save(&self, room: Room) -> DomainResult<()> {
        if self.rooms.contains_key(&room.room_no) {
            return Err(DomainError::Conflict(format!(
                "room {} already exists",
                room.room_no
            )));
        }
        self.rooms.insert(room.room_no, room);
        Ok(())
    }

    async fn find_by_no(&self, room_no: i32) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(&room_no).map(|r| r.clone()))
    }

    async fn update(&self, room: Room) -> DomainResult<()> {
        if !self.rooms.contains_key(&room.room_no) {
            return Err(DomainError::not_found("Room", "room_no", room.room_no));
        }
        self.rooms.insert(room.room_no, room);
        Ok(())
    }

    async fn delete(&self, room_no: i32) -> DomainResult<()> {
        self.rooms
            .remove(&room_no)
            .ok_or_else(|| DomainError::not_found("Room", "room_no", room_no))?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self.rooms.iter().map(|e| e.value().clone()).collect();
        rooms.sort_by_key(|r| r.room_no);
        Ok(rooms)
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepositoryProvider {
    async fn save(&self, booking: Booking) -> DomainResult<()> {
        if self.bookings.contains_key(&booking.code) {
            return Err(DomainError::Conflict(format!(
                "booking {} already exists",
                booking.code
            )));
        }
        self.bookings.insert(booking.code.clone(), booking);
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(code).map(|b| b.clone()))
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        if !self.bookings.contains_key(&booking.code) {
            return Err(DomainError::not_found("Booking", "code", &booking.code));
        }
        self.bookings.insert(booking.code.clone(), booking);
        Ok(())
    }

    async fn delete(&self, code: &str) -> DomainResult<()> {
        self.bookings
            .remove(code)
            .ok_or_else(|| DomainError::not_found("Booking", "code", code))?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self.bookings.iter().map(|e| e.value().clone()).collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn find_blocking_overlapping(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|e| e.value().blocks_rooms() && e.value().overlaps(check_in, check_out))
            .map(|e| e.value().clone())
            .collect())
    }

    async fn find_by_idempotency_key(&self, key: &str) -> DomainResult<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .find(|e| e.value().idempotency_key.as_deref() == Some(key))
            .map(|e| e.value().clone()))
    }
}

#[async_trait]
impl GuestServiceRepository for InMemoryRepositoryProvider {
    async fn save(&self, service: GuestService) -> DomainResult<GuestService> {
        let mut service = service;
        service.id = self.service_counter.fetch_add(1, Ordering::SeqCst);
        self.services.insert(service.id, service.clone());
        Ok(service)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<GuestService>> {
        Ok(self.services.get(&id).map(|s| s.clone()))
    }

    async fn update(&self, service: GuestService) -> DomainResult<()> {
        if !self.services.contains_key(&service.id) {
            return Err(DomainError::not_found("Service", "id", service.id));
        }
        self.services.insert(service.id, service);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<GuestService>> {
        let mut services: Vec<GuestService> =
            self.services.iter().map(|e| e.value().clone()).collect();
        services.sort_by_key(|s| s.id);
        Ok(services)
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryRepositoryProvider {
    async fn save(&self, invoice: Invoice) -> DomainResult<()> {
        if self.invoices.contains_key(&invoice.id) {
            return Err(DomainError::Conflict(format!(
                "invoice {} already exists",
                invoice.id
            )));
        }
        self.invoices.insert(invoice.id.clone(), invoice);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Invoice>> {
        Ok(self.invoices.get(id).map(|i| i.clone()))
    }

    async fn find_by_booking_code(&self, code: &str) -> DomainResult<Vec<Invoice>> {
        Ok(self
            .invoices
            .iter()
            .filter(|e| e.value().booking_code == code)
            .map(|e| e.value().clone())
            .collect())
    }

    async fn update(&self, invoice: Invoice) -> DomainResult<()> {
        if !self.invoices.contains_key(&invoice.id) {
            return Err(DomainError::not_found("Invoice", "id", &invoice.id));
        }
        self.invoices.insert(invoice.id.clone(), invoice);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self.invoices.iter().map(|e| e.value().clone()).collect();
        invoices.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(invoices)
    }
}
