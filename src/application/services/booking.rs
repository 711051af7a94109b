//! Booking lifecycle operations
//!
//! Owns creation, cancellation, checkout and deletion of bookings.
//! Creation serializes the availability re-check and insert behind a
//! single lock so two concurrent requests for the same room and
//! overlapping dates cannot both succeed.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::availability::{validate_date_range, AvailabilityService};
use super::pricing::{PricingService, Quote};
use crate::domain::{
    Booking, DomainError, DomainResult, Guest, Invoice, RepositoryProvider,
};

/// Reservation request coming in over the external boundary
#[derive(Debug, Clone)]
pub struct CreateBookingRequest {
    pub guest_name: String,
    pub phone: String,
    pub identity_number: String,
    pub nationality: String,
    pub address: String,
    pub guest_count: u32,
    pub check_in: chrono::NaiveDate,
    pub check_out: chrono::NaiveDate,
    pub room_numbers: Vec<i32>,
    pub special_requests: Option<String>,
    pub foreign_guest: bool,
    pub service_ids: Vec<i32>,
    /// Client-supplied key for safe retries
    pub idempotency_key: Option<String>,
}

/// Service for the booking state machine
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    availability: Arc<AvailabilityService>,
    pricing: Arc<PricingService>,
    /// Serializes the check-then-create window of `create`
    create_lock: Mutex<()>,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        availability: Arc<AvailabilityService>,
        pricing: Arc<PricingService>,
    ) -> Self {
        Self {
            repos,
            availability,
            pricing,
            create_lock: Mutex::new(()),
        }
    }

    pub async fn get(&self, code: &str) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_code(code)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", "code", code))
    }

    pub async fn list(&self) -> DomainResult<Vec<Booking>> {
        self.repos.bookings().find_all().await
    }

    /// Create a booking after validating the request and room
    /// availability. Fails with Validation on malformed input,
    /// NotFound on unknown rooms/services, Conflict when a requested
    /// room is already held for an overlapping range.
    pub async fn create(&self, request: CreateBookingRequest) -> DomainResult<Booking> {
        self.validate_request(&request)?;

        // Rooms must exist before availability is consulted, so an
        // unknown number surfaces as NotFound rather than Conflict.
        for room_no in &request.room_numbers {
            self.repos
                .rooms()
                .find_by_no(*room_no)
                .await?
                .ok_or_else(|| DomainError::not_found("Room", "room_no", room_no))?;
        }

        for id in &request.service_ids {
            let service = self
                .repos
                .services()
                .find_by_id(*id)
                .await?
                .ok_or_else(|| DomainError::not_found("Service", "id", id))?;
            if !service.available {
                return Err(DomainError::Validation(format!(
                    "service '{}' is not available for selection",
                    service.name
                )));
            }
        }

        // Availability check and insert under one lock: the classic
        // check-then-create race window.
        let _guard = self.create_lock.lock().await;

        if let Some(key) = request.idempotency_key.as_deref() {
            if let Some(existing) = self.repos.bookings().find_by_idempotency_key(key).await? {
                info!(
                    booking_code = %existing.code,
                    idempotency_key = key,
                    "Returning existing booking for retried creation"
                );
                return Ok(existing);
            }
        }

        let unavailable = self
            .availability
            .unavailable_rooms(&request.room_numbers, request.check_in, request.check_out, None)
            .await?;
        if !unavailable.is_empty() {
            return Err(DomainError::Conflict(format!(
                "rooms not available for {} to {}: {:?}",
                request.check_in, request.check_out, unavailable
            )));
        }

        let booking = Booking {
            code: Booking::new_code(),
            guest: Guest {
                name: request.guest_name,
                phone: request.phone,
                identity_number: request.identity_number,
                nationality: request.nationality,
                address: request.address,
            },
            guest_count: request.guest_count,
            check_in: request.check_in,
            check_out: request.check_out,
            room_numbers: request.room_numbers,
            special_requests: request.special_requests,
            foreign_guest: request.foreign_guest,
            cancelled: false,
            checked_out: false,
            service_ids: request.service_ids,
            idempotency_key: request.idempotency_key,
            created_at: chrono::Utc::now(),
        };

        self.repos.bookings().save(booking.clone()).await?;
        metrics::counter!("bookings_created_total").increment(1);
        info!(
            booking_code = %booking.code,
            rooms = ?booking.room_numbers,
            check_in = %booking.check_in,
            check_out = %booking.check_out,
            "Booking created"
        );

        Ok(booking)
    }

    /// Cancel a non-terminal booking. Cancelling twice is an error:
    /// the second call hits a terminal booking.
    pub async fn cancel(&self, code: &str) -> DomainResult<Booking> {
        let mut booking = self.get(code).await?;
        self.ensure_not_terminal(&booking)?;

        booking.cancelled = true;
        self.repos.bookings().update(booking.clone()).await?;
        metrics::counter!("bookings_cancelled_total").increment(1);
        info!(booking_code = code, "Booking cancelled");

        Ok(booking)
    }

    /// Check the guest out: price the stay, persist the invoice, and
    /// mark the booking checked out. A pricing failure leaves the
    /// booking untouched; an invoice persistence failure rolls the
    /// flag back so no invoice exists without a checked-out booking
    /// and vice versa.
    pub async fn checkout(
        &self,
        code: &str,
        service_ids: &[i32],
        payment_method: &str,
    ) -> DomainResult<Invoice> {
        let mut booking = self.get(code).await?;
        self.ensure_not_terminal(&booking)?;

        // A second invoice for the same booking must never exist.
        let existing = self.repos.invoices().find_by_booking_code(code).await?;
        if !existing.is_empty() {
            return Err(DomainError::InvalidState(format!(
                "booking {} already has invoice {}",
                code, existing[0].id
            )));
        }

        let invoice = self
            .pricing
            .build_invoice(&booking, service_ids, payment_method)
            .await?;

        booking.checked_out = true;
        self.repos.bookings().update(booking.clone()).await?;

        if let Err(e) = self.repos.invoices().save(invoice.clone()).await {
            warn!(booking_code = code, error = %e, "Invoice persistence failed, reverting checkout");
            booking.checked_out = false;
            if let Err(revert) = self.repos.bookings().update(booking).await {
                warn!(booking_code = code, error = %revert, "Failed to revert checkout flag");
            }
            return Err(e);
        }

        metrics::counter!("invoices_issued_total").increment(1);
        info!(
            booking_code = code,
            invoice_id = %invoice.id,
            total = invoice.total,
            "Booking checked out"
        );

        Ok(invoice)
    }

    /// Price a stay without issuing anything.
    pub async fn quote(&self, code: &str, service_ids: &[i32]) -> DomainResult<Quote> {
        let booking = self.get(code).await?;
        self.ensure_not_terminal(&booking)?;
        self.pricing.quote(&booking, service_ids).await
    }

    /// Remove a terminal booking. Live bookings must be cancelled
    /// first; bookings an invoice refers to are kept for history.
    pub async fn delete(&self, code: &str) -> DomainResult<()> {
        let booking = self.get(code).await?;
        if !booking.is_terminal() {
            return Err(DomainError::InvalidState(format!(
                "booking {} is still live; cancel it before deleting",
                code
            )));
        }

        let invoices = self.repos.invoices().find_by_booking_code(code).await?;
        if !invoices.is_empty() {
            return Err(DomainError::InvalidState(format!(
                "booking {} is referenced by invoice {}",
                code, invoices[0].id
            )));
        }

        self.repos.bookings().delete(code).await?;
        info!(booking_code = code, "Booking deleted");
        Ok(())
    }

    fn ensure_not_terminal(&self, booking: &Booking) -> DomainResult<()> {
        if booking.cancelled {
            return Err(DomainError::InvalidState(format!(
                "booking {} is cancelled",
                booking.code
            )));
        }
        if booking.checked_out {
            return Err(DomainError::InvalidState(format!(
                "booking {} is already checked out",
                booking.code
            )));
        }
        Ok(())
    }

    fn validate_request(&self, request: &CreateBookingRequest) -> DomainResult<()> {
        if request.guest_name.trim().is_empty() {
            return Err(DomainError::Validation("guest_name must not be empty".into()));
        }
        if request.guest_count == 0 {
            return Err(DomainError::Validation("guest_count must be at least 1".into()));
        }
        validate_date_range(request.check_in, request.check_out)?;
        if request.room_numbers.is_empty() {
            return Err(DomainError::Validation(
                "at least one room must be reserved".into(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for no in &request.room_numbers {
            if !seen.insert(no) {
                return Err(DomainError::Validation(format!(
                    "room {} is listed more than once",
                    no
                )));
            }
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentStatus, Room, RoomType};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(rooms: Vec<i32>, check_in: NaiveDate, check_out: NaiveDate) -> CreateBookingRequest {
        CreateBookingRequest {
            guest_name: "Nguyen Van A".into(),
            phone: "0901234567".into(),
            identity_number: "ID-123".into(),
            nationality: "VN".into(),
            address: "Hanoi".into(),
            guest_count: 2,
            check_in,
            check_out,
            room_numbers: rooms,
            special_requests: None,
            foreign_guest: false,
            service_ids: vec![],
            idempotency_key: None,
        }
    }

    async fn setup() -> BookingService {
        let repos: Arc<InMemoryRepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        repos
            .rooms()
            .save(Room::new(101, RoomType::Double, 100, 2))
            .await
            .unwrap();
        repos
            .rooms()
            .save(Room::new(102, RoomType::Single, 80, 1))
            .await
            .unwrap();
        let repos: Arc<dyn RepositoryProvider> = repos;
        let availability = Arc::new(AvailabilityService::new(repos.clone()));
        let pricing = Arc::new(PricingService::new(repos.clone()));
        BookingService::new(repos, availability, pricing)
    }

    #[tokio::test]
    async fn create_assigns_code_and_stores_booking() {
        let service = setup().await;
        let booking = service
            .create(request(vec![101], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();
        assert!(booking.code.starts_with("BK-"));
        assert_eq!(service.get(&booking.code).await.unwrap().room_numbers, vec![101]);
    }

    #[tokio::test]
    async fn overlapping_request_is_a_conflict() {
        let service = setup().await;
        service
            .create(request(vec![101], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();

        let err = service
            .create(request(vec![101], date(2024, 2, 3), date(2024, 2, 6)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn adjacent_request_succeeds() {
        let service = setup().await;
        service
            .create(request(vec![101], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();
        service
            .create(request(vec![101], date(2024, 2, 5), date(2024, 2, 7)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancelling_frees_the_room_for_new_requests() {
        let service = setup().await;
        let booking = service
            .create(request(vec![101], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();
        service.cancel(&booking.code).await.unwrap();

        service
            .create(request(vec![101], date(2024, 2, 3), date(2024, 2, 6)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancel_twice_is_invalid_state() {
        let service = setup().await;
        let booking = service
            .create(request(vec![101], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();
        service.cancel(&booking.code).await.unwrap();

        let err = service.cancel(&booking.code).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn checkout_issues_invoice_and_seals_the_booking() {
        let service = setup().await;
        let booking = service
            .create(request(vec![101], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();

        let invoice = service.checkout(&booking.code, &[], "cash").await.unwrap();
        assert_eq!(invoice.total, 400); // 4 nights at 100
        assert_eq!(invoice.payment_status, PaymentStatus::Unpaid);

        let stored = service.get(&booking.code).await.unwrap();
        assert!(stored.checked_out);

        // No second invoice for the same booking
        let err = service.checkout(&booking.code, &[], "cash").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn checkout_of_cancelled_booking_creates_no_invoice() {
        let service = setup().await;
        let booking = service
            .create(request(vec![101], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();
        service.cancel(&booking.code).await.unwrap();

        let err = service.checkout(&booking.code, &[], "cash").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));

        let invoices = service
            .repos
            .invoices()
            .find_by_booking_code(&booking.code)
            .await
            .unwrap();
        assert!(invoices.is_empty());
    }

    #[tokio::test]
    async fn delete_requires_terminal_state() {
        let service = setup().await;
        let booking = service
            .create(request(vec![101], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();

        let err = service.delete(&booking.code).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));

        service.cancel(&booking.code).await.unwrap();
        service.delete(&booking.code).await.unwrap();
        assert!(matches!(
            service.get(&booking.code).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn delete_refuses_invoiced_bookings() {
        let service = setup().await;
        let booking = service
            .create(request(vec![101], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap();
        service.checkout(&booking.code, &[], "card").await.unwrap();

        let err = service.delete(&booking.code).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[tokio::test]
    async fn retried_create_with_idempotency_key_returns_original() {
        let service = setup().await;
        let mut req = request(vec![101], date(2024, 2, 1), date(2024, 2, 5));
        req.idempotency_key = Some("retry-abc".into());

        let first = service.create(req.clone()).await.unwrap();
        let second = service.create(req).await.unwrap();
        assert_eq!(first.code, second.code);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_empty_room_set_and_bad_dates() {
        let service = setup().await;

        let err = service
            .create(request(vec![], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .create(request(vec![101], date(2024, 2, 5), date(2024, 2, 5)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let service = setup().await;
        let err = service
            .create(request(vec![999], date(2024, 2, 1), date(2024, 2, 5)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn concurrent_requests_for_same_room_admit_only_one() {
        let service = Arc::new(setup().await);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .create(request(vec![101], date(2024, 3, 1), date(2024, 3, 5)))
                    .await
            }));
        }

        let mut ok = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => ok += 1,
                Err(DomainError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(ok, 1);
        assert_eq!(conflicts, 7);
    }
}
