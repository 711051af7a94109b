//! Booking repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::Booking;
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Save a new booking
    async fn save(&self, booking: Booking) -> DomainResult<()>;

    /// Find booking by its code
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Booking>>;

    /// Update an existing booking
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// Remove a booking permanently
    async fn delete(&self, code: &str) -> DomainResult<()>;

    /// All bookings, newest first
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    /// Non-cancelled bookings whose `[check_in, check_out)` interval
    /// overlaps the given half-open range. Checked-out bookings are
    /// included: their stay still occupied the rooms historically.
    async fn find_blocking_overlapping(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>>;

    /// Look up a booking created with the given idempotency key
    async fn find_by_idempotency_key(&self, key: &str) -> DomainResult<Option<Booking>>;
}
