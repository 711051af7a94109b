//! Pricing and invoice construction
//!
//! Nightly charges are summed across the booking's rooms, the
//! foreign-guest surcharge is applied once to that aggregate, and
//! selected services are added on top. Unit prices are frozen into
//! the invoice lines at issue time.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::domain::{
    Booking, DomainError, DomainResult, Invoice, InvoiceLine, PaymentStatus, RepositoryProvider,
};

/// Numerator/denominator of the foreign-guest surcharge (1.5x),
/// applied once to the aggregate room total.
const FOREIGN_MULTIPLIER_NUM: i64 = 3;
const FOREIGN_MULTIPLIER_DEN: i64 = 2;

/// Computed charges before an invoice is issued
#[derive(Debug, Clone)]
pub struct Quote {
    pub line_items: Vec<InvoiceLine>,
    pub total: i64,
}

/// Service for pricing stays and building invoice snapshots
pub struct PricingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PricingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Price a booking plus the given extra service selection without
    /// persisting anything.
    ///
    /// Services already selected on the booking are honored even if
    /// the catalog has since flagged them unavailable; ids newly added
    /// here must be currently available.
    pub async fn quote(&self, booking: &Booking, extra_service_ids: &[i32]) -> DomainResult<Quote> {
        let nights = booking.nights();
        if nights < 1 {
            return Err(DomainError::Validation(format!(
                "booking {} has a non-positive stay length",
                booking.code
            )));
        }

        let mut line_items = Vec::new();

        // Aggregate room charge: one line covering all reserved rooms.
        let mut nightly_sum: i64 = 0;
        for room_no in &booking.room_numbers {
            let room = self
                .repos
                .rooms()
                .find_by_no(*room_no)
                .await?
                .ok_or_else(|| DomainError::not_found("Room", "room_no", room_no))?;
            nightly_sum += room.price_per_night;
        }

        let room_subtotal = nightly_sum * nights;
        let room_total = if booking.foreign_guest {
            room_subtotal * FOREIGN_MULTIPLIER_NUM / FOREIGN_MULTIPLIER_DEN
        } else {
            room_subtotal
        };

        let room_desc = if booking.foreign_guest {
            format!(
                "Room charge ({} nights, foreign guest 1.5x)",
                nights
            )
        } else {
            format!("Room charge ({} nights)", nights)
        };
        line_items.push(InvoiceLine {
            description: room_desc,
            quantity: nights,
            unit_price: nightly_sum,
            amount: room_total,
        });

        // Service charges, one line each.
        let mut services_total: i64 = 0;
        for id in self.effective_service_ids(booking, extra_service_ids) {
            let service = self
                .repos
                .services()
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Service", "id", id))?;

            // Only a selection made after booking time requires the
            // service to still be offered.
            if !service.available && !booking.service_ids.contains(&id) {
                return Err(DomainError::Validation(format!(
                    "service '{}' is no longer available",
                    service.name
                )));
            }

            services_total += service.price;
            line_items.push(InvoiceLine {
                description: service.name,
                quantity: 1,
                unit_price: service.price,
                amount: service.price,
            });
        }

        let total = room_total + services_total;
        debug!(
            booking_code = %booking.code,
            nights,
            room_total,
            services_total,
            total,
            "Priced stay"
        );

        Ok(Quote { line_items, total })
    }

    /// Build the immutable invoice snapshot for a checkout.
    ///
    /// Read-only: the caller persists the invoice as part of the
    /// checkout transition so a pricing failure cannot leave the
    /// booking half checked-out.
    pub async fn build_invoice(
        &self,
        booking: &Booking,
        extra_service_ids: &[i32],
        payment_method: &str,
    ) -> DomainResult<Invoice> {
        let quote = self.quote(booking, extra_service_ids).await?;
        let issued_at = Utc::now();
        let id = self.fresh_invoice_id(issued_at).await?;

        Ok(Invoice {
            id,
            booking_code: booking.code.clone(),
            line_items: quote.line_items,
            total: quote.total,
            issued_at,
            payment_status: PaymentStatus::Unpaid,
            payment_method: payment_method.to_string(),
        })
    }

    /// Booking-time selection plus checkout-time additions, deduped,
    /// booking order first.
    fn effective_service_ids(&self, booking: &Booking, extra: &[i32]) -> Vec<i32> {
        let mut ids = booking.service_ids.clone();
        for id in extra {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }

    /// Generated ids carry a random suffix; retry a few times on the
    /// rare collision before giving up.
    async fn fresh_invoice_id(&self, issued_at: chrono::DateTime<Utc>) -> DomainResult<String> {
        for _ in 0..5 {
            let candidate = Invoice::new_id(issued_at);
            if self.repos.invoices().find_by_id(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(DomainError::Conflict(
            "could not allocate a unique invoice id".to_string(),
        ))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Guest, GuestService, Room, RoomType};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking_for(rooms: Vec<i32>, foreign: bool) -> Booking {
        Booking {
            code: "BK-PRICE001".into(),
            guest: Guest {
                name: "Guest".into(),
                phone: "000".into(),
                identity_number: "ID".into(),
                nationality: if foreign { "FR".into() } else { "VN".into() },
                address: "".into(),
            },
            guest_count: 1,
            check_in: date(2024, 1, 10),
            check_out: date(2024, 1, 13),
            room_numbers: rooms,
            special_requests: None,
            foreign_guest: foreign,
            cancelled: false,
            checked_out: false,
            service_ids: vec![],
            idempotency_key: None,
            created_at: Utc::now(),
        }
    }

    async fn setup() -> (PricingService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
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
        (PricingService::new(repos.clone()), repos)
    }

    #[tokio::test]
    async fn three_nights_at_100_is_300() {
        let (pricing, _repos) = setup().await;
        let quote = pricing.quote(&booking_for(vec![101], false), &[]).await.unwrap();
        assert_eq!(quote.total, 300);
        assert_eq!(quote.line_items.len(), 1);
        assert_eq!(quote.line_items[0].quantity, 3);
        assert_eq!(quote.line_items[0].unit_price, 100);
    }

    #[tokio::test]
    async fn foreign_guest_pays_one_and_a_half() {
        let (pricing, _repos) = setup().await;
        let quote = pricing.quote(&booking_for(vec![101], true), &[]).await.unwrap();
        assert_eq!(quote.total, 450);
    }

    #[tokio::test]
    async fn multiplier_applies_once_to_the_aggregate() {
        let (pricing, _repos) = setup().await;
        // (100 + 80) * 3 nights = 540; * 1.5 = 810
        let quote = pricing
            .quote(&booking_for(vec![101, 102], true), &[])
            .await
            .unwrap();
        assert_eq!(quote.total, 810);
    }

    #[tokio::test]
    async fn services_are_added_on_top() {
        let (pricing, repos) = setup().await;
        let svc = repos
            .services()
            .save(GuestService::new("Breakfast", "Food", 25))
            .await
            .unwrap();

        let quote = pricing
            .quote(&booking_for(vec![101], false), &[svc.id])
            .await
            .unwrap();
        assert_eq!(quote.total, 325);
        assert_eq!(quote.line_items.len(), 2);
        assert_eq!(quote.line_items[1].description, "Breakfast");
    }

    #[tokio::test]
    async fn unknown_service_is_not_found() {
        let (pricing, _repos) = setup().await;
        let err = pricing
            .quote(&booking_for(vec![101], false), &[999])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn booking_time_selection_survives_service_retirement() {
        let (pricing, repos) = setup().await;
        let mut svc = repos
            .services()
            .save(GuestService::new("Laundry", "Housekeeping", 40))
            .await
            .unwrap();

        let mut booking = booking_for(vec![101], false);
        booking.service_ids = vec![svc.id];

        svc.available = false;
        repos.services().update(svc.clone()).await.unwrap();

        // Honored: it was selected while still offered
        let quote = pricing.quote(&booking, &[]).await.unwrap();
        assert_eq!(quote.total, 340);

        // But a fresh selection of the retired service is rejected
        let err = pricing
            .quote(&booking_for(vec![101], false), &[svc.id])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_service_ids_charge_once() {
        let (pricing, repos) = setup().await;
        let svc = repos
            .services()
            .save(GuestService::new("Breakfast", "Food", 25))
            .await
            .unwrap();

        let mut booking = booking_for(vec![101], false);
        booking.service_ids = vec![svc.id];

        let quote = pricing.quote(&booking, &[svc.id]).await.unwrap();
        assert_eq!(quote.total, 325);
    }

    #[tokio::test]
    async fn build_invoice_freezes_the_quote() {
        let (pricing, _repos) = setup().await;
        let invoice = pricing
            .build_invoice(&booking_for(vec![101], false), &[], "cash")
            .await
            .unwrap();
        assert_eq!(invoice.total, 300);
        assert_eq!(invoice.payment_status, PaymentStatus::Unpaid);
        assert_eq!(invoice.booking_code, "BK-PRICE001");
        assert!(invoice.id.starts_with("INV-"));
    }
}
