//! Invoice repository interface

use async_trait::async_trait;

use super::model::Invoice;
use crate::domain::DomainResult;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Save a new invoice; fails with Conflict if the id is taken
    async fn save(&self, invoice: Invoice) -> DomainResult<()>;

    /// Find invoice by id
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Invoice>>;

    /// Invoices referencing a booking (at most one by invariant)
    async fn find_by_booking_code(&self, code: &str) -> DomainResult<Vec<Invoice>>;

    /// Update an existing invoice (payment-status transition only)
    async fn update(&self, invoice: Invoice) -> DomainResult<()>;

    /// All invoices, newest first
    async fn find_all(&self) -> DomainResult<Vec<Invoice>>;
}
