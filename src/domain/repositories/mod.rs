//! Repository provider
//!
//! Bundles the per-aggregate repositories behind one injectable
//! handle so application services depend on a single trait object.

use async_trait::async_trait;

use crate::domain::booking::BookingRepository;
use crate::domain::invoice::InvoiceRepository;
use crate::domain::room::RoomRepository;
use crate::domain::service::GuestServiceRepository;
use crate::domain::DomainResult;

/// Unified access to all repositories.
///
/// ```ignore
/// let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
/// let room = repos.rooms().find_by_no(101).await?;
/// let booking = repos.bookings().find_by_code("BK-4F2A9C1E").await?;
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn rooms(&self) -> &dyn RoomRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn services(&self) -> &dyn GuestServiceRepository;
    fn invoices(&self) -> &dyn InvoiceRepository;

    /// Liveness probe against the backing store
    async fn ping(&self) -> DomainResult<()>;
}
