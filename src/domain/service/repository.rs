//! Guest service repository interface

use async_trait::async_trait;

use super::model::GuestService;
use crate::domain::DomainResult;

#[async_trait]
pub trait GuestServiceRepository: Send + Sync {
    /// Save a new service, returning it with the assigned id
    async fn save(&self, service: GuestService) -> DomainResult<GuestService>;

    /// Find service by id
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<GuestService>>;

    /// Update an existing service
    async fn update(&self, service: GuestService) -> DomainResult<()>;

    /// All services in the catalog
    async fn find_all(&self) -> DomainResult<Vec<GuestService>>;
}
