//! SeaORM repository implementations

pub mod booking_repository;
pub mod invoice_repository;
pub mod repository_provider;
pub mod room_repository;
pub mod service_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
