pub mod booking;
pub mod invoice;
pub mod repositories;
pub mod room;
pub mod service;

// Re-export commonly used types
pub use booking::{Booking, BookingState, Guest};
pub use invoice::{Invoice, InvoiceLine, PaymentStatus};
pub use repositories::RepositoryProvider;
pub use room::{Room, RoomStatus, RoomType};
pub use service::GuestService;

// Re-export DomainError from shared for convenience
pub use crate::shared::types::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
