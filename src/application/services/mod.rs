//! Application services

pub mod availability;
pub mod booking;
pub mod pricing;

pub use availability::AvailabilityService;
pub use booking::{BookingService, CreateBookingRequest};
pub use pricing::{PricingService, Quote};
