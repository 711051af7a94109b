pub mod services;

pub use services::{
    AvailabilityService, BookingService, CreateBookingRequest, PricingService, Quote,
};
