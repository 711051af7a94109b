//! Booking aggregate
//!
//! Contains the Booking entity, derived lifecycle state, and
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{Booking, BookingState, Guest};
pub use repository::BookingRepository;
