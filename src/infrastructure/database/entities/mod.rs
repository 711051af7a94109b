//! SeaORM entities

pub mod booking;
pub mod guest_service;
pub mod invoice;
pub mod room;
