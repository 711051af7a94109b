//! HTTP resource modules, one per REST resource

pub mod availability;
pub mod bookings;
pub mod health;
pub mod invoices;
pub mod rooms;
pub mod services;
