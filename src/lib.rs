//! # Hotel Booking Service
//!
//! Booking and availability engine for a small hotel: room inventory,
//! date-range availability, booking lifecycle and invoicing.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business logic (availability, pricing, booking lifecycle)
//! - **infrastructure**: Persistence (SeaORM/SQLite, in-memory storage)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::router::create_api_router;
pub use interfaces::http::AppState;
