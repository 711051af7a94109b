//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_rooms;
mod m20240601_000002_create_bookings;
mod m20240601_000003_create_guest_services;
mod m20240601_000004_create_invoices;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_rooms::Migration),
            Box::new(m20240601_000002_create_bookings::Migration),
            Box::new(m20240601_000003_create_guest_services::Migration),
            Box::new(m20240601_000004_create_invoices::Migration),
        ]
    }
}
