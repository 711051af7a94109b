//! Create invoices table
//!
//! Line items are embedded as a JSON snapshot; the referenced booking
//! cannot be deleted while an invoice points at it.

use sea_orm_migration::prelude::*;

use super::m20240601_000002_create_bookings::Bookings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invoices::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invoices::BookingCode).string().not_null())
                    .col(ColumnDef::new(Invoices::LineItems).text().not_null())
                    .col(ColumnDef::new(Invoices::Total).big_integer().not_null())
                    .col(
                        ColumnDef::new(Invoices::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::PaymentStatus)
                            .string()
                            .not_null()
                            .default("unpaid"),
                    )
                    .col(ColumnDef::new(Invoices::PaymentMethod).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invoices_booking")
                            .from(Invoices::Table, Invoices::BookingCode)
                            .to(Bookings::Table, Bookings::Code)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invoices_booking_code")
                    .table(Invoices::Table)
                    .col(Invoices::BookingCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Invoices {
    Table,
    Id,
    BookingCode,
    LineItems,
    Total,
    IssuedAt,
    PaymentStatus,
    PaymentMethod,
}
