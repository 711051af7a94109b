//! Create bookings table
//!
//! Stores stay reservations with their terminal flags. Lifecycle
//! display state is derived at query time and has no column.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Code)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::GuestName).string().not_null())
                    .col(ColumnDef::new(Bookings::Phone).string().not_null())
                    .col(ColumnDef::new(Bookings::IdentityNumber).string().not_null())
                    .col(ColumnDef::new(Bookings::Nationality).string().not_null())
                    .col(ColumnDef::new(Bookings::Address).string().not_null())
                    .col(ColumnDef::new(Bookings::GuestCount).integer().not_null())
                    .col(ColumnDef::new(Bookings::CheckIn).date().not_null())
                    .col(ColumnDef::new(Bookings::CheckOut).date().not_null())
                    .col(ColumnDef::new(Bookings::RoomNumbers).text().not_null())
                    .col(ColumnDef::new(Bookings::SpecialRequests).text())
                    .col(
                        ColumnDef::new(Bookings::ForeignGuest)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Bookings::Cancelled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Bookings::CheckedOut)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Bookings::ServiceIds).text().not_null())
                    .col(ColumnDef::new(Bookings::IdempotencyKey).string())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Overlap queries filter on the date range and cancelled flag
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_check_in")
                    .table(Bookings::Table)
                    .col(Bookings::CheckIn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_cancelled")
                    .table(Bookings::Table)
                    .col(Bookings::Cancelled)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_idempotency_key")
                    .table(Bookings::Table)
                    .col(Bookings::IdempotencyKey)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bookings {
    Table,
    Code,
    GuestName,
    Phone,
    IdentityNumber,
    Nationality,
    Address,
    GuestCount,
    CheckIn,
    CheckOut,
    RoomNumbers,
    SpecialRequests,
    ForeignGuest,
    Cancelled,
    CheckedOut,
    ServiceIds,
    IdempotencyKey,
    CreatedAt,
}
