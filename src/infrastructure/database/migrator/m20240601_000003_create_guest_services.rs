//! Create guest_services table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuestServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GuestServices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GuestServices::Name).string().not_null())
                    .col(ColumnDef::new(GuestServices::Category).string().not_null())
                    .col(ColumnDef::new(GuestServices::Price).big_integer().not_null())
                    .col(
                        ColumnDef::new(GuestServices::Available)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(GuestServices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GuestServices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuestServices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum GuestServices {
    Table,
    Id,
    Name,
    Category,
    Price,
    Available,
    CreatedAt,
    UpdatedAt,
}
