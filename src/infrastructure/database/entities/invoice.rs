//! Invoice entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub booking_code: String,

    /// JSON array of line items, frozen at issue time
    pub line_items: String,

    /// Sum of line amounts, smallest currency unit
    pub total: i64,

    pub issued_at: DateTimeUtc,

    /// Payment status: unpaid, paid
    pub payment_status: String,

    pub payment_method: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::booking::Entity",
        from = "Column::BookingCode",
        to = "super::booking::Column::Code"
    )]
    Booking,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
