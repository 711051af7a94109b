//! Booking entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,

    pub guest_name: String,
    pub phone: String,
    pub identity_number: String,
    pub nationality: String,
    pub address: String,
    pub guest_count: i32,

    /// First night of the stay
    pub check_in: Date,
    /// Departure date, exclusive
    pub check_out: Date,

    /// JSON array of reserved room numbers
    pub room_numbers: String,

    #[sea_orm(nullable)]
    pub special_requests: Option<String>,

    pub foreign_guest: bool,
    pub cancelled: bool,
    pub checked_out: bool,

    /// JSON array of selected service ids
    pub service_ids: String,

    #[sea_orm(nullable)]
    pub idempotency_key: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::invoice::Entity")]
    Invoice,
}

impl Related<super::invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoice.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
