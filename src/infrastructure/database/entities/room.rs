//! Room entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub room_no: i32,

    /// Room category: Single, Double, Twin, Suite
    pub room_type: String,

    /// Nightly rate in smallest currency unit
    pub price_per_night: i64,

    pub capacity: i32,

    /// Operational status: Available, UnderMaintenance
    pub status: String,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
