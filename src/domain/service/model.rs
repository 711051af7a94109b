//! Guest service catalog entity

use chrono::{DateTime, Utc};

/// A chargeable extra (laundry, breakfast, airport pickup, ...).
///
/// Reference data from the booking engine's point of view: pricing
/// reads it, the external CRUD layer maintains it.
#[derive(Debug, Clone)]
pub struct GuestService {
    pub id: i32,
    pub name: String,
    pub category: String,
    /// Unit price in smallest currency unit (e.g., cents)
    pub price: i64,
    /// Whether the service can be newly selected
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuestService {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // assigned by the repository on save
            name: name.into(),
            category: category.into(),
            price,
            available: true,
            created_at: now,
            updated_at: now,
        }
    }
}
