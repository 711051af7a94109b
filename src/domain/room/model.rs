//! Room domain entity

use chrono::{DateTime, Utc};

/// Room category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Single,
    Double,
    Twin,
    Suite,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Twin => "Twin",
            Self::Suite => "Suite",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Single" => Self::Single,
            "Double" => Self::Double,
            "Twin" => Self::Twin,
            "Suite" => Self::Suite,
            _ => Self::Single,
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operational status of a room.
///
/// Occupancy ("Booked"/"Occupied") is derived from bookings at query
/// time and is never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    /// Room can be offered for new stays
    Available,
    /// Room withdrawn from the sellable inventory
    UnderMaintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::UnderMaintenance => "UnderMaintenance",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "UnderMaintenance" => Self::UnderMaintenance,
            _ => Self::Available,
        }
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hotel room
#[derive(Debug, Clone)]
pub struct Room {
    /// Room number (unique across the hotel)
    pub room_no: i32,
    pub room_type: RoomType,
    /// Nightly rate in smallest currency unit (e.g., cents)
    pub price_per_night: i64,
    /// Maximum number of guests
    pub capacity: u32,
    pub status: RoomStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    pub fn new(room_no: i32, room_type: RoomType, price_per_night: i64, capacity: u32) -> Self {
        let now = Utc::now();
        Self {
            room_no,
            room_type,
            price_per_night,
            capacity,
            status: RoomStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the room is part of the sellable inventory at all.
    /// Rooms under maintenance are excluded from availability
    /// regardless of date overlap.
    pub fn is_sellable(&self) -> bool {
        self.status == RoomStatus::Available
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_is_sellable() {
        let room = Room::new(101, RoomType::Double, 10_000, 2);
        assert!(room.is_sellable());
        assert_eq!(room.status, RoomStatus::Available);
    }

    #[test]
    fn maintenance_room_is_not_sellable() {
        let mut room = Room::new(102, RoomType::Single, 8_000, 1);
        room.status = RoomStatus::UnderMaintenance;
        assert!(!room.is_sellable());
    }

    #[test]
    fn room_type_roundtrip() {
        for ty in &[RoomType::Single, RoomType::Double, RoomType::Twin, RoomType::Suite] {
            assert_eq!(&RoomType::from_str(ty.as_str()), ty);
        }
    }

    #[test]
    fn unknown_status_defaults_to_available() {
        assert_eq!(RoomStatus::from_str("Occupied"), RoomStatus::Available);
    }
}
