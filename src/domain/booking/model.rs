//! Booking domain entity
//!
//! A booking holds one or more rooms for a half-open `[check_in,
//! check_out)` date range. Its lifecycle state is derived from the
//! current date plus the two stored terminal flags; only `cancelled`
//! and `checked_out` are ever persisted as state.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Derived lifecycle state of a booking.
///
/// `Cancelled` and `CheckedOut` come from stored flags and are
/// terminal; the rest are recomputed from "today" on every query so
/// the display state moves on its own as time passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    /// today < check_in
    Upcoming,
    /// check_in <= today < check_out
    Active,
    /// today >= check_out and the guest has not checked out
    Overdue,
    Cancelled,
    CheckedOut,
}

impl BookingState {
    /// Single source of truth for deriving a booking's state.
    ///
    /// Every caller (handlers, services, DTOs) goes through this
    /// function so no two places can disagree on what "active" means.
    pub fn derive(today: NaiveDate, booking: &Booking) -> Self {
        if booking.cancelled {
            return Self::Cancelled;
        }
        if booking.checked_out {
            return Self::CheckedOut;
        }
        if today < booking.check_in {
            Self::Upcoming
        } else if today < booking.check_out {
            Self::Active
        } else {
            Self::Overdue
        }
    }

    /// Terminal states accept no further lifecycle transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::CheckedOut)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Active => "Active",
            Self::Overdue => "Overdue",
            Self::Cancelled => "Cancelled",
            Self::CheckedOut => "CheckedOut",
        }
    }
}

impl std::fmt::Display for BookingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guest identity captured at reservation time
#[derive(Debug, Clone)]
pub struct Guest {
    pub name: String,
    pub phone: String,
    pub identity_number: String,
    pub nationality: String,
    pub address: String,
}

/// Stay reservation
#[derive(Debug, Clone)]
pub struct Booking {
    /// Generated booking code, unique (e.g. "BK-4F2A9C1E")
    pub code: String,
    pub guest: Guest,
    pub guest_count: u32,
    /// First night of the stay
    pub check_in: NaiveDate,
    /// Departure date, exclusive (must be strictly after check_in)
    pub check_out: NaiveDate,
    /// Reserved room numbers; non-empty, immutable after creation.
    /// Changing rooms means cancel + recreate.
    pub room_numbers: Vec<i32>,
    pub special_requests: Option<String>,
    /// Applies the 1.5x surcharge to the aggregate room total
    pub foreign_guest: bool,
    pub cancelled: bool,
    pub checked_out: bool,
    /// Guest services selected at reservation time
    pub service_ids: Vec<i32>,
    /// Client-supplied key so a retried create returns the original
    /// booking instead of double-booking the room
    pub idempotency_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Generate a new booking code.
    pub fn new_code() -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("BK-{}", id[..8].to_uppercase())
    }

    /// Half-open interval overlap against another date range.
    ///
    /// Back-to-back stays share a date without overlapping: one party
    /// checks out the morning the other checks in.
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.check_in < check_out && self.check_out > check_in
    }

    /// Whether this booking holds the given room.
    pub fn holds_room(&self, room_no: i32) -> bool {
        self.room_numbers.contains(&room_no)
    }

    /// Number of nights in the stay; at least 1 for any valid booking.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Derived state as of the given date.
    pub fn state(&self, today: NaiveDate) -> BookingState {
        BookingState::derive(today, self)
    }

    /// Whether the booking still counts against room availability.
    pub fn blocks_rooms(&self) -> bool {
        !self.cancelled
    }

    pub fn is_terminal(&self) -> bool {
        self.cancelled || self.checked_out
    }
}

// ── Tests ──────────────────────────────────────────────────────
