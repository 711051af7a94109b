//! Invoice domain entity
//!
//! An invoice is an immutable snapshot taken at checkout. Unit prices
//! are frozen into the line items, so later edits to rooms or the
//! service catalog never change an issued invoice. The only legal
//! mutation is the `unpaid -> paid` transition.

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "paid" => Self::Paid,
            _ => Self::Unpaid,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of an invoice: the room charge or a selected service.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    /// Nights for the room line, 1 for service lines
    pub quantity: i64,
    /// Price per unit at issue time, smallest currency unit
    pub unit_price: i64,
    /// Line amount; not always quantity * unit_price because the
    /// foreign-guest surcharge lands on the aggregate room line
    pub amount: i64,
}

/// Issued invoice
#[derive(Debug, Clone)]
pub struct Invoice {
    /// Generated id, e.g. "INV-2024-0481"
    pub id: String,
    pub booking_code: String,
    pub line_items: Vec<InvoiceLine>,
    /// Sum of line amounts, smallest currency unit
    pub total: i64,
    pub issued_at: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
}

impl Invoice {
    /// Generate a candidate invoice id from the issue year plus a
    /// random 4-digit suffix. The caller retries on collision.
    pub fn new_id(issued_at: DateTime<Utc>) -> String {
        let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
        format!("INV-{}-{:04}", issued_at.year(), suffix)
    }

    /// Transition `unpaid -> paid`. Totals and line items are left
    /// untouched; paying twice is an error surfaced by the caller.
    pub fn mark_paid(&mut self) -> bool {
        if self.payment_status == PaymentStatus::Paid {
            return false;
        }
        self.payment_status = PaymentStatus::Paid;
        true
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_invoice() -> Invoice {
        Invoice {
            id: "INV-2024-0001".into(),
            booking_code: "BK-TEST0001".into(),
            line_items: vec![InvoiceLine {
                description: "Room 101 (3 nights)".into(),
                quantity: 3,
                unit_price: 100,
                amount: 300,
            }],
            total: 300,
            issued_at: Utc::now(),
            payment_status: PaymentStatus::Unpaid,
            payment_method: "cash".into(),
        }
    }

    #[test]
    fn mark_paid_transitions_once() {
        let mut inv = sample_invoice();
        assert!(inv.mark_paid());
        assert_eq!(inv.payment_status, PaymentStatus::Paid);
        assert!(!inv.mark_paid());
    }

    #[test]
    fn mark_paid_does_not_touch_totals() {
        let mut inv = sample_invoice();
        let lines = inv.line_items.clone();
        inv.mark_paid();
        assert_eq!(inv.total, 300);
        assert_eq!(inv.line_items, lines);
    }

    #[test]
    fn new_id_embeds_issue_year() {
        let id = Invoice::new_id(Utc::now());
        assert!(id.starts_with(&format!("INV-{}-", Utc::now().year())));
        assert_eq!(id.len(), "INV-2024-0000".len());
    }
}
