use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::services::{CreateBookingRequest, Quote};
use crate::domain::{Booking, BookingState, DomainError, DomainResult, InvoiceLine};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    #[validate(length(min = 1, message = "guest name must not be empty"))]
    pub guest_name: String,
    #[validate(length(min = 1, message = "phone must not be empty"))]
    pub phone: String,
    #[serde(default)]
    pub identity_number: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub address: String,
    #[validate(range(min = 1, message = "guest count must be at least 1"))]
    pub guest_count: u32,
    /// First night of the stay (YYYY-MM-DD)
    pub check_in: NaiveDate,
    /// Departure date, exclusive (YYYY-MM-DD)
    pub check_out: NaiveDate,
    #[validate(length(min = 1, message = "at least one room is required"))]
    pub room_numbers: Vec<i32>,
    pub special_requests: Option<String>,
    #[serde(default)]
    pub foreign_guest: bool,
    #[serde(default)]
    pub service_ids: Vec<i32>,
    /// Optional client key for safe retries
    pub idempotency_key: Option<String>,
}

impl CreateBookingDto {
    pub fn into_request(self) -> CreateBookingRequest {
        CreateBookingRequest {
            guest_name: self.guest_name,
            phone: self.phone,
            identity_number: self.identity_number,
            nationality: self.nationality,
            address: self.address,
            guest_count: self.guest_count,
            check_in: self.check_in,
            check_out: self.check_out,
            room_numbers: self.room_numbers,
            special_requests: self.special_requests,
            foreign_guest: self.foreign_guest,
            service_ids: self.service_ids,
            idempotency_key: self.idempotency_key,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub code: String,
    pub guest_name: String,
    pub phone: String,
    pub identity_number: String,
    pub nationality: String,
    pub address: String,
    pub guest_count: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub room_numbers: Vec<i32>,
    pub special_requests: Option<String>,
    pub foreign_guest: bool,
    /// Derived lifecycle state as of today
    pub status: String,
    pub service_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl BookingDto {
    /// Derive the display state against `today` and flatten the guest.
    pub fn from_booking(booking: &Booking, today: NaiveDate) -> Self {
        Self {
            code: booking.code.clone(),
            guest_name: booking.guest.name.clone(),
            phone: booking.guest.phone.clone(),
            identity_number: booking.guest.identity_number.clone(),
            nationality: booking.guest.nationality.clone(),
            address: booking.guest.address.clone(),
            guest_count: booking.guest_count,
            check_in: booking.check_in,
            check_out: booking.check_out,
            nights: booking.nights(),
            room_numbers: booking.room_numbers.clone(),
            special_requests: booking.special_requests.clone(),
            foreign_guest: booking.foreign_guest,
            status: BookingState::derive(today, booking).as_str().to_string(),
            service_ids: booking.service_ids.clone(),
            created_at: booking.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "payment method must not be empty"))]
    pub payment_method: String,
    /// Extra services consumed during the stay
    #[serde(default)]
    pub service_ids: Vec<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct QuoteQuery {
    /// Comma-separated service ids to price in addition to the
    /// booking's own, e.g. "1,3"
    pub service_ids: Option<String>,
}

impl QuoteQuery {
    pub fn parsed_service_ids(&self) -> DomainResult<Vec<i32>> {
        match self.service_ids.as_deref() {
            None | Some("") => Ok(vec![]),
            Some(raw) => raw
                .split(',')
                .map(|part| {
                    part.trim().parse::<i32>().map_err(|_| {
                        DomainError::Validation(format!("invalid service id '{}'", part))
                    })
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineDto {
    pub description: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub amount: i64,
}

impl From<&InvoiceLine> for InvoiceLineDto {
    fn from(line: &InvoiceLine) -> Self {
        Self {
            description: line.description.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            amount: line.amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    pub line_items: Vec<InvoiceLineDto>,
    pub total: i64,
}

impl From<&Quote> for QuoteDto {
    fn from(quote: &Quote) -> Self {
        Self {
            line_items: quote.line_items.iter().map(InvoiceLineDto::from).collect(),
            total: quote.total,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_query_parses_csv() {
        let query = QuoteQuery {
            service_ids: Some("1, 3,7".into()),
        };
        assert_eq!(query.parsed_service_ids().unwrap(), vec![1, 3, 7]);
    }

    #[test]
    fn quote_query_empty_is_no_services() {
        let query = QuoteQuery { service_ids: None };
        assert!(query.parsed_service_ids().unwrap().is_empty());
        let query = QuoteQuery {
            service_ids: Some("".into()),
        };
        assert!(query.parsed_service_ids().unwrap().is_empty());
    }

    #[test]
    fn quote_query_rejects_garbage() {
        let query = QuoteQuery {
            service_ids: Some("1,x".into()),
        };
        assert!(matches!(
            query.parsed_service_ids().unwrap_err(),
            DomainError::Validation(_)
        ));
    }
}
