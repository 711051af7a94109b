use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Invoice;
use crate::interfaces::http::modules::bookings::dto::InvoiceLineDto;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    pub id: String,
    pub booking_code: String,
    pub line_items: Vec<InvoiceLineDto>,
    /// Sum of line amounts, smallest currency unit
    pub total: i64,
    pub issued_at: DateTime<Utc>,
    pub payment_status: String,
    pub payment_method: String,
}

impl From<&Invoice> for InvoiceDto {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.clone(),
            booking_code: invoice.booking_code.clone(),
            line_items: invoice.line_items.iter().map(InvoiceLineDto::from).collect(),
            total: invoice.total,
            issued_at: invoice.issued_at,
            payment_status: invoice.payment_status.as_str().to_string(),
            payment_method: invoice.payment_method.clone(),
        }
    }
}
