use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::domain::DomainError;
use crate::interfaces::http::common::{domain_error, ApiResponse};
use crate::interfaces::http::AppState;

use super::dto::InvoiceDto;

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

/// List all issued invoices
#[utoipa::path(
    get,
    path = "/api/v1/invoices",
    responses(
        (status = 200, description = "All invoices", body = ApiResponse<Vec<InvoiceDto>>)
    ),
    tag = "invoices"
)]
pub async fn list_invoices(State(state): State<AppState>) -> HandlerResult<Vec<InvoiceDto>> {
    let invoices = state
        .repos
        .invoices()
        .find_all()
        .await
        .map_err(domain_error)?;
    let dtos: Vec<InvoiceDto> = invoices.iter().map(InvoiceDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Get one invoice by id
#[utoipa::path(
    get,
    path = "/api/v1/invoices/{id}",
    params(("id" = String, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice found", body = ApiResponse<InvoiceDto>),
        (status = 404, description = "Invoice not found")
    ),
    tag = "invoices"
)]
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<InvoiceDto> {
    let invoice = state
        .repos
        .invoices()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Invoice", "id", &id)))?;
    Ok(Json(ApiResponse::success(InvoiceDto::from(&invoice))))
}

/// Settle an invoice. The only legal transition is unpaid to paid;
/// totals and line items never change.
#[utoipa::path(
    post,
    path = "/api/v1/invoices/{id}/pay",
    params(("id" = String, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice paid", body = ApiResponse<InvoiceDto>),
        (status = 404, description = "Invoice not found"),
        (status = 409, description = "Invoice already paid")
    ),
    tag = "invoices"
)]
pub async fn pay_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<InvoiceDto> {
    let mut invoice = state
        .repos
        .invoices()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Invoice", "id", &id)))?;

    if !invoice.mark_paid() {
        return Err(domain_error(DomainError::InvalidState(format!(
            "invoice {} is already paid",
            id
        ))));
    }

    state
        .repos
        .invoices()
        .update(invoice.clone())
        .await
        .map_err(domain_error)?;
    metrics::counter!("invoices_paid_total").increment(1);
    info!(invoice_id = %id, total = invoice.total, "Invoice paid");

    Ok(Json(ApiResponse::success(InvoiceDto::from(&invoice))))
}
