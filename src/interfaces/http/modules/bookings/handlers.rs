use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use crate::interfaces::http::common::{domain_error, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::invoices::dto::InvoiceDto;
use crate::interfaces::http::AppState;

use super::dto::{BookingDto, CheckoutRequest, CreateBookingDto, QuoteDto, QuoteQuery};

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

/// List all bookings with their derived state
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    responses(
        (status = 200, description = "All bookings", body = ApiResponse<Vec<BookingDto>>)
    ),
    tag = "bookings"
)]
pub async fn list_bookings(State(state): State<AppState>) -> HandlerResult<Vec<BookingDto>> {
    let bookings = state.bookings.list().await.map_err(domain_error)?;
    let today = Utc::now().date_naive();
    let dtos: Vec<BookingDto> = bookings
        .iter()
        .map(|b| BookingDto::from_booking(b, today))
        .collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Get one booking by its code
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{code}",
    params(("code" = String, Path, description = "Booking code")),
    responses(
        (status = 200, description = "Booking found", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<BookingDto> {
    let booking = state.bookings.get(&code).await.map_err(domain_error)?;
    let today = Utc::now().date_naive();
    Ok(Json(ApiResponse::success(BookingDto::from_booking(
        &booking, today,
    ))))
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 404, description = "Unknown room or service"),
        (status = 409, description = "Room unavailable for the range"),
        (status = 422, description = "Validation failed")
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateBookingDto>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), (StatusCode, Json<ApiResponse<BookingDto>>)>
{
    let booking = state
        .bookings
        .create(body.into_request())
        .await
        .map_err(domain_error)?;
    let today = Utc::now().date_naive();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BookingDto::from_booking(
            &booking, today,
        ))),
    ))
}

/// Cancel a booking
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{code}/cancel",
    params(("code" = String, Path, description = "Booking code")),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingDto>),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already terminal")
    ),
    tag = "bookings"
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> HandlerResult<BookingDto> {
    let booking = state.bookings.cancel(&code).await.map_err(domain_error)?;
    let today = Utc::now().date_naive();
    Ok(Json(ApiResponse::success(BookingDto::from_booking(
        &booking, today,
    ))))
}

/// Check the guest out and issue the invoice
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{code}/checkout",
    params(("code" = String, Path, description = "Booking code")),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Invoice issued", body = ApiResponse<InvoiceDto>),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking terminal or already invoiced"),
        (status = 422, description = "Validation failed")
    ),
    tag = "bookings"
)]
pub async fn checkout_booking(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ValidatedJson(body): ValidatedJson<CheckoutRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InvoiceDto>>), (StatusCode, Json<ApiResponse<InvoiceDto>>)>
{
    let invoice = state
        .bookings
        .checkout(&code, &body.service_ids, &body.payment_method)
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(InvoiceDto::from(&invoice))),
    ))
}

/// Price a stay without issuing an invoice
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{code}/quote",
    params(
        ("code" = String, Path, description = "Booking code"),
        QuoteQuery
    ),
    responses(
        (status = 200, description = "Computed charges", body = ApiResponse<QuoteDto>),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already terminal")
    ),
    tag = "bookings"
)]
pub async fn quote_booking(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> HandlerResult<QuoteDto> {
    let service_ids = query.parsed_service_ids().map_err(domain_error)?;
    let quote = state
        .bookings
        .quote(&code, &service_ids)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(QuoteDto::from(&quote))))
}

/// Delete a terminal, uninvoiced booking
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{code}",
    params(("code" = String, Path, description = "Booking code")),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking live or referenced by an invoice")
    ),
    tag = "bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ApiResponse<()>>)> {
    state.bookings.delete(&code).await.map_err(domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}
