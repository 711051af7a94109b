//! API Router with Swagger UI

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::{availability, bookings, health, invoices, rooms, services};
use super::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health,
        // Rooms
        rooms::handlers::list_rooms,
        rooms::handlers::get_room,
        rooms::handlers::create_room,
        rooms::handlers::update_room,
        rooms::handlers::delete_room,
        // Availability
        availability::handlers::get_availability,
        // Bookings
        bookings::handlers::list_bookings,
        bookings::handlers::get_booking,
        bookings::handlers::create_booking,
        bookings::handlers::cancel_booking,
        bookings::handlers::checkout_booking,
        bookings::handlers::quote_booking,
        bookings::handlers::delete_booking,
        // Services
        services::handlers::list_services,
        services::handlers::get_service,
        services::handlers::create_service,
        services::handlers::update_service,
        // Invoices
        invoices::handlers::list_invoices,
        invoices::handlers::get_invoice,
        invoices::handlers::pay_invoice,
    ),
    components(
        schemas(
            ApiResponse<String>,
            // Health
            health::dto::HealthDto,
            // Rooms
            rooms::dto::RoomDto,
            rooms::dto::CreateRoomRequest,
            rooms::dto::UpdateRoomRequest,
            // Bookings
            bookings::dto::BookingDto,
            bookings::dto::CreateBookingDto,
            bookings::dto::CheckoutRequest,
            bookings::dto::QuoteDto,
            bookings::dto::InvoiceLineDto,
            // Services
            services::dto::ServiceDto,
            services::dto::CreateServiceRequest,
            services::dto::UpdateServiceRequest,
            // Invoices
            invoices::dto::InvoiceDto,
        )
    ),
    tags(
        (name = "health", description = "Server health check endpoints"),
        (name = "rooms", description = "Room inventory management"),
        (name = "availability", description = "Room availability for a date range"),
        (name = "bookings", description = "Booking lifecycle: create, cancel, checkout, quote"),
        (name = "services", description = "Guest service catalog (laundry, breakfast, ...)"),
        (name = "invoices", description = "Issued invoices and payment settlement"),
    ),
    info(
        title = "Hotel Booking Service API",
        version = "1.0.0",
        description = "REST API for room inventory, availability, bookings and invoicing",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn metrics_handler(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> String {
    match &state.metrics {
        Some(handle) => handle.render(),
        None => String::new(),
    }
}

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let room_routes = Router::new()
        .route(
            "/",
            get(rooms::handlers::list_rooms).post(rooms::handlers::create_room),
        )
        .route(
            "/{room_no}",
            get(rooms::handlers::get_room)
                .put(rooms::handlers::update_room)
                .delete(rooms::handlers::delete_room),
        );

    let booking_routes = Router::new()
        .route(
            "/",
            get(bookings::handlers::list_bookings).post(bookings::handlers::create_booking),
        )
        .route(
            "/{code}",
            get(bookings::handlers::get_booking).delete(bookings::handlers::delete_booking),
        )
        .route("/{code}/cancel", post(bookings::handlers::cancel_booking))
        .route(
            "/{code}/checkout",
            post(bookings::handlers::checkout_booking),
        )
        .route("/{code}/quote", get(bookings::handlers::quote_booking));

    let service_routes = Router::new()
        .route(
            "/",
            get(services::handlers::list_services).post(services::handlers::create_service),
        )
        .route(
            "/{id}",
            get(services::handlers::get_service).put(services::handlers::update_service),
        );

    let invoice_routes = Router::new()
        .route("/", get(invoices::handlers::list_invoices))
        .route("/{id}", get(invoices::handlers::get_invoice))
        .route("/{id}/pay", post(invoices::handlers::pay_invoice));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::handlers::health))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1/rooms", room_routes)
        .route(
            "/api/v1/availability",
            get(availability::handlers::get_availability),
        )
        .nest("/api/v1/bookings", booking_routes)
        .nest("/api/v1/services", service_routes)
        .nest("/api/v1/invoices", invoice_routes)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
