//! End-to-end booking flow over the REST API
//!
//! Drives the full router against in-memory storage: seed inventory,
//! check availability, book, quote, check out, pay the invoice.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use hotel_booking::application::services::{AvailabilityService, BookingService, PricingService};
use hotel_booking::domain::RepositoryProvider;
use hotel_booking::infrastructure::InMemoryRepositoryProvider;
use hotel_booking::{create_api_router, AppState};

fn app() -> Router {
    let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
    let availability = Arc::new(AvailabilityService::new(repos.clone()));
    let pricing = Arc::new(PricingService::new(repos.clone()));
    let bookings = Arc::new(BookingService::new(
        repos.clone(),
        availability.clone(),
        pricing,
    ));
    create_api_router(AppState::new(repos, availability, bookings, None))
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let req = match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn seed_room(app: &Router, room_no: i32, room_type: &str, price: i64) {
    let (status, _) = request(
        app,
        "POST",
        "/api/v1/rooms",
        Some(json!({
            "roomNo": room_no,
            "roomType": room_type,
            "pricePerNight": price,
            "capacity": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

fn booking_body(rooms: Vec<i32>, check_in: &str, check_out: &str) -> Value {
    json!({
        "guestName": "Nguyen Van A",
        "phone": "0901234567",
        "guestCount": 2,
        "checkIn": check_in,
        "checkOut": check_out,
        "roomNumbers": rooms
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app();
    let (status, body) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "up");
}

#[tokio::test]
async fn full_booking_lifecycle() {
    let app = app();
    seed_room(&app, 101, "Double", 100).await;
    seed_room(&app, 102, "Single", 80).await;

    // Both rooms free for the range
    let (status, body) = request(
        &app,
        "GET",
        "/api/v1/availability?checkIn=2024-02-01&checkOut=2024-02-05",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Book room 101 for 4 nights
    let (status, body) = request(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(vec![101], "2024-02-01", "2024-02-05")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let code = body["data"]["code"].as_str().unwrap().to_string();
    assert!(code.starts_with("BK-"));
    assert_eq!(body["data"]["nights"], 4);

    // 101 now held, only 102 free for an overlapping range
    let (_, body) = request(
        &app,
        "GET",
        "/api/v1/availability?checkIn=2024-02-03&checkOut=2024-02-06",
        None,
    )
    .await;
    let free: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["roomNo"].as_i64().unwrap())
        .collect();
    assert_eq!(free, vec![102]);

    // Quote before checkout: 4 nights at 100
    let (status, body) =
        request(&app, "GET", &format!("/api/v1/bookings/{code}/quote"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 400);

    // Checkout issues the invoice
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/v1/bookings/{code}/checkout"),
        Some(json!({"paymentMethod": "cash"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let invoice_id = body["data"]["id"].as_str().unwrap().to_string();
    assert!(invoice_id.starts_with("INV-"));
    assert_eq!(body["data"]["total"], 400);
    assert_eq!(body["data"]["paymentStatus"], "unpaid");

    // Booking is now terminal
    let (_, body) = request(&app, "GET", &format!("/api/v1/bookings/{code}"), None).await;
    assert_eq!(body["data"]["status"], "CheckedOut");

    // Pay the invoice; paying twice is a conflict
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/v1/invoices/{invoice_id}/pay"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["paymentStatus"], "paid");

    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/v1/invoices/{invoice_id}/pay"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn double_booking_is_rejected_with_conflict() {
    let app = app();
    seed_room(&app, 101, "Double", 100).await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(vec![101], "2024-02-01", "2024-02-05")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(vec![101], "2024-02-03", "2024-02-07")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    // Back-to-back stay on the checkout day is fine
    let (status, _) = request(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(vec![101], "2024-02-05", "2024-02-08")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn foreign_guest_surcharge_shows_in_invoice() {
    let app = app();
    seed_room(&app, 201, "Suite", 180).await;

    let mut body = booking_body(vec![201], "2024-03-01", "2024-03-04");
    body["foreignGuest"] = json!(true);
    let (status, resp) = request(&app, "POST", "/api/v1/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let code = resp["data"]["code"].as_str().unwrap().to_string();

    // 3 nights at 180 = 540, times 1.5 = 810
    let (_, resp) = request(
        &app,
        "POST",
        &format!("/api/v1/bookings/{code}/checkout"),
        Some(json!({"paymentMethod": "card"})),
    )
    .await;
    assert_eq!(resp["data"]["total"], 810);
}

#[tokio::test]
async fn services_are_priced_into_the_invoice() {
    let app = app();
    seed_room(&app, 101, "Double", 100).await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/v1/services",
        Some(json!({"name": "Laundry", "category": "housekeeping", "price": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = body["data"]["id"].as_i64().unwrap();

    let mut booking = booking_body(vec![101], "2024-02-01", "2024-02-03");
    booking["serviceIds"] = json!([service_id]);
    let (_, body) = request(&app, "POST", "/api/v1/bookings", Some(booking)).await;
    let code = body["data"]["code"].as_str().unwrap().to_string();

    // 2 nights at 100 plus the laundry line
    let (_, body) = request(
        &app,
        "POST",
        &format!("/api/v1/bookings/{code}/checkout"),
        Some(json!({"paymentMethod": "cash"})),
    )
    .await;
    assert_eq!(body["data"]["total"], 230);
    assert_eq!(body["data"]["lineItems"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn cancelled_booking_cannot_check_out() {
    let app = app();
    seed_room(&app, 101, "Double", 100).await;

    let (_, body) = request(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(vec![101], "2024-02-01", "2024-02-05")),
    )
    .await;
    let code = body["data"]["code"].as_str().unwrap().to_string();

    let (status, body) = request(&app, "POST", &format!("/api/v1/bookings/{code}/cancel"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Cancelled");

    let (status, _) = request(
        &app,
        "POST",
        &format!("/api/v1/bookings/{code}/checkout"),
        Some(json!({"paymentMethod": "cash"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Terminal and uninvoiced, so deletion is allowed
    let (status, _) = request(&app, "DELETE", &format!("/api/v1/bookings/{code}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = request(&app, "GET", &format!("/api/v1/bookings/{code}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_failures_return_422() {
    let app = app();
    seed_room(&app, 101, "Double", 100).await;

    // Inverted date range
    let (status, _) = request(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(vec![101], "2024-02-05", "2024-02-01")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Empty guest name caught by the extractor
    let mut body = booking_body(vec![101], "2024-02-01", "2024-02-05");
    body["guestName"] = json!("");
    let (status, _) = request(&app, "POST", "/api/v1/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Unknown room is 404
    let (status, _) = request(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(vec![999], "2024-02-01", "2024-02-05")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn room_held_by_live_booking_cannot_be_deleted() {
    let app = app();
    seed_room(&app, 101, "Double", 100).await;

    let (_, body) = request(
        &app,
        "POST",
        "/api/v1/bookings",
        Some(booking_body(vec![101], "2024-02-01", "2024-02-05")),
    )
    .await;
    let code = body["data"]["code"].as_str().unwrap().to_string();

    let (status, _) = request(&app, "DELETE", "/api/v1/rooms/101", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, _) = request(&app, "POST", &format!("/api/v1/bookings/{code}/cancel"), None).await;
    let (status, _) = request(&app, "DELETE", "/api/v1/rooms/101", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}
