use runhub_client::bookings;
use runhub_client::types::BookingStatus;
use runhub_client::{ApiClient, ApiError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn booking_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "user": "u1",
        "event": {
            "_id": "ev1",
            "title": "Chiang Mai Trail",
            "description": "d",
            "date": "2026-05-02",
            "startTime": "05:30",
            "location": {"name": "Doi Suthep", "address": "Chiang Mai"},
            "category": "Trail",
            "capacity": 200,
            "registeredCount": 120,
            "price": 1200.0,
            "status": "upcoming"
        },
        "status": status,
        "registrationNumber": "RUN-0042"
    })
}

#[tokio::test]
async fn create_posts_exactly_one_booking_for_event() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"eventId": "ev1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(booking_json("b1", "pending")))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let booking = bookings::create(&api, "tok", "ev1").await.unwrap();
    assert_eq!(booking.registration_number, "RUN-0042");
    assert_eq!(booking.status, BookingStatus::Pending);
}

#[tokio::test]
async fn cancel_returns_the_updated_booking() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/bookings/b1"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json("b1", "cancelled")))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let booking = bookings::cancel(&api, "tok", "b1").await.unwrap();
    assert_eq!(booking.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn get_fetches_a_single_booking() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookings/b1"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json("b1", "confirmed")))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let booking = bookings::get(&api, "tok", "b1").await.unwrap();
    assert_eq!(booking.id, "b1");
    assert_eq!(booking.event.id(), "ev1");
}

#[tokio::test]
async fn list_by_event_scopes_to_the_event_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookings/event/ev1"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booking_json("b1", "confirmed"),
            booking_json("b2", "pending"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let bookings = bookings::list_by_event(&api, "tok", "ev1").await.unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[1].status, BookingStatus::Pending);
}

#[tokio::test]
async fn list_requires_a_valid_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let err = bookings::list(&api, "stale").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn full_event_conflict_passes_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "Event is full"})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let err = bookings::create(&api, "tok", "ev1").await.unwrap_err();
    assert_eq!(err.server_message(), Some("Event is full"));
    assert_eq!(err.status(), Some(409));
}
