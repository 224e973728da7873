//! The signed-in account pages: booking list, cancellation, and profile.

mod common;

use axum::http::StatusCode;
use common::{
    body_string, booking_json, event_json, location, session_cookies, set_cookies, user_json,
    TestApp,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn bookings_page_lists_rows_and_offers_cancel_for_active_ones() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booking_json("b1", event_json("ev1", "Bangkok Night Run"), "confirmed"),
            booking_json("b2", event_json("ev2", "River Trail"), "cancelled"),
        ])))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .get_with_session("/bookings", &session_cookies("user"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Bangkok Night Run"));
    assert!(body.contains("/events/ev1"));
    assert!(body.contains("RUN-0042"));
    // Only the confirmed booking gets a cancel control.
    assert!(body.contains("/bookings/b1/cancel"));
    assert!(!body.contains("/bookings/b2/cancel"));
}

#[tokio::test]
async fn booking_row_without_expanded_event_falls_back_to_the_id() {
    let app = TestApp::spawn().await;

    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            booking_json("b1", json!("ev9"), "confirmed"),
        ])))
        .mount(&app.backend)
        .await;

    let response = app
        .get_with_session("/bookings", &session_cookies("user"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Event ev9"));
    assert!(!body.contains("/events/ev9"));
}

#[tokio::test]
async fn cancelling_a_booking_redirects_with_a_confirmation() {
    let app = TestApp::spawn().await;

    Mock::given(method("DELETE"))
        .and(path("/bookings/b1"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_json(
            "b1",
            event_json("ev1", "Bangkok Night Run"),
            "cancelled",
        )))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .post_form_with_session("/bookings/b1/cancel", "", &session_cookies("user"))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/bookings?cancelled=1");
}

#[tokio::test]
async fn rejected_cancellation_carries_the_backend_message() {
    let app = TestApp::spawn().await;

    Mock::given(method("DELETE"))
        .and(path("/bookings/b1"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Too late to cancel"})),
        )
        .mount(&app.backend)
        .await;

    let response = app
        .post_form_with_session("/bookings/b1/cancel", "", &session_cookies("user"))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/bookings?error=Too%20late%20to%20cancel");
}

#[tokio::test]
async fn profile_page_refetches_and_refreshes_the_snapshot_cookie() {
    let app = TestApp::spawn().await;

    let mut fresh = user_json("u1", "Nok", "user");
    fresh["name"] = json!("Nok Renamed");
    fresh["phone"] = json!("0812345678");

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fresh))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .get_with_session("/profile", &session_cookies("user"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The fresh snapshot is written back so the header stays in sync.
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("auth_user=")));

    let body = body_string(response).await;
    assert!(body.contains("Nok Renamed"));
    assert!(body.contains("0812345678"));
}

#[tokio::test]
async fn profile_update_patches_the_user_then_redirects() {
    let app = TestApp::spawn().await;

    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"name": "Nok Renamed", "phone": "0812345678"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "Nok Renamed", "user")))
        .expect(1)
        .mount(&app.backend)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u1", "Nok Renamed", "user")))
        .expect(1)
        .mount(&app.backend)
        .await;

    let response = app
        .post_form_with_session(
            "/profile",
            "name=Nok+Renamed&phone=0812345678",
            &session_cookies("user"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile?updated=1");
}

#[tokio::test]
async fn profile_update_with_a_short_name_never_reaches_the_backend() {
    let app = TestApp::spawn().await;

    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend)
        .await;

    let response = app
        .post_form_with_session("/profile", "name=N&phone=", &session_cookies("user"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Name must be at least 2 characters"));
}
