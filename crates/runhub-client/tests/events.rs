use runhub_client::events::{self, EventFilter, EventPatch};
use runhub_client::types::{EventCategory, EventStatus};
use runhub_client::{ApiClient, ApiError};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn event_json(id: &str, date: &str) -> Value {
    json!({
        "_id": id,
        "title": format!("Event {id}"),
        "description": "desc",
        "date": date,
        "startTime": "06:00",
        "location": {"name": "Lumpini Park", "address": "Rama IV Rd"},
        "category": "10K",
        "capacity": 100,
        "registeredCount": 10,
        "price": 500.0,
        "status": "upcoming"
    })
}

#[tokio::test]
async fn list_sends_only_present_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("category", "10K"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "12"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [event_json("e1", "2026-03-01")],
            "total": 13,
            "page": 2,
            "limit": 12,
            "totalPages": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let filter = EventFilter {
        category: Some(EventCategory::TenK),
        page: Some(2),
        limit: Some(12),
        ..Default::default()
    };

    let page = events::list(&api, &filter).await.unwrap();
    assert_eq!(page.page, 2);
    assert_eq!(page.total, 13);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.data.len(), 1);
}

#[tokio::test]
async fn list_normalizes_bare_array_responses() {
    let server = MockServer::start().await;

    let items: Vec<Value> = (1..=5)
        .map(|i| event_json(&format!("e{i}"), "2026-03-01"))
        .collect();

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(items)))
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let page = events::list(&api, &EventFilter::default()).await.unwrap();

    assert_eq!(page.data.len(), 5);
    assert_eq!(page.total, 5);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn calendar_passes_year_and_one_based_month() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events/calendar"))
        .and(query_param("year", "2026"))
        .and(query_param("month", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([event_json("e1", "2026-03-15")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let items = events::calendar(&api, 2026, 3).await.unwrap();
    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn update_sends_only_present_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/events/e1"))
        .and(wiremock::matchers::body_json(json!({"title": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_json("e1", "2026-03-01")))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let patch = EventPatch {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    events::update(&api, "tok", "e1", &patch).await.unwrap();
}

#[tokio::test]
async fn errors_carry_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Event not found"})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let err = events::get(&api, "missing").await.unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message.as_deref(), Some("Event not found"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/events/e1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    events::delete(&api, "tok", "e1").await.unwrap();
}

#[tokio::test]
async fn status_filter_serializes_lowercase() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("status", "upcoming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&server.uri()).unwrap();
    let filter = EventFilter {
        status: Some(EventStatus::Upcoming),
        ..Default::default()
    };
    let page = events::list(&api, &filter).await.unwrap();
    assert!(page.data.is_empty());
}
