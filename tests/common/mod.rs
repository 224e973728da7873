//! Shared test harness: the full router in front of a wiremock backend.

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::MockServer;

use runhub::config::{ApiConfig, Config, ObservabilityConfig, ServerConfig};

pub struct TestApp {
    pub backend: MockServer,
    router: Router,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let backend = MockServer::start().await;

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            api: ApiConfig {
                base_url: backend.uri(),
            },
            observability: ObservabilityConfig::default(),
        };

        let router = runhub::create_app(config).expect("failed to build app");
        Self { backend, router }
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    pub async fn get(&self, path: &str) -> Response<Body> {
        self.request(
            Request::builder()
                .uri(path)
                .body(Body::empty())
                .expect("bad request"),
        )
        .await
    }

    pub async fn get_with_session(&self, path: &str, cookies: &str) -> Response<Body> {
        self.request(
            Request::builder()
                .uri(path)
                .header(header::COOKIE, cookies)
                .body(Body::empty())
                .expect("bad request"),
        )
        .await
    }

    pub async fn post_form(&self, path: &str, body: &str) -> Response<Body> {
        self.request(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("bad request"),
        )
        .await
    }

    pub async fn post_form_with_session(
        &self,
        path: &str,
        body: &str,
        cookies: &str,
    ) -> Response<Body> {
        self.request(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(header::COOKIE, cookies)
                .body(Body::from(body.to_string()))
                .expect("bad request"),
        )
        .await
    }
}

/// Cookie header for a signed-in visitor with the given role.
pub fn session_cookies(role: &str) -> String {
    let user = json!({
        "_id": "u1",
        "name": "Nok",
        "email": "nok@example.com",
        "role": role,
        "createdAt": "2026-01-01T00:00:00.000Z",
        "updatedAt": "2026-01-01T00:00:00.000Z"
    });
    let encoded = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&user).expect("serialize user"));
    format!("auth_token=tok; auth_user={encoded}")
}

pub fn user_json(id: &str, name: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{name}@example.com").to_lowercase(),
        "role": role,
        "createdAt": "2026-01-01T00:00:00.000Z",
        "updatedAt": "2026-01-01T00:00:00.000Z"
    })
}

pub fn event_json(id: &str, title: &str) -> Value {
    json!({
        "_id": id,
        "title": title,
        "description": "A race through the city",
        "date": "2026-05-02",
        "startTime": "06:00",
        "location": {"name": "Lumpini Park", "address": "Rama IV Rd, Bangkok"},
        "category": "10K",
        "capacity": 100,
        "registeredCount": 10,
        "price": 500.0,
        "status": "upcoming"
    })
}

pub fn booking_json(id: &str, event: Value, status: &str) -> Value {
    json!({
        "_id": id,
        "user": "u1",
        "event": event,
        "status": status,
        "registrationNumber": "RUN-0042"
    })
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// All Set-Cookie header values on a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().expect("cookie header").to_string())
        .collect()
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
