use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use runhub_client::types::User;
use runhub_client::ApiClient;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::{admin_middleware, auth_middleware};
use crate::session::{CookieSessions, SessionRepository};

mod admin;
mod bookings;
mod calendar;
mod events;
mod health;
mod index;
mod login;
mod profile;
mod register;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub api: ApiClient,
}

/// The signed-in user as cached in the snapshot cookie, if any. Used by
/// public pages to render the header; protected pages get the same data
/// through the auth middleware instead.
pub(crate) fn current_user(jar: &CookieJar) -> Option<User> {
    CookieSessions::new(jar.clone()).load().map(|s| s.user)
}

pub(crate) fn field_error(errors: &validator::ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|list| list.first())
        .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
}

pub async fn fallback() -> AppError {
    AppError::NotFound
}

pub fn router(app_state: AppState) -> Router {
    let protected = Router::new()
        .route("/events/{id}/book", post(events::book))
        .route("/bookings", get(bookings::page))
        .route("/bookings/{id}/cancel", post(bookings::cancel))
        .route("/profile", get(profile::page).post(profile::action))
        .route_layer(axum_middleware::from_fn(auth_middleware));

    // Admin pages sit behind both middlewares; auth runs first so the
    // role gate can read the Auth extension.
    let admin = Router::new()
        .route("/admin", get(admin::dashboard::page))
        .route(
            "/admin/events",
            get(admin::events::page).post(admin::events::create),
        )
        .route("/admin/events/new", get(admin::events::new_page))
        .route(
            "/admin/events/{id}/edit",
            get(admin::events::edit_page).post(admin::events::update),
        )
        .route("/admin/events/{id}/delete", post(admin::events::delete))
        .route("/admin/users", get(admin::users::page))
        .route("/admin/users/{id}/delete", post(admin::users::delete))
        .route_layer(axum_middleware::from_fn(admin_middleware))
        .route_layer(axum_middleware::from_fn(auth_middleware));

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/", get(index::page))
        .route("/events", get(events::page))
        .route("/events/{id}", get(events::detail))
        .route("/calendar", get(calendar::page))
        .route("/login", get(login::page).post(login::action))
        .route("/register", get(register::page).post(register::action))
        .route("/logout", post(login::logout))
        .merge(protected)
        .merge(admin)
        .route("/static/{*path}", get(crate::assets::serve))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
