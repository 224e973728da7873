use askama::Template;
use axum::{
    extract::{Extension, State},
    response::Response,
};
use runhub_client::events::{self, EventFilter};
use runhub_client::types::{EventStatus, User};
use runhub_client::{bookings, users};

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;
use crate::template::render_template;

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
struct DashboardTemplate {
    user: Option<User>,
    total_events: u64,
    upcoming_events: usize,
    total_users: usize,
    total_bookings: usize,
}

/// GET /admin - platform counters from three parallel list calls
pub async fn page(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<Response, AppError> {
    let filter = EventFilter {
        limit: Some(100),
        ..Default::default()
    };

    let (events, users, bookings) = tokio::try_join!(
        events::list(&state.api, &filter),
        users::list(&state.api, &auth.token),
        bookings::list(&state.api, &auth.token),
    )?;

    let upcoming_events = events
        .data
        .iter()
        .filter(|e| e.status == EventStatus::Upcoming)
        .count();

    Ok(render_template(DashboardTemplate {
        user: Some(auth.user),
        total_events: events.total,
        upcoming_events,
        total_users: users.len(),
        total_bookings: bookings.len(),
    }))
}
