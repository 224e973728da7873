use askama::Template;
use axum::{extract::State, response::Response};
use axum_extra::extract::CookieJar;
use runhub_client::events::{self, EventFilter};
use runhub_client::types::{EventStatus, User};

use super::events::EventCard;
use super::{current_user, AppState};
use crate::error::AppError;
use crate::template::render_template;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    user: Option<User>,
    events: Vec<EventCard>,
}

/// GET / - landing page with the next upcoming events
pub async fn page(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let filter = EventFilter {
        status: Some(EventStatus::Upcoming),
        limit: Some(8),
        ..Default::default()
    };

    let result = events::list(&state.api, &filter).await?;

    Ok(render_template(IndexTemplate {
        user: current_user(&jar),
        events: result.data.iter().map(EventCard::from_event).collect(),
    }))
}
