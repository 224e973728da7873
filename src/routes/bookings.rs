use askama::Template;
use axum::{
    extract::{Extension, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use runhub_client::bookings;
use runhub_client::types::{Booking, BookingStatus, User};
use runhub_client::ApiError;
use serde::Deserialize;
use tracing::warn;

use super::AppState;
use crate::error::AppError;
use crate::middleware::Auth;
use crate::template::{format, render_template};

struct BookingRow {
    id: String,
    event_title: String,
    event_href: Option<String>,
    date_label: String,
    start_time: String,
    location_name: String,
    status_label: String,
    status_class: &'static str,
    registration_number: String,
    can_cancel: bool,
}

impl BookingRow {
    fn from_booking(booking: &Booking) -> Self {
        // The backend usually expands the event ref; when it does not, the
        // row still renders with the bare id as a last resort.
        let (event_title, event_href, date_label, start_time, location_name) =
            match booking.event.expanded() {
                Some(event) => (
                    event.title.clone(),
                    Some(format!("/events/{}", event.id)),
                    format::long_date(&event.date),
                    event.start_time.clone(),
                    event.location.name.clone(),
                ),
                None => (
                    format!("Event {}", booking.event.id()),
                    None,
                    String::new(),
                    String::new(),
                    String::new(),
                ),
            };

        Self {
            id: booking.id.clone(),
            event_title,
            event_href,
            date_label,
            start_time,
            location_name,
            status_label: booking.status.to_string(),
            status_class: match booking.status {
                BookingStatus::Pending => "status-pending",
                BookingStatus::Confirmed => "status-confirmed",
                BookingStatus::Cancelled => "status-cancelled",
            },
            registration_number: booking.registration_number.clone(),
            can_cancel: booking.status != BookingStatus::Cancelled,
        }
    }
}

#[derive(Deserialize)]
pub struct BookingsQuery {
    cancelled: Option<String>,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "bookings.html")]
struct BookingsTemplate {
    user: Option<User>,
    rows: Vec<BookingRow>,
    cancelled: bool,
    error: Option<String>,
}

/// GET /bookings - the signed-in user's bookings
pub async fn page(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Query(query): Query<BookingsQuery>,
) -> Result<Response, AppError> {
    let bookings = bookings::list(&state.api, &auth.token).await?;

    Ok(render_template(BookingsTemplate {
        user: Some(auth.user),
        rows: bookings.iter().map(BookingRow::from_booking).collect(),
        cancelled: query.cancelled.is_some(),
        error: query.error,
    }))
}

/// POST /bookings/{id}/cancel
#[tracing::instrument(skip(state, auth))]
pub async fn cancel(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match bookings::cancel(&state.api, &auth.token, &id).await {
        Ok(_) => Ok(Redirect::to("/bookings?cancelled=1").into_response()),
        Err(ApiError::Status { message, status }) => {
            warn!(booking_id = %id, status, "Cancel rejected by backend");
            let message =
                message.unwrap_or_else(|| "Could not cancel this booking.".to_string());
            Ok(Redirect::to(&format!(
                "/bookings?error={}",
                urlencoding::encode(&message)
            ))
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}
