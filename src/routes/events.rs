//! Event browsing: list with filters, detail, and the booking action.

use askama::Template;
use axum::{
    extract::{Extension, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use runhub_client::bookings;
use runhub_client::events::{self, EventFilter};
use runhub_client::types::{Event, EventCategory, EventStatus, User};
use runhub_client::ApiError;
use serde::Deserialize;
use strum::IntoEnumIterator;

use super::{current_user, AppState};
use crate::error::AppError;
use crate::middleware::Auth;
use crate::template::{format, render_template};

const PAGE_SIZE: u32 = 12;

/// Everything a card in the event grid needs, preformatted.
pub(crate) struct EventCard {
    pub id: String,
    pub title: String,
    pub date_label: String,
    pub start_time: String,
    pub location_name: String,
    pub category_label: String,
    pub category_class: &'static str,
    pub status_label: String,
    pub status_class: &'static str,
    pub price_label: String,
    pub spots_left: u32,
    pub is_full: bool,
}

impl EventCard {
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date_label: format::long_date(&event.date),
            start_time: event.start_time.clone(),
            location_name: event.location.name.clone(),
            category_label: event.category.to_string(),
            category_class: category_class(event.category),
            status_label: event.status.to_string(),
            status_class: status_class(event.status),
            price_label: format::price(event.price),
            spots_left: event.spots_left(),
            is_full: event.is_full(),
        }
    }
}

pub(crate) fn category_class(category: EventCategory) -> &'static str {
    match category {
        EventCategory::FiveK => "badge-5k",
        EventCategory::TenK => "badge-10k",
        EventCategory::HalfMarathon => "badge-half",
        EventCategory::FullMarathon => "badge-full",
        EventCategory::Trail => "badge-trail",
        EventCategory::FunRun => "badge-fun",
    }
}

pub(crate) fn status_class(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Upcoming => "status-upcoming",
        EventStatus::Ongoing => "status-ongoing",
        EventStatus::Completed => "status-completed",
        EventStatus::Cancelled => "status-cancelled",
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    search: Option<String>,
    category: Option<String>,
    page: Option<u32>,
}

#[derive(Template)]
#[template(path = "events/list.html")]
struct EventsPageTemplate {
    user: Option<User>,
    events: Vec<EventCard>,
    search: String,
    selected_category: String,
    categories: Vec<String>,
    total: u64,
    page: u32,
    total_pages: u32,
    prev_href: Option<String>,
    next_href: Option<String>,
}

fn list_href(search: &str, category: &str, page: u32) -> String {
    let mut href = format!("/events?page={page}");
    if !search.is_empty() {
        href.push_str(&format!("&search={}", urlencoding::encode(search)));
    }
    if !category.is_empty() {
        href.push_str(&format!("&category={}", urlencoding::encode(category)));
    }
    href
}

/// GET /events - browse with search/category filters and pagination
pub async fn page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let search = query.search.unwrap_or_default().trim().to_string();
    let selected_category = query.category.unwrap_or_default();
    let category = selected_category.parse::<EventCategory>().ok();
    let page = query.page.unwrap_or(1).max(1);

    let filter = EventFilter {
        category,
        search: (!search.is_empty()).then(|| search.clone()),
        page: Some(page),
        limit: Some(PAGE_SIZE),
        ..Default::default()
    };

    let result = events::list(&state.api, &filter).await?;

    let prev_href =
        (result.page > 1).then(|| list_href(&search, &selected_category, result.page - 1));
    let next_href = (result.page < result.total_pages)
        .then(|| list_href(&search, &selected_category, result.page + 1));

    Ok(render_template(EventsPageTemplate {
        user: current_user(&jar),
        events: result.data.iter().map(EventCard::from_event).collect(),
        search,
        selected_category,
        categories: EventCategory::iter().map(|c| c.to_string()).collect(),
        total: result.total,
        page: result.page,
        total_pages: result.total_pages,
        prev_href,
        next_href,
    }))
}

#[derive(Deserialize)]
pub struct DetailQuery {
    booked: Option<String>,
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "events/detail.html")]
struct EventDetailTemplate {
    user: Option<User>,
    id: String,
    title: String,
    description: String,
    date_label: String,
    start_time: String,
    end_time: Option<String>,
    location_name: String,
    location_address: String,
    category_label: String,
    category_class: &'static str,
    status_label: String,
    status_class: &'static str,
    price_label: String,
    capacity: u32,
    registered_count: u32,
    spots_left: u32,
    image: Option<String>,
    signed_in: bool,
    can_book: bool,
    blocked_reason: Option<String>,
    login_href: String,
    booked: Option<String>,
    error: Option<String>,
}

/// Why booking is not offered, if it is not. Full and finished events are
/// blocked regardless of who is looking.
fn booking_blocked_reason(event: &Event) -> Option<String> {
    match event.status {
        EventStatus::Completed => Some("This event has finished.".to_string()),
        EventStatus::Cancelled => Some("This event has been cancelled.".to_string()),
        _ if event.is_full() => Some("This event is full.".to_string()),
        _ => None,
    }
}

/// GET /events/{id} - event detail with the booking section
pub async fn detail(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<Response, AppError> {
    let event = events::get(&state.api, &id).await?;
    let user = current_user(&jar);
    let signed_in = user.is_some();
    let blocked_reason = booking_blocked_reason(&event);

    Ok(render_template(EventDetailTemplate {
        user,
        id: event.id.clone(),
        title: event.title.clone(),
        description: event.description.clone(),
        date_label: format::long_date(&event.date),
        start_time: event.start_time.clone(),
        end_time: event.end_time.clone(),
        location_name: event.location.name.clone(),
        location_address: event.location.address.clone(),
        category_label: event.category.to_string(),
        category_class: category_class(event.category),
        status_label: event.status.to_string(),
        status_class: status_class(event.status),
        price_label: format::price(event.price),
        capacity: event.capacity,
        registered_count: event.registered_count,
        spots_left: event.spots_left(),
        image: event.image.clone(),
        signed_in,
        can_book: signed_in && blocked_reason.is_none(),
        blocked_reason,
        login_href: format!(
            "/login?redirect={}",
            urlencoding::encode(&format!("/events/{}", event.id))
        ),
        booked: query.booked,
        error: query.error,
    }))
}

/// POST /events/{id}/book - issue exactly one booking for the event
#[tracing::instrument(skip(state, auth))]
pub async fn book(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match bookings::create(&state.api, &auth.token, &id).await {
        Ok(booking) => {
            tracing::info!(event_id = %id, registration = %booking.registration_number, "Booking created");
            Ok(Redirect::to(&format!(
                "/events/{id}?booked={}",
                urlencoding::encode(&booking.registration_number)
            ))
            .into_response())
        }
        Err(ApiError::Status { message, status }) => {
            tracing::warn!(event_id = %id, status, "Booking rejected by backend");
            let message =
                message.unwrap_or_else(|| "Booking failed. Please try again.".to_string());
            Ok(Redirect::to(&format!(
                "/events/{id}?error={}",
                urlencoding::encode(&message)
            ))
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}
