//! Admin event management: searchable list, create/edit forms, delete.

use askama::Template;
use axum::{
    extract::{Extension, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use runhub_client::events::{self, EventFilter, EventInput, EventPatch};
use runhub_client::types::{Event, EventCategory, EventStatus, Location, User};
use runhub_client::ApiError;
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::info;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::events::status_class;
use crate::routes::AppState;
use crate::template::{format, render_template};

struct EventRow {
    id: String,
    title: String,
    date_label: String,
    category_label: String,
    capacity: u32,
    registered_count: u32,
    price_label: String,
    status_label: String,
    status_class: &'static str,
}

impl EventRow {
    fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date_label: format::long_date(&event.date),
            category_label: event.category.to_string(),
            capacity: event.capacity,
            registered_count: event.registered_count,
            price_label: format::price(event.price),
            status_label: event.status.to_string(),
            status_class: status_class(event.status),
        }
    }
}

#[derive(Deserialize)]
pub struct AdminEventsQuery {
    search: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/events.html")]
struct AdminEventsTemplate {
    user: Option<User>,
    rows: Vec<EventRow>,
    search: String,
}

/// GET /admin/events
pub async fn page(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Query(query): Query<AdminEventsQuery>,
) -> Result<Response, AppError> {
    let search = query.search.unwrap_or_default().trim().to_string();
    let filter = EventFilter {
        search: (!search.is_empty()).then(|| search.clone()),
        limit: Some(50),
        ..Default::default()
    };

    let result = events::list(&state.api, &filter).await?;

    Ok(render_template(AdminEventsTemplate {
        user: Some(auth.user),
        rows: result.data.iter().map(EventRow::from_event).collect(),
        search,
    }))
}

/// Current field values for the create/edit form, refilled on errors.
struct FormValues {
    title: String,
    description: String,
    date: String,
    start_time: String,
    end_time: String,
    location_name: String,
    location_address: String,
    category: String,
    capacity: u32,
    price: f64,
    image: String,
    status: String,
}

impl FormValues {
    fn defaults() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            location_name: String::new(),
            location_address: String::new(),
            category: EventCategory::FunRun.to_string(),
            capacity: 100,
            price: 0.0,
            image: String::new(),
            status: String::new(),
        }
    }

    fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.get(..10).unwrap_or(&event.date).to_string(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone().unwrap_or_default(),
            location_name: event.location.name.clone(),
            location_address: event.location.address.clone(),
            category: event.category.to_string(),
            capacity: event.capacity,
            price: event.price,
            image: event.image.clone().unwrap_or_default(),
            status: event.status.to_string(),
        }
    }

    fn from_form(form: &EventForm) -> Self {
        Self {
            title: form.title.clone(),
            description: form.description.clone(),
            date: form.date.clone(),
            start_time: form.start_time.clone(),
            end_time: form.end_time.clone(),
            location_name: form.location_name.clone(),
            location_address: form.location_address.clone(),
            category: form.category.clone(),
            capacity: form.capacity,
            price: form.price,
            image: form.image.clone(),
            status: form.status.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/event_form.html")]
struct EventFormTemplate {
    user: Option<User>,
    heading: String,
    action_href: String,
    is_edit: bool,
    values: FormValues,
    categories: Vec<String>,
    statuses: Vec<String>,
    errors: Vec<String>,
}

fn all_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|list| list.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect();
    messages.sort();
    messages
}

#[derive(Deserialize, Validate)]
pub struct EventForm {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    description: String,
    #[validate(length(min = 1, message = "Date is required"))]
    date: String,
    #[validate(length(min = 1, message = "Start time is required"))]
    start_time: String,
    #[serde(default)]
    end_time: String,
    #[validate(length(min = 1, message = "Location name is required"))]
    location_name: String,
    #[validate(length(min = 1, message = "Location address is required"))]
    location_address: String,
    category: String,
    capacity: u32,
    price: f64,
    #[serde(default)]
    image: String,
    #[serde(default)]
    status: String,
}

impl EventForm {
    fn category(&self) -> EventCategory {
        self.category
            .parse()
            .unwrap_or(EventCategory::FunRun)
    }

    fn location(&self) -> Location {
        Location {
            name: self.location_name.trim().to_string(),
            address: self.location_address.trim().to_string(),
            lat: None,
            lng: None,
        }
    }

    fn optional(value: &str) -> Option<String> {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// GET /admin/events/new
pub async fn new_page(Extension(auth): Extension<Auth>) -> Response {
    render_template(EventFormTemplate {
        user: Some(auth.user),
        heading: "Create Event".to_string(),
        action_href: "/admin/events".to_string(),
        is_edit: false,
        values: FormValues::defaults(),
        categories: EventCategory::iter().map(|c| c.to_string()).collect(),
        statuses: EventStatus::iter().map(|s| s.to_string()).collect(),
        errors: Vec::new(),
    })
}

/// POST /admin/events
#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Form(form): Form<EventForm>,
) -> Result<Response, AppError> {
    let form_template = |errors: Vec<String>, form: &EventForm, user: User| EventFormTemplate {
        user: Some(user),
        heading: "Create Event".to_string(),
        action_href: "/admin/events".to_string(),
        is_edit: false,
        values: FormValues::from_form(form),
        categories: EventCategory::iter().map(|c| c.to_string()).collect(),
        statuses: EventStatus::iter().map(|s| s.to_string()).collect(),
        errors,
    };

    if let Err(errors) = form.validate() {
        return Ok(render_template(form_template(
            all_messages(&errors),
            &form,
            auth.user,
        )));
    }

    let input = EventInput {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        date: form.date.clone(),
        start_time: form.start_time.clone(),
        end_time: EventForm::optional(&form.end_time),
        location: form.location(),
        category: form.category(),
        capacity: form.capacity,
        price: form.price,
        image: EventForm::optional(&form.image),
    };

    match events::create(&state.api, &auth.token, &input).await {
        Ok(event) => {
            info!(event_id = %event.id, "Event created");
            Ok(Redirect::to("/admin/events").into_response())
        }
        Err(ApiError::Status { message, .. }) => {
            let message = message.unwrap_or_else(|| "Could not create the event.".to_string());
            Ok(render_template(form_template(
                vec![message],
                &form,
                auth.user,
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /admin/events/{id}/edit
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let event = events::get(&state.api, &id).await?;

    Ok(render_template(EventFormTemplate {
        user: Some(auth.user),
        heading: format!("Edit {}", event.title),
        action_href: format!("/admin/events/{id}/edit"),
        is_edit: true,
        values: FormValues::from_event(&event),
        categories: EventCategory::iter().map(|c| c.to_string()).collect(),
        statuses: EventStatus::iter().map(|s| s.to_string()).collect(),
        errors: Vec::new(),
    }))
}

/// POST /admin/events/{id}/edit
#[tracing::instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Form(form): Form<EventForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(render_template(EventFormTemplate {
            user: Some(auth.user),
            heading: "Edit Event".to_string(),
            action_href: format!("/admin/events/{id}/edit"),
            is_edit: true,
            values: FormValues::from_form(&form),
            categories: EventCategory::iter().map(|c| c.to_string()).collect(),
            statuses: EventStatus::iter().map(|s| s.to_string()).collect(),
            errors: all_messages(&errors),
        }));
    }

    let patch = EventPatch {
        title: Some(form.title.trim().to_string()),
        description: Some(form.description.trim().to_string()),
        date: Some(form.date.clone()),
        start_time: Some(form.start_time.clone()),
        end_time: EventForm::optional(&form.end_time),
        location: Some(form.location()),
        category: Some(form.category()),
        capacity: Some(form.capacity),
        price: Some(form.price),
        image: EventForm::optional(&form.image),
        status: form.status.parse::<EventStatus>().ok(),
    };

    events::update(&state.api, &auth.token, &id, &patch).await?;
    info!(event_id = %id, "Event updated");

    Ok(Redirect::to("/admin/events").into_response())
}

/// POST /admin/events/{id}/delete
#[tracing::instrument(skip(state, auth))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    events::delete(&state.api, &auth.token, &id).await?;
    info!(event_id = %id, "Event deleted");
    Ok(Redirect::to("/admin/events").into_response())
}
