//! `/events` endpoints.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Event, EventCategory, EventStatus, Location, Page};

/// Optional filters for the event list. Absent fields are omitted from the
/// query string entirely.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    pub status: Option<EventStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl EventFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Depending on backend configuration `GET /events` answers either with the
/// paginated envelope or a bare array. Both are accepted here and flattened
/// into [`Page`]; nothing above this module ever sees the raw shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Envelope(Page<Event>),
    Bare(Vec<Event>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub location: Location,
    pub category: EventCategory,
    pub capacity: u32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Partial update; only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
}

pub async fn list(api: &ApiClient, filter: &EventFilter) -> Result<Page<Event>, ApiError> {
    let response: ListResponse = api.get("/events", None, &filter.query_pairs()).await?;
    Ok(match response {
        ListResponse::Envelope(page) => page,
        ListResponse::Bare(items) => Page::from_items(items),
    })
}

pub async fn get(api: &ApiClient, id: &str) -> Result<Event, ApiError> {
    api.get(&format!("/events/{id}"), None, &[]).await
}

/// Events for one calendar month; `month` is 1-12.
pub async fn calendar(api: &ApiClient, year: i32, month: u8) -> Result<Vec<Event>, ApiError> {
    api.get(
        "/events/calendar",
        None,
        &[("year", year.to_string()), ("month", month.to_string())],
    )
    .await
}

pub async fn create(api: &ApiClient, token: &str, input: &EventInput) -> Result<Event, ApiError> {
    api.post("/events", Some(token), input).await
}

pub async fn update(
    api: &ApiClient,
    token: &str,
    id: &str,
    patch: &EventPatch,
) -> Result<Event, ApiError> {
    api.patch(&format!("/events/{id}"), Some(token), patch).await
}

pub async fn delete(api: &ApiClient, token: &str, id: &str) -> Result<(), ApiError> {
    api.delete_no_content(&format!("/events/{id}"), Some(token))
        .await
}
