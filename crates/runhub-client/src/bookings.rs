//! `/bookings` endpoints. All of them require a session.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::Booking;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBooking<'a> {
    event_id: &'a str,
}

pub async fn list(api: &ApiClient, token: &str) -> Result<Vec<Booking>, ApiError> {
    api.get("/bookings", Some(token), &[]).await
}

pub async fn get(api: &ApiClient, token: &str, id: &str) -> Result<Booking, ApiError> {
    api.get(&format!("/bookings/{id}"), Some(token), &[]).await
}

pub async fn list_by_event(
    api: &ApiClient,
    token: &str,
    event_id: &str,
) -> Result<Vec<Booking>, ApiError> {
    api.get(&format!("/bookings/event/{event_id}"), Some(token), &[])
        .await
}

/// Register the current user for an event. One round trip, no client-side
/// retry; capacity conflicts come back as a status error.
pub async fn create(api: &ApiClient, token: &str, event_id: &str) -> Result<Booking, ApiError> {
    api.post("/bookings", Some(token), &CreateBooking { event_id })
        .await
}

/// Cancelling returns the updated booking rather than an empty body.
pub async fn cancel(api: &ApiClient, token: &str, id: &str) -> Result<Booking, ApiError> {
    api.delete(&format!("/bookings/{id}"), Some(token)).await
}
