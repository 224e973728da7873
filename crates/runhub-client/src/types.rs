//! Wire types for the backend REST API.
//!
//! Everything here is an immutable snapshot owned by the backend; the client
//! never derives persistent state from it. Field names follow the wire
//! (camelCase, Mongo-style `_id`).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Race distance. The wire values are display strings, so serde and strum
/// carry the same spellings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum EventCategory {
    #[serde(rename = "5K")]
    #[strum(serialize = "5K")]
    FiveK,
    #[serde(rename = "10K")]
    #[strum(serialize = "10K")]
    TenK,
    #[serde(rename = "Half Marathon")]
    #[strum(serialize = "Half Marathon")]
    HalfMarathon,
    #[serde(rename = "Full Marathon")]
    #[strum(serialize = "Full Marathon")]
    FullMarathon,
    #[serde(rename = "Trail")]
    #[strum(serialize = "Trail")]
    Trail,
    #[serde(rename = "Fun Run")]
    #[strum(serialize = "Fun Run")]
    FunRun,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// ISO date or datetime string; parsed only at the view edge.
    pub date: String,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub location: Location,
    pub category: EventCategory,
    pub capacity: u32,
    pub registered_count: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: EventStatus,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Event {
    /// Whether the booking action should be offered at all.
    /// `registered_count <= capacity` is a server-side invariant; the client
    /// only reads it to disable booking.
    pub fn is_full(&self) -> bool {
        self.registered_count >= self.capacity
    }

    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.registered_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A referenced document the backend may or may not expand inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Expanded(Box<T>),
    Id(String),
}

impl<T> Ref<T> {
    pub fn expanded(&self) -> Option<&T> {
        match self {
            Ref::Expanded(value) => Some(value),
            Ref::Id(_) => None,
        }
    }
}

impl Ref<Event> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Expanded(event) => &event.id,
            Ref::Id(id) => id,
        }
    }
}

impl Ref<User> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Expanded(user) => &user.id,
            Ref::Id(id) => id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: Ref<User>,
    pub event: Ref<Event>,
    pub status: BookingStatus,
    pub registration_number: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

/// Canonical paginated envelope. List endpoints that answer with a bare
/// array are normalized into this shape at the API-module boundary, so
/// callers never branch on response shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Wrap a bare array as a single page.
    pub fn from_items(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            limit: items.len() as u32,
            data: items,
            total,
            page: 1,
            total_pages: 1,
        }
    }
}
