//! Typed client for the runhub backend REST API.
//!
//! The backend owns all state; this crate only moves snapshots across the
//! wire. One module per resource, one function per operation, no retries
//! and no caching; each call is a single round trip.

pub mod auth;
pub mod bookings;
pub mod client;
pub mod error;
pub mod events;
pub mod types;
pub mod users;

pub use client::ApiClient;
pub use error::ApiError;
