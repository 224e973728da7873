//! `/users` endpoints. Listing and deletion are admin-only on the backend;
//! profile edits go through `update` with the caller's own id.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Role, User};

/// Partial update; only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

pub async fn list(api: &ApiClient, token: &str) -> Result<Vec<User>, ApiError> {
    api.get("/users", Some(token), &[]).await
}

pub async fn get(api: &ApiClient, token: &str, id: &str) -> Result<User, ApiError> {
    api.get(&format!("/users/{id}"), Some(token), &[]).await
}

pub async fn update(
    api: &ApiClient,
    token: &str,
    id: &str,
    patch: &UserPatch,
) -> Result<User, ApiError> {
    api.patch(&format!("/users/{id}"), Some(token), patch).await
}

pub async fn delete(api: &ApiClient, token: &str, id: &str) -> Result<(), ApiError> {
    api.delete_no_content(&format!("/users/{id}"), Some(token))
        .await
}
