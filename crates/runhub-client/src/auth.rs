//! `/auth` endpoints.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{AuthResponse, User};

#[derive(Debug, Clone, Serialize)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub async fn register(api: &ApiClient, input: &RegisterInput) -> Result<AuthResponse, ApiError> {
    api.post("/auth/register", None, input).await
}

pub async fn login(api: &ApiClient, input: &LoginInput) -> Result<AuthResponse, ApiError> {
    api.post("/auth/login", None, input).await
}

/// Fetch the user the given token belongs to.
pub async fn profile(api: &ApiClient, token: &str) -> Result<User, ApiError> {
    api.get("/auth/profile", Some(token), &[]).await
}
