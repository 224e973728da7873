//! Admin user management. Admin rows never get a delete control; the
//! backend enforces the same rule, this keeps the UI honest about it.

use askama::Template;
use axum::{
    extract::{Extension, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use runhub_client::types::User;
use runhub_client::users;
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::middleware::Auth;
use crate::routes::AppState;
use crate::template::render_template;

struct UserRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    role_label: String,
    is_admin: bool,
}

impl UserRow {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            role_label: if user.role.is_admin() { "Admin" } else { "User" }.to_string(),
            is_admin: user.role.is_admin(),
        }
    }
}

#[derive(Deserialize)]
pub struct AdminUsersQuery {
    search: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/users.html")]
struct AdminUsersTemplate {
    user: Option<User>,
    rows: Vec<UserRow>,
    search: String,
}

/// GET /admin/users - list with name/email search
pub async fn page(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Query(query): Query<AdminUsersQuery>,
) -> Result<Response, AppError> {
    let all = users::list(&state.api, &auth.token).await?;

    // The backend has no search parameter on /users; filter locally.
    let search = query.search.unwrap_or_default().trim().to_lowercase();
    let rows = all
        .iter()
        .filter(|u| {
            search.is_empty()
                || u.name.to_lowercase().contains(&search)
                || u.email.to_lowercase().contains(&search)
        })
        .map(UserRow::from_user)
        .collect();

    Ok(render_template(AdminUsersTemplate {
        user: Some(auth.user),
        rows,
        search,
    }))
}

/// POST /admin/users/{id}/delete
#[tracing::instrument(skip(state, auth))]
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    users::delete(&state.api, &auth.token, &id).await?;
    info!(user_id = %id, "User deleted");
    Ok(Redirect::to("/admin/users").into_response())
}
