use askama::Template;
use axum::{
    extract::{Extension, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use runhub_client::types::User;
use runhub_client::users::{self, UserPatch};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::{field_error, AppState};
use crate::error::AppError;
use crate::middleware::Auth;
use crate::session::{CookieSessions, SessionStore};
use crate::template::render_template;

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    user: Option<User>,
    name: String,
    email: String,
    phone: String,
    role_label: String,
    updated: bool,
    name_error: Option<String>,
}

#[derive(Deserialize)]
pub struct ProfileQuery {
    updated: Option<String>,
}

/// GET /profile - always refetched from the backend so edits made elsewhere
/// show up; the cookie snapshot is refreshed along the way.
pub async fn page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ProfileQuery>,
) -> Result<Response, AppError> {
    let mut store = SessionStore::new(CookieSessions::new(jar));
    let user = store.refresh_profile(&state.api).await?;
    let jar = store.into_repository().into_jar();

    let template = ProfileTemplate {
        name: user.name.clone(),
        email: user.email.clone(),
        phone: user.phone.clone().unwrap_or_default(),
        role_label: if user.role.is_admin() { "Admin" } else { "Runner" }.to_string(),
        updated: query.updated.is_some(),
        name_error: None,
        user: Some(user),
    };

    Ok((jar, render_template(template)).into_response())
}

#[derive(Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    name: String,
    #[serde(default)]
    phone: String,
}

/// POST /profile - update name/phone, then refetch the profile
#[tracing::instrument(skip_all)]
pub async fn action(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    jar: CookieJar,
    Form(form): Form<ProfileForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(render_template(ProfileTemplate {
            name: form.name,
            email: auth.user.email.clone(),
            phone: form.phone,
            role_label: if auth.user.role.is_admin() { "Admin" } else { "Runner" }.to_string(),
            updated: false,
            name_error: field_error(&errors, "name"),
            user: Some(auth.user),
        }));
    }

    let patch = UserPatch {
        name: Some(form.name.trim().to_string()),
        phone: Some(form.phone.trim().to_string()),
        role: None,
    };
    users::update(&state.api, &auth.token, &auth.user.id, &patch).await?;
    info!(user_id = %auth.user.id, "Profile updated");

    // Refetch so the cookie snapshot matches what the backend stored.
    let mut store = SessionStore::new(CookieSessions::new(jar));
    store.refresh_profile(&state.api).await?;
    let jar = store.into_repository().into_jar();

    Ok((jar, Redirect::to("/profile?updated=1")).into_response())
}
