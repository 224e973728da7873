use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use runhub_client::auth::RegisterInput;
use runhub_client::ApiError;
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use super::{field_error, AppState};
use crate::error::AppError;
use crate::session::{CookieSessions, SessionStore};
use crate::template::render_template;

#[derive(Template)]
#[template(path = "auth/register.html")]
struct RegisterPageTemplate {
    error: Option<String>,
    name: String,
    email: String,
    phone: String,
    name_error: Option<String>,
    email_error: Option<String>,
    password_error: Option<String>,
    confirm_error: Option<String>,
}

impl RegisterPageTemplate {
    fn blank() -> Self {
        Self {
            error: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            name_error: None,
            email_error: None,
            password_error: None,
            confirm_error: None,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    name: String,
    #[validate(email(message = "Enter a valid email address"))]
    email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    confirm_password: String,
    #[serde(default)]
    phone: String,
}

/// GET /register - show the registration form
pub async fn page() -> Response {
    render_template(RegisterPageTemplate::blank())
}

/// POST /register - create the account and sign in
#[tracing::instrument(skip_all)]
pub async fn action(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(render_template(RegisterPageTemplate {
            error: None,
            name: form.name,
            email: form.email,
            phone: form.phone,
            name_error: field_error(&errors, "name"),
            email_error: field_error(&errors, "email"),
            password_error: field_error(&errors, "password"),
            confirm_error: field_error(&errors, "confirm_password"),
        }));
    }

    let phone = form.phone.trim();
    let input = RegisterInput {
        name: form.name.clone(),
        email: form.email.clone(),
        password: form.password,
        phone: (!phone.is_empty()).then(|| phone.to_string()),
    };

    let mut store = SessionStore::new(CookieSessions::new(jar));
    match store.register(&state.api, &input).await {
        Ok(user) => {
            info!(user_id = %user.id, "Account created");
            let jar = store.into_repository().into_jar();
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(e) => {
            warn!(email = %form.email, error = %e, "Registration failed");
            let message = match e {
                ApiError::Status { message, .. } => message
                    .unwrap_or_else(|| "Registration failed. Please try again.".to_string()),
                _ => "An error occurred. Please try again.".to_string(),
            };
            Ok(render_template(RegisterPageTemplate {
                error: Some(message),
                name: form.name,
                email: form.email,
                phone: form.phone,
                name_error: None,
                email_error: None,
                password_error: None,
                confirm_error: None,
            }))
        }
    }
}
