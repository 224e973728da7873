use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{CookieJar, Form};
use runhub_client::auth::LoginInput;
use runhub_client::ApiError;
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use super::{field_error, AppState};
use crate::error::AppError;
use crate::session::{CookieSessions, SessionRepository, SessionStore};
use crate::template::render_template;

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    error: Option<String>,
    email: String,
    email_error: Option<String>,
    password_error: Option<String>,
    redirect: String,
}

impl LoginPageTemplate {
    fn blank(redirect: String) -> Self {
        Self {
            error: None,
            email: String::new(),
            email_error: None,
            password_error: None,
            redirect,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginPageQuery {
    redirect: Option<String>,
}

/// Only same-site paths are honored as post-login targets. `//host` and
/// `/\host` are both protocol-relative in browsers, which normalize the
/// backslash to a slash.
fn safe_redirect(target: &str) -> &str {
    if target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\") {
        target
    } else {
        "/"
    }
}

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    password: String,
    #[serde(default)]
    redirect: String,
}

/// GET /login - show the login form
pub async fn page(Query(query): Query<LoginPageQuery>) -> Response {
    render_template(LoginPageTemplate::blank(query.redirect.unwrap_or_default()))
}

/// POST /login - authenticate and set the session cookies
#[tracing::instrument(skip_all)]
pub async fn action(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        return Ok(render_template(LoginPageTemplate {
            error: None,
            email: form.email,
            email_error: field_error(&errors, "email"),
            password_error: field_error(&errors, "password"),
            redirect: form.redirect,
        }));
    }

    let mut store = SessionStore::new(CookieSessions::new(jar));
    let input = LoginInput {
        email: form.email.clone(),
        password: form.password,
    };

    match store.login(&state.api, &input).await {
        Ok(user) => {
            info!(user_id = %user.id, "User logged in");
            let target = safe_redirect(&form.redirect).to_string();
            let jar = store.into_repository().into_jar();
            Ok((jar, Redirect::to(&target)).into_response())
        }
        Err(e) => {
            warn!(email = %form.email, error = %e, "Login failed");
            let message = match e {
                ApiError::Unauthorized => "Invalid email or password".to_string(),
                ApiError::Status { message, .. } => {
                    message.unwrap_or_else(|| "Invalid email or password".to_string())
                }
                _ => "An error occurred. Please try again.".to_string(),
            };
            // No jar in this response: a failed login writes no cookies.
            Ok(render_template(LoginPageTemplate {
                error: Some(message),
                email: form.email,
                email_error: None,
                password_error: None,
                redirect: form.redirect,
            }))
        }
    }
}

/// POST /logout - clear the session cookies, no backend call
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let mut sessions = CookieSessions::new(jar);
    sessions.clear();
    (sessions.into_jar(), Redirect::to("/"))
}
