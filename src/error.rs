use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use runhub_client::ApiError;
use thiserror::Error;

use crate::session::CookieSessions;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPageTemplate {
    status_code: u16,
    error_title: String,
    error_message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_title, error_message) = match self {
            // A 401 from any backend call means the stored token is stale.
            // Expire both session cookies and send the browser back to login.
            AppError::Api(ApiError::Unauthorized) => {
                tracing::warn!("Backend rejected token, clearing session");
                let [token, user] = CookieSessions::removal_cookies();
                let jar = CookieJar::new().add(token).add(user);
                return (jar, Redirect::to("/login")).into_response();
            }
            AppError::Api(ApiError::Status { status, message }) => {
                let status_code =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status_code == StatusCode::NOT_FOUND {
                    (
                        StatusCode::NOT_FOUND,
                        "Not Found".to_string(),
                        message.unwrap_or_else(|| {
                            "The page you are looking for does not exist.".to_string()
                        }),
                    )
                } else {
                    tracing::error!(status, "Backend returned an error");
                    (
                        status_code,
                        "Something Went Wrong".to_string(),
                        message.unwrap_or_else(|| {
                            "An unexpected error occurred. Please try again later.".to_string()
                        }),
                    )
                }
            }
            AppError::Api(ApiError::Transport(e)) => {
                tracing::error!(error = %e, "Backend unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    "Service Unavailable".to_string(),
                    "We could not reach the registration service. Please try again later."
                        .to_string(),
                )
            }
            AppError::Api(ApiError::BaseUrl(e)) => {
                tracing::error!(error = %e, "Invalid backend URL");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error".to_string(),
                msg,
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "Not Found".to_string(),
                "The page you are looking for does not exist.".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Forbidden".to_string(),
                "You do not have permission to view this page.".to_string(),
            ),
            AppError::Template(e) => {
                tracing::error!(error = %e, "Template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        let page = ErrorPageTemplate {
            status_code: status_code.as_u16(),
            error_title: error_title.clone(),
            error_message,
        };

        // Plain-text fallback if even the error page will not render.
        match page.render() {
            Ok(html) => (status_code, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Error page failed to render");
                (status_code, error_title).into_response()
            }
        }
    }
}
