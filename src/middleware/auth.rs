use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use runhub_client::types::User;

use crate::session::{CookieSessions, SessionRepository};

/// Auth extension carrying the bearer token and the cached user snapshot
#[derive(Clone, Debug)]
pub struct Auth {
    pub token: String,
    pub user: User,
}

/// Authentication middleware backed by the session cookies
///
/// Loads the session from the cookie jar and inserts an [`Auth`] extension.
/// Redirects to /login (carrying the original path so login can send the
/// visitor back) when no session is stored. The token itself is only
/// verified by the backend; a stale one surfaces as a 401 on the first
/// API call and the error handler clears the cookies then.
pub async fn auth_middleware(jar: CookieJar, mut req: Request, next: Next) -> Response {
    let sessions = CookieSessions::new(jar);

    let session = match sessions.load() {
        Some(session) => session,
        None => {
            tracing::warn!(path = %req.uri().path(), "No session, redirecting to login");
            let redirect = format!("/login?redirect={}", urlencoding::encode(req.uri().path()));
            return (StatusCode::SEE_OTHER, [("Location", redirect)]).into_response();
        }
    };

    req.extensions_mut().insert(Auth {
        token: session.token,
        user: session.user,
    });
    next.run(req).await
}
