use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::middleware::auth::Auth;

/// Admin authorization middleware
///
/// Must be layered after [`super::auth_middleware`] so the [`Auth`]
/// extension is present. Non-admin users get the 403 page; the backend
/// still enforces the role on every admin endpoint, this only keeps the
/// pages out of sight.
pub async fn admin_middleware(req: Request, next: Next) -> Response {
    match req.extensions().get::<Auth>() {
        Some(auth) if auth.user.role.is_admin() => next.run(req).await,
        Some(auth) => {
            tracing::warn!(user_id = %auth.user.id, "Non-admin user blocked from admin page");
            AppError::Forbidden.into_response()
        }
        None => AppError::Forbidden.into_response(),
    }
}
