use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::AuthUser;
use crate::app::AppState;
use crate::database::models::{ROLE_ADMIN, ROLE_MODERATOR};
use crate::database::users;
use crate::error::ApiError;

/// Gate requiring the caller's stored role to be exactly "moderator".
/// An admin token does NOT pass (roles are flat capabilities, not a hierarchy).
pub async fn require_moderator(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(&state, request, next, ROLE_MODERATOR).await
}

/// Gate requiring the caller's stored role to be exactly "admin".
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(&state, request, next, ROLE_ADMIN).await
}

/// One read, no mutation: look up the caller's user row and compare its role
/// to the required literal. Missing row or mismatch both fail closed.
async fn gate(
    state: &AppState,
    request: Request,
    next: Next,
    required: &str,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Authentication required before role check"))?;

    let user = users::find_by_email(&state.pool, &auth_user.email).await?;

    match user.and_then(|u| u.role) {
        Some(role) if role == required => Ok(next.run(request).await),
        stored => {
            tracing::warn!(
                "Role gate rejected '{}': required '{}', stored {:?}",
                auth_user.email,
                required,
                stored
            );
            Err(ApiError::forbidden(format!("{} role required", required)))
        }
    }
}
