use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::{NewUser, UpdateAck, User, ROLE_ADMIN, ROLE_MODERATOR};
use crate::database::{parse_id, users};
use crate::error::ApiError;

/// POST /users - Create a user if the email is not already registered
///
/// A duplicate email is reported with a 200 and `insertedId: null` rather than
/// a conflict status. Existing clients parse this shape.
pub async fn create(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<Json<Value>, ApiError> {
    if users::find_by_email(&state.pool, &user.email).await?.is_some() {
        return Ok(Json(json!({ "message": "user already exists", "insertedId": null })));
    }

    let ack = users::insert(&state.pool, &user).await?;
    Ok(Json(serde_json::to_value(ack).unwrap_or(Value::Null)))
}

/// GET /users/role/:email - Return the stored role, or null if absent
pub async fn role(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user = users::find_by_email(&state.pool, &email).await?;
    let role = user.and_then(|u| u.role);
    Ok(Json(json!({ "role": role })))
}

/// GET /users/:email - List every user except the caller's own email (admin)
pub async fn list_except(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = users::list_except(&state.pool, &email).await?;
    Ok(Json(users))
}

/// PATCH /users/mod/:id - Promote a user to moderator (admin)
pub async fn promote_moderator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_id(&id)?;
    let ack = users::set_role(&state.pool, id, ROLE_MODERATOR).await?;
    Ok(Json(ack))
}

/// PATCH /users/admin/:id - Promote a user to admin (admin)
pub async fn promote_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_id(&id)?;
    let ack = users::set_role(&state.pool, id, ROLE_ADMIN).await?;
    Ok(Json(ack))
}
