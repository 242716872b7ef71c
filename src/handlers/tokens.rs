use axum::response::Json;
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// POST /jwt - Sign the supplied payload and return an opaque token
///
/// The payload is caller-supplied and only its `email` field is read; there is
/// no check that the email belongs to a registered user. Expiry is the
/// configured window (365 days by default).
pub async fn issue(Json(payload): Json<Value>) -> Result<Json<Value>, ApiError> {
    let email = payload
        .get("email")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("payload must contain an email"))?;

    let claims = Claims::new(email.to_string());
    let token = auth::generate_jwt(&claims).map_err(|e| {
        tracing::error!("Token issuance failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(Json(json!({ "token": token })))
}
