use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::{products, reviews, users};
use crate::error::ApiError;

/// GET /stats - Document counts for the admin dashboard (admin)
pub async fn summary(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let users = users::count(&state.pool).await?;
    let products = products::count(&state.pool).await?;
    let reviews = reviews::count(&state.pool).await?;

    Ok(Json(json!({
        "users": users,
        "products": products,
        "reviews": reviews,
    })))
}
