use axum::{extract::State, response::Json};

use crate::app::AppState;
use crate::database::coupons;
use crate::database::models::{Coupon, InsertAck, NewCoupon};
use crate::error::ApiError;

/// GET /coupons - List all coupons
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Coupon>>, ApiError> {
    let coupons = coupons::list(&state.pool).await?;
    Ok(Json(coupons))
}

/// POST /coupons - Insert a coupon (admin)
pub async fn create(
    State(state): State<AppState>,
    Json(coupon): Json<NewCoupon>,
) -> Result<Json<InsertAck>, ApiError> {
    let ack = coupons::insert(&state.pool, &coupon).await?;
    Ok(Json(ack))
}
