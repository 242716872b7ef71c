use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::app::AppState;
use crate::database::models::{InsertAck, NewReview, Review};
use crate::database::{parse_id, reviews};
use crate::error::ApiError;

/// GET /reviews/:id - List reviews for a product
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let product_id = parse_id(&id)?;
    let reviews = reviews::list_for_product(&state.pool, product_id).await?;
    Ok(Json(reviews))
}

/// POST /reviews - Insert a review; immutable once created
pub async fn create(
    State(state): State<AppState>,
    Json(review): Json<NewReview>,
) -> Result<Json<InsertAck>, ApiError> {
    let product_id = parse_id(&review.product_id)?;
    let ack = reviews::insert(
        &state.pool,
        product_id,
        &review.reviewer_name,
        &review.reviewer_image,
        &review.body,
        review.rating,
    )
    .await?;
    Ok(Json(ack))
}
