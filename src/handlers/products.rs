use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::database::models::{
    DeleteAck, InsertAck, NewProduct, Product, ProductEdit, UpdateAck, ACCEPT_ACCEPTED,
    ACCEPT_REJECTED,
};
use crate::database::{parse_id, products};
use crate::error::ApiError;

/// GET /products - List all products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = products::list(&state.pool).await?;
    Ok(Json(products))
}

/// GET /productDetails/:id - Fetch one product, or null if it does not exist
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let product = products::find(&state.pool, id).await?;
    match product {
        Some(p) => Ok(Json(serde_json::to_value(p).unwrap_or(Value::Null))),
        None => Ok(Json(Value::Null)),
    }
}

/// POST /addProduct - Insert a product submission
pub async fn add(
    State(state): State<AppState>,
    Json(product): Json<NewProduct>,
) -> Result<Json<InsertAck>, ApiError> {
    let ack = products::insert(&state.pool, &product).await?;
    Ok(Json(ack))
}

#[derive(Debug, Deserialize)]
pub struct UpvoteRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
}

/// PATCH /products - Record an upvote for the product named by `_id` in the body
///
/// At most one vote per email: a duplicate is a 400, not a silent no-op. The
/// membership check and the append are two statements, so concurrent votes
/// from the same email can still race through; that behavior is documented
/// and accepted.
pub async fn upvote(
    State(state): State<AppState>,
    Json(request): Json<UpvoteRequest>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_id(&request.id)?;

    match products::has_upvote(&state.pool, id, &request.email).await? {
        // Missing product behaves like any other zero-effect update
        None => Ok(Json(UpdateAck::rows(0))),
        Some(true) => Err(ApiError::bad_request("already upvoted")),
        Some(false) => {
            let ack = products::append_upvote(&state.pool, id, &request.email).await?;
            Ok(Json(ack))
        }
    }
}

/// PATCH /products/feature/:id - Mark a product featured (moderator)
pub async fn feature(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_id(&id)?;
    let ack = products::set_featured(&state.pool, id).await?;
    Ok(Json(ack))
}

/// PATCH /products/accept/:id - Accept a submission (moderator)
pub async fn accept(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_id(&id)?;
    let ack = products::set_accepted(&state.pool, id, ACCEPT_ACCEPTED).await?;
    Ok(Json(ack))
}

/// PATCH /products/reject/:id - Reject a submission
///
/// Requires authentication only, while accepting requires the moderator gate.
/// The asymmetry is inherited behavior, kept on purpose.
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_id(&id)?;
    let ack = products::set_accepted(&state.pool, id, ACCEPT_REJECTED).await?;
    Ok(Json(ack))
}

/// PATCH /products/report/:id - Flag a product as reported
///
/// No authentication required. Known external-boundary weakness; see DESIGN.md
/// before tightening, since clients rely on the open endpoint.
pub async fn report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_id(&id)?;
    let ack = products::set_reported(&state.pool, id).await?;
    Ok(Json(ack))
}

/// PATCH /products/update/:id - Overwrite the editable fields
///
/// Full-field overwrite, no diffing. Any authenticated caller may edit any
/// product; ownership is not re-checked.
pub async fn update_fields(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(edit): Json<ProductEdit>,
) -> Result<Json<UpdateAck>, ApiError> {
    let id = parse_id(&id)?;
    let ack = products::overwrite(&state.pool, id, &edit).await?;
    Ok(Json(ack))
}

/// DELETE /products/:id - Permanently delete a product
///
/// Reviews for the product are not cascaded.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, ApiError> {
    let id = parse_id(&id)?;
    let ack = products::delete(&state.pool, id).await?;
    Ok(Json(ack))
}
