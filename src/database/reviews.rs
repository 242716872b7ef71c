use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{InsertAck, Review};
use crate::database::StoreError;

pub async fn list_for_product(pool: &PgPool, product_id: Uuid) -> Result<Vec<Review>, StoreError> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE product_id = $1 ORDER BY created_at",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn insert(
    pool: &PgPool,
    product_id: Uuid,
    reviewer_name: &str,
    reviewer_image: &str,
    body: &str,
    rating: f64,
) -> Result<InsertAck, StoreError> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO reviews (id, product_id, reviewer_name, reviewer_image, body, rating) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id)
    .bind(product_id)
    .bind(reviewer_name)
    .bind(reviewer_image)
    .bind(body)
    .bind(rating)
    .execute(pool)
    .await?;
    Ok(InsertAck { acknowledged: true, inserted_id: id })
}

pub async fn count(pool: &PgPool) -> Result<i64, StoreError> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
