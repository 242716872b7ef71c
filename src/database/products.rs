use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{DeleteAck, InsertAck, NewProduct, Product, ProductEdit, UpdateAck};
use crate::database::StoreError;

pub async fn list(pool: &PgPool) -> Result<Vec<Product>, StoreError> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY created_at")
        .fetch_all(pool)
        .await?;
    Ok(products)
}

pub async fn find(pool: &PgPool, id: Uuid) -> Result<Option<Product>, StoreError> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

pub async fn insert(pool: &PgPool, product: &NewProduct) -> Result<InsertAck, StoreError> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO products (id, owner_email, name, image, description, tags, external_link) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(id)
    .bind(&product.owner_email)
    .bind(&product.name)
    .bind(&product.image)
    .bind(&product.description)
    .bind(&product.tags)
    .bind(&product.external_link)
    .execute(pool)
    .await?;
    Ok(InsertAck { acknowledged: true, inserted_id: id })
}

/// Whether `email` is already in the product's upvote set. `None` means no
/// such product. This read and the following append are separate statements;
/// concurrent callers may race (documented behavior).
pub async fn has_upvote(pool: &PgPool, id: Uuid, email: &str) -> Result<Option<bool>, StoreError> {
    let row: Option<(bool,)> =
        sqlx::query_as("SELECT $2 = ANY(upvotes) FROM products WHERE id = $1")
            .bind(id)
            .bind(email)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(present,)| present))
}

pub async fn append_upvote(pool: &PgPool, id: Uuid, email: &str) -> Result<UpdateAck, StoreError> {
    let result = sqlx::query("UPDATE products SET upvotes = array_append(upvotes, $2) WHERE id = $1")
        .bind(id)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(UpdateAck::rows(result.rows_affected()))
}

/// One-way flag: never unset
pub async fn set_featured(pool: &PgPool, id: Uuid) -> Result<UpdateAck, StoreError> {
    let result = sqlx::query("UPDATE products SET is_featured = true WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(UpdateAck::rows(result.rows_affected()))
}

/// Idempotent: re-applying the same state is a plain overwrite
pub async fn set_accepted(pool: &PgPool, id: Uuid, state: &str) -> Result<UpdateAck, StoreError> {
    let result = sqlx::query("UPDATE products SET is_accepted = $2 WHERE id = $1")
        .bind(id)
        .bind(state)
        .execute(pool)
        .await?;
    Ok(UpdateAck::rows(result.rows_affected()))
}

/// One-way flag: never unset
pub async fn set_reported(pool: &PgPool, id: Uuid) -> Result<UpdateAck, StoreError> {
    let result = sqlx::query("UPDATE products SET is_reported = true WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(UpdateAck::rows(result.rows_affected()))
}

/// Unconditional overwrite of the editable fields
pub async fn overwrite(pool: &PgPool, id: Uuid, edit: &ProductEdit) -> Result<UpdateAck, StoreError> {
    let result = sqlx::query(
        "UPDATE products SET name = $2, image = $3, description = $4, tags = $5, external_link = $6 \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&edit.name)
    .bind(&edit.image)
    .bind(&edit.description)
    .bind(&edit.tags)
    .bind(&edit.external_link)
    .execute(pool)
    .await?;
    Ok(UpdateAck::rows(result.rows_affected()))
}

/// Permanent delete; reviews for the product are left in place
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<DeleteAck, StoreError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(DeleteAck { acknowledged: true, deleted_count: result.rows_affected() })
}

pub async fn count(pool: &PgPool) -> Result<i64, StoreError> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
