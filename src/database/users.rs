use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{InsertAck, NewUser, UpdateAck, User};
use crate::database::StoreError;

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn insert(pool: &PgPool, user: &NewUser) -> Result<InsertAck, StoreError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, email, name) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(&user.email)
        .bind(&user.name)
        .execute(pool)
        .await?;
    Ok(InsertAck { acknowledged: true, inserted_id: id })
}

/// All users except the caller's own email
pub async fn list_except(pool: &PgPool, email: &str) -> Result<Vec<User>, StoreError> {
    let users =
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email <> $1 ORDER BY created_at")
            .bind(email)
            .fetch_all(pool)
            .await?;
    Ok(users)
}

pub async fn set_role(pool: &PgPool, id: Uuid, role: &str) -> Result<UpdateAck, StoreError> {
    let result = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
        .bind(id)
        .bind(role)
        .execute(pool)
        .await?;
    Ok(UpdateAck::rows(result.rows_affected()))
}

pub async fn count(pool: &PgPool) -> Result<i64, StoreError> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
