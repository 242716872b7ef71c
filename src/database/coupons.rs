use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Coupon, InsertAck, NewCoupon};
use crate::database::StoreError;

pub async fn list(pool: &PgPool) -> Result<Vec<Coupon>, StoreError> {
    let coupons = sqlx::query_as::<_, Coupon>("SELECT * FROM coupons ORDER BY created_at")
        .fetch_all(pool)
        .await?;
    Ok(coupons)
}

pub async fn insert(pool: &PgPool, coupon: &NewCoupon) -> Result<InsertAck, StoreError> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO coupons (id, code, discount, description, expires_at) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(&coupon.code)
    .bind(coupon.discount)
    .bind(&coupon.description)
    .bind(&coupon.expires_at)
    .execute(pool)
    .await?;
    Ok(InsertAck { acknowledged: true, inserted_id: id })
}
