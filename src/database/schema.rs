use sqlx::PgPool;
use tracing::info;

use crate::database::StoreError;

/// Idempotent schema bootstrap, one statement per call. Ids are generated in
/// application code, so no uuid extension is required.
const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id          UUID PRIMARY KEY,
        email       TEXT NOT NULL UNIQUE,
        name        TEXT,
        role        TEXT,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id             UUID PRIMARY KEY,
        owner_email    TEXT NOT NULL,
        name           TEXT NOT NULL,
        image          TEXT NOT NULL DEFAULT '',
        description    TEXT NOT NULL DEFAULT '',
        tags           TEXT[] NOT NULL DEFAULT '{}',
        external_link  TEXT NOT NULL DEFAULT '',
        upvotes        TEXT[] NOT NULL DEFAULT '{}',
        is_featured    BOOLEAN NOT NULL DEFAULT false,
        is_accepted    TEXT NOT NULL DEFAULT 'pending',
        is_reported    BOOLEAN NOT NULL DEFAULT false,
        created_at     TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    // product_id is intentionally not a foreign key; reviews survive product deletion
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id              UUID PRIMARY KEY,
        product_id      UUID NOT NULL,
        reviewer_name   TEXT NOT NULL DEFAULT '',
        reviewer_image  TEXT NOT NULL DEFAULT '',
        body            TEXT NOT NULL,
        rating          DOUBLE PRECISION NOT NULL,
        created_at      TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS coupons (
        id           UUID PRIMARY KEY,
        code         TEXT NOT NULL,
        discount     INT NOT NULL,
        description  TEXT NOT NULL DEFAULT '',
        expires_at   TEXT,
        created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS reviews_product_id_idx ON reviews (product_id)",
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Schema bootstrap complete ({} statements)", STATEMENTS.len());
    Ok(())
}
