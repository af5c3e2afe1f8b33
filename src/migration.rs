//! Idempotent DDL run at startup.

use crate::error::AppError;
use sqlx::PgPool;

/// Create the manufacturers table and its indexes if they do not exist.
///
/// The partial unique index enforces "at most one active record per
/// (tenant, code)" at the storage level; the store translates violations
/// into the conflict error, so the service's pre-write existence check is
/// race-free in effect.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS manufacturers (
            id UUID PRIMARY KEY,
            tenant TEXT NOT NULL,
            code TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            pic_url TEXT,
            pic_thumbnail TEXT,
            status TEXT NOT NULL DEFAULT 'active',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS manufacturers_tenant_code_active \
         ON manufacturers (tenant, code) WHERE status = 'active'",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS manufacturers_tenant_status \
         ON manufacturers (tenant, status)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
