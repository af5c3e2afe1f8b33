//! PostgreSQL store over sqlx.
//!
//! The `(tenant, code)` uniqueness for active records is enforced by a
//! partial unique index (see `migration`); unique violations surface as
//! `AppError::Conflict` so concurrent creates cannot slip past the
//! service's pre-write check.

use crate::error::AppError;
use crate::model::{Manufacturer, Page, Pic, Status};
use crate::store::{ManufacturerStore, SearchFilter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str =
    "id, tenant, code, name, description, pic_url, pic_thumbnail, status, created_at, updated_at";

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ManufacturerRow {
    id: Uuid,
    tenant: String,
    code: String,
    name: String,
    description: Option<String>,
    pic_url: Option<String>,
    pic_thumbnail: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ManufacturerRow {
    fn into_entity(self) -> Result<Manufacturer, AppError> {
        let status: Status = self
            .status
            .parse()
            .map_err(|e: String| AppError::Db(sqlx::Error::Decode(e.into())))?;
        let pic = match (self.pic_url, self.pic_thumbnail) {
            (Some(url), thumbnail) => Some(Pic {
                thumbnail: thumbnail.unwrap_or_else(|| url.clone()),
                url,
            }),
            (None, _) => None,
        };
        Ok(Manufacturer {
            id: self.id,
            tenant: self.tenant,
            code: self.code,
            name: self.name,
            description: self.description,
            pic,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// ILIKE pattern for a case-insensitive substring match; the needle is
/// matched literally (`%`, `_` and `\` escaped).
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Map unique-index violations on (tenant, code) to the conflict error the
/// pre-write check would have produced.
fn map_write_err(e: sqlx::Error, code: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some("23505") {
            return AppError::Conflict(format!("'{}' already exists", code));
        }
    }
    AppError::Db(e)
}

#[async_trait]
impl ManufacturerStore for PgStore {
    async fn insert(&self, entity: &Manufacturer) -> Result<Manufacturer, AppError> {
        let sql = format!(
            "INSERT INTO manufacturers ({}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW(), NOW()) \
             RETURNING {}",
            "id, tenant, code, name, description, pic_url, pic_thumbnail, status, created_at, updated_at",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = %entity.id, "insert");
        let row = sqlx::query_as::<_, ManufacturerRow>(&sql)
            .bind(entity.id)
            .bind(&entity.tenant)
            .bind(&entity.code)
            .bind(&entity.name)
            .bind(&entity.description)
            .bind(entity.pic.as_ref().map(|p| p.url.as_str()))
            .bind(entity.pic.as_ref().map(|p| p.thumbnail.as_str()))
            .bind(entity.status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_err(e, &entity.code))?;
        row.into_entity()
    }

    async fn save(&self, entity: &Manufacturer) -> Result<Manufacturer, AppError> {
        let sql = format!(
            "UPDATE manufacturers \
             SET code = $3, name = $4, description = $5, pic_url = $6, \
                 pic_thumbnail = $7, status = $8, updated_at = NOW() \
             WHERE id = $1 AND tenant = $2 \
             RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = %entity.id, "save");
        let row = sqlx::query_as::<_, ManufacturerRow>(&sql)
            .bind(entity.id)
            .bind(&entity.tenant)
            .bind(&entity.code)
            .bind(&entity.name)
            .bind(&entity.description)
            .bind(entity.pic.as_ref().map(|p| p.url.as_str()))
            .bind(entity.pic.as_ref().map(|p| p.thumbnail.as_str()))
            .bind(entity.status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_err(e, &entity.code))?;
        row.ok_or_else(|| AppError::NotFound(entity.id.to_string()))?
            .into_entity()
    }

    async fn find_by_id(&self, tenant: &str, id: Uuid) -> Result<Option<Manufacturer>, AppError> {
        let sql = format!(
            "SELECT {} FROM manufacturers WHERE id = $1 AND tenant = $2",
            COLUMNS
        );
        let row = sqlx::query_as::<_, ManufacturerRow>(&sql)
            .bind(id)
            .bind(tenant)
            .fetch_optional(&self.pool)
            .await?;
        row.map(ManufacturerRow::into_entity).transpose()
    }

    async fn find_one_by_code(
        &self,
        tenant: &str,
        code: &str,
    ) -> Result<Option<Manufacturer>, AppError> {
        let sql = format!(
            "SELECT {} FROM manufacturers WHERE tenant = $1 AND code = $2",
            COLUMNS
        );
        let row = sqlx::query_as::<_, ManufacturerRow>(&sql)
            .bind(tenant)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        row.map(ManufacturerRow::into_entity).transpose()
    }

    async fn find(
        &self,
        filter: &SearchFilter,
        page: Option<&Page>,
    ) -> Result<Vec<Manufacturer>, AppError> {
        let mut sql = format!("SELECT {} FROM manufacturers WHERE tenant = $1", COLUMNS);
        let mut n = 1;
        if filter.status.is_some() {
            n += 1;
            sql.push_str(&format!(" AND status = ${}", n));
        }
        if filter.name_contains.is_some() {
            n += 1;
            sql.push_str(&format!(" AND name ILIKE ${}", n));
        }
        // Stable scan order so offset/limit paging is deterministic.
        sql.push_str(" ORDER BY created_at");
        if let Some(p) = page {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", p.limit, p.skip));
        }
        tracing::debug!(sql = %sql, "find");

        let mut query = sqlx::query_as::<_, ManufacturerRow>(&sql).bind(&filter.tenant);
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }
        if let Some(name) = &filter.name_contains {
            query = query.bind(contains_pattern(name));
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(ManufacturerRow::into_entity).collect()
    }

    async fn count(&self, filter: &SearchFilter) -> Result<u64, AppError> {
        let mut sql = String::from("SELECT COUNT(*) FROM manufacturers WHERE tenant = $1");
        let mut n = 1;
        if filter.status.is_some() {
            n += 1;
            sql.push_str(&format!(" AND status = ${}", n));
        }
        if filter.name_contains.is_some() {
            n += 1;
            sql.push_str(&format!(" AND name ILIKE ${}", n));
        }
        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(&filter.tenant);
        if let Some(status) = filter.status {
            query = query.bind(status.as_str());
        }
        if let Some(name) = &filter.name_contains {
            query = query.bind(contains_pattern(name));
        }
        let count = query.fetch_one(&self.pool).await?;
        Ok(count as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
