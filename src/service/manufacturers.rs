//! Manufacturer operations: create, update, remove (soft delete), search,
//! get. Every operation takes the store and the request context explicitly
//! and is scoped to `ctx.tenant` throughout, id lookups included.

use crate::context::RequestContext;
use crate::error::AppError;
use crate::model::{
    LookupKey, Manufacturer, ManufacturerPatch, Page, PicInput, SearchQuery, SearchResult, Status,
};
use crate::store::{ManufacturerStore, SearchFilter};
use chrono::Utc;
use uuid::Uuid;

pub struct ManufacturerService;

impl ManufacturerService {
    /// Create a new manufacturer. `code` and `name` are required; `code`
    /// is checked first. The entity starts active and owned by the
    /// caller's tenant.
    pub async fn create(
        store: &dyn ManufacturerStore,
        model: ManufacturerPatch,
        ctx: &RequestContext,
    ) -> Result<Manufacturer, AppError> {
        let op = ctx.op("services/manufacturers:create");
        if model.code.as_deref().map(str::trim).filter(|c| !c.is_empty()).is_none() {
            return Err(AppError::Validation("code is required".into()));
        }
        if model.name.as_deref().map(str::trim).filter(|n| !n.is_empty()).is_none() {
            return Err(AppError::Validation("name is required".into()));
        }

        let now = Utc::now();
        let mut entity = Manufacturer {
            id: Uuid::new_v4(),
            tenant: ctx.tenant.clone(),
            code: String::new(),
            name: String::new(),
            description: None,
            pic: None,
            status: Status::Active,
            created_at: now,
            updated_at: now,
        };
        Self::apply_patch(store, &mut entity, model, ctx).await?;
        let saved = store.insert(&entity).await?;

        op.end();
        Ok(saved)
    }

    /// Partial update. Fails with not-found when the id does not resolve
    /// within the caller's tenant.
    pub async fn update(
        store: &dyn ManufacturerStore,
        id: Uuid,
        model: ManufacturerPatch,
        ctx: &RequestContext,
    ) -> Result<Manufacturer, AppError> {
        ctx.debug("services/manufacturers:update");

        let mut entity = store
            .find_by_id(&ctx.tenant, id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        Self::apply_patch(store, &mut entity, model, ctx).await?;
        store.save(&entity).await
    }

    /// Soft delete: flips status to inactive. The record stays fetchable
    /// by id and code.
    pub async fn remove(
        store: &dyn ManufacturerStore,
        id: Uuid,
        ctx: &RequestContext,
    ) -> Result<(), AppError> {
        let mut entity = store
            .find_by_id(&ctx.tenant, id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        entity.status = Status::Inactive;
        store.save(&entity).await?;
        Ok(())
    }

    /// Search within the tenant. Defaults to active records; `query.status`
    /// overrides, `query.name` is a case-insensitive substring match.
    /// `count` is the total match count regardless of paging.
    pub async fn search(
        store: &dyn ManufacturerStore,
        query: &SearchQuery,
        page: Option<&Page>,
        ctx: &RequestContext,
    ) -> Result<SearchResult, AppError> {
        let op = ctx.op("services/manufacturers:search");

        let filter = SearchFilter {
            tenant: ctx.tenant.clone(),
            status: Some(query.status.unwrap_or(Status::Active)),
            name_contains: query.name.clone(),
        };
        let count = store.count(&filter).await?;
        let items = store.find(&filter, page).await?;

        op.end();
        Ok(SearchResult { count, items })
    }

    /// Resolve by internal id or business code. Both branches are
    /// tenant-scoped. A miss is a silent `None`, not an error.
    pub async fn get(
        store: &dyn ManufacturerStore,
        key: &LookupKey,
        ctx: &RequestContext,
    ) -> Result<Option<Manufacturer>, AppError> {
        ctx.debug("services/manufacturers:get");
        match key {
            LookupKey::Id(id) => store.find_by_id(&ctx.tenant, *id).await,
            LookupKey::Code(code) => {
                store.find_one_by_code(&ctx.tenant, &code.to_lowercase()).await
            }
        }
    }

    /// Shared field-patch rule for Create and Update: only present fields
    /// change, and empty or whitespace-only strings count as absent, so a
    /// patch can never blank the business key or the name. `code` is
    /// lowercased and only reassigned when it actually differs, after
    /// checking that no other active record in the tenant holds it.
    async fn apply_patch(
        store: &dyn ManufacturerStore,
        entity: &mut Manufacturer,
        model: ManufacturerPatch,
        ctx: &RequestContext,
    ) -> Result<(), AppError> {
        if let Some(raw) = model.code.filter(|c| !c.trim().is_empty()) {
            let code = raw.to_lowercase();
            if entity.code != code {
                let existing = store.find_one_by_code(&ctx.tenant, &code).await?;
                if let Some(existing) = existing {
                    if existing.id != entity.id && existing.status == Status::Active {
                        return Err(AppError::Conflict(format!("'{}' already exists", code)));
                    }
                }
                entity.code = code;
            }
        }

        let pic = model
            .pic
            .filter(|p| !matches!(p, PicInput::Url(url) if url.trim().is_empty()));
        if let Some(pic) = pic {
            entity.pic = Some(pic.into_pic());
        }

        if let Some(name) = model.name.filter(|n| !n.trim().is_empty()) {
            entity.name = name;
        }

        if let Some(description) = model.description.filter(|d| !d.trim().is_empty()) {
            entity.description = Some(description);
        }

        if let Some(status) = model.status {
            entity.status = status;
        }

        Ok(())
    }
}
