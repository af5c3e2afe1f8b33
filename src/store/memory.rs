//! In-memory store: backs the test suite and local demos. Matches the
//! Postgres store's behavior, including the active-(tenant, code) conflict
//! on write.

use crate::error::AppError;
use crate::model::{Manufacturer, Page, Status};
use crate::store::{ManufacturerStore, SearchFilter};
use async_trait::async_trait;
use regex::RegexBuilder;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<Vec<Manufacturer>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A poisoned lock only means a test panicked mid-write; the data is
    /// still usable, so recover instead of propagating the panic.
    fn items(&self) -> std::sync::MutexGuard<'_, Vec<Manufacturer>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn matches(filter: &SearchFilter, m: &Manufacturer) -> bool {
    if m.tenant != filter.tenant {
        return false;
    }
    if let Some(status) = filter.status {
        if m.status != status {
            return false;
        }
    }
    if let Some(name) = &filter.name_contains {
        // Case-insensitive literal substring, same contract as the SQL
        // ILIKE rendition.
        let re = RegexBuilder::new(&regex::escape(name))
            .case_insensitive(true)
            .build();
        match re {
            Ok(re) if re.is_match(&m.name) => {}
            _ => return false,
        }
    }
    true
}

fn active_code_taken(items: &[Manufacturer], entity: &Manufacturer) -> bool {
    entity.status == Status::Active
        && items.iter().any(|m| {
            m.id != entity.id
                && m.tenant == entity.tenant
                && m.code == entity.code
                && m.status == Status::Active
        })
}

#[async_trait]
impl ManufacturerStore for MemoryStore {
    async fn insert(&self, entity: &Manufacturer) -> Result<Manufacturer, AppError> {
        let mut items = self.items();
        if active_code_taken(&items, entity) {
            return Err(AppError::Conflict(format!("'{}' already exists", entity.code)));
        }
        items.push(entity.clone());
        Ok(entity.clone())
    }

    async fn save(&self, entity: &Manufacturer) -> Result<Manufacturer, AppError> {
        let mut items = self.items();
        if active_code_taken(&items, entity) {
            return Err(AppError::Conflict(format!("'{}' already exists", entity.code)));
        }
        let slot = items
            .iter_mut()
            .find(|m| m.id == entity.id && m.tenant == entity.tenant)
            .ok_or_else(|| AppError::NotFound(entity.id.to_string()))?;
        *slot = entity.clone();
        Ok(entity.clone())
    }

    async fn find_by_id(&self, tenant: &str, id: Uuid) -> Result<Option<Manufacturer>, AppError> {
        let items = self.items();
        Ok(items
            .iter()
            .find(|m| m.id == id && m.tenant == tenant)
            .cloned())
    }

    async fn find_one_by_code(
        &self,
        tenant: &str,
        code: &str,
    ) -> Result<Option<Manufacturer>, AppError> {
        let items = self.items();
        Ok(items
            .iter()
            .find(|m| m.tenant == tenant && m.code == code)
            .cloned())
    }

    async fn find(
        &self,
        filter: &SearchFilter,
        page: Option<&Page>,
    ) -> Result<Vec<Manufacturer>, AppError> {
        let items = self.items();
        let selected = items.iter().filter(|m| matches(filter, m)).cloned();
        Ok(match page {
            Some(p) => selected
                .skip(p.skip as usize)
                .take(p.limit as usize)
                .collect(),
            None => selected.collect(),
        })
    }

    async fn count(&self, filter: &SearchFilter) -> Result<u64, AppError> {
        let items = self.items();
        Ok(items.iter().filter(|m| matches(filter, m)).count() as u64)
    }
}
