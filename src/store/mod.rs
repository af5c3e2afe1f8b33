//! Persistence seam: a document-style store contract over manufacturers.
//! Tenant scoping is an explicit parameter of every lookup; the store never
//! infers it.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use crate::model::{Manufacturer, Page, Status};
use async_trait::async_trait;
use uuid::Uuid;

/// Filter for find/count. `status: None` means no status filter (the
/// service normally supplies one).
#[derive(Clone, Debug)]
pub struct SearchFilter {
    pub tenant: String,
    pub status: Option<Status>,
    pub name_contains: Option<String>,
}

#[async_trait]
pub trait ManufacturerStore: Send + Sync {
    async fn insert(&self, entity: &Manufacturer) -> Result<Manufacturer, AppError>;

    async fn save(&self, entity: &Manufacturer) -> Result<Manufacturer, AppError>;

    async fn find_by_id(&self, tenant: &str, id: Uuid) -> Result<Option<Manufacturer>, AppError>;

    /// Code lookup carries no status filter: inactive records stay
    /// fetchable by code.
    async fn find_one_by_code(
        &self,
        tenant: &str,
        code: &str,
    ) -> Result<Option<Manufacturer>, AppError>;

    async fn find(
        &self,
        filter: &SearchFilter,
        page: Option<&Page>,
    ) -> Result<Vec<Manufacturer>, AppError>;

    async fn count(&self, filter: &SearchFilter) -> Result<u64, AppError>;

    /// Liveness probe for the readiness route.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
