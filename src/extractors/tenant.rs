//! Extract the request context from the X-Tenant-ID header.

use crate::context::RequestContext;
use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the tenant id.
pub const TENANT_ID_HEADER: &str = "X-Tenant-ID";

/// Every catalog operation is tenant-scoped, so a missing or empty header
/// is rejected before any handler runs.
#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(TENANT_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(RequestContext::new)
            .ok_or_else(|| AppError::BadRequest(format!("{} header is required", TENANT_ID_HEADER)))
    }
}
