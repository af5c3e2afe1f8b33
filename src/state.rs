//! Shared application state for all routes.

use crate::store::ManufacturerStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ManufacturerStore>,
}
