//! Multi-tenant manufacturer catalog: REST backend library.

pub mod config;
pub mod context;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use context::RequestContext;
pub use error::AppError;
pub use migration::ensure_tables;
pub use model::{LookupKey, Manufacturer, ManufacturerPatch, Page, Pic, SearchQuery, SearchResult, Status};
pub use response::{SuccessMany, SuccessOne};
pub use routes::permissions::{required_scopes, RouteAction, RouteDescriptor, MANUFACTURER_ROUTES};
pub use routes::{common_routes, manufacturer_routes};
pub use service::ManufacturerService;
pub use state::AppState;
pub use store::memory::MemoryStore;
pub use store::postgres::PgStore;
pub use store::{ManufacturerStore, SearchFilter};
