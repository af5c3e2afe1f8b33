//! Manufacturer routes. Patterns and verbs mirror the permission table in
//! `routes::permissions`; scope enforcement belongs to the external guard
//! consuming that table.

use crate::handlers::manufacturers::{create, get, remove, search, update};
use crate::state::AppState;
use axum::{routing::get as get_route, Router};

pub fn manufacturer_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get_route(search).post(create))
        .route("/:id", get_route(get).put(update).delete(remove))
        .with_state(state)
}
