//! Server binary: connects to PostgreSQL, ensures tables, mounts common and
//! manufacturer routes, and logs the route-permission table for the
//! external authorization guard.

use catalog_service::routes::permissions;
use catalog_service::{
    common_routes, ensure_tables, manufacturer_routes, AppState, PgStore, ServerConfig,
};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("catalog_service=info".parse()?),
        )
        .init();

    let config = ServerConfig::from_env();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    ensure_tables(&pool).await?;

    let state = AppState {
        store: Arc::new(PgStore::new(pool)),
    };

    for (pattern, action) in permissions::iter_actions() {
        tracing::info!(
            pattern = pattern,
            method = %action.method,
            scopes = ?action.scopes,
            "route permissions"
        );
    }

    let app = Router::new()
        .merge(common_routes(state.clone()))
        .nest("/manufacturers", manufacturer_routes(state))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
