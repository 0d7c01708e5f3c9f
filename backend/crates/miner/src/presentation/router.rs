//! Miner Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::MinerConfig;
use crate::domain::repository::{DocumentStore, MinerRepository};
use crate::infra::{file_store::LocalFileStore, postgres::PgMinerRepository};
use crate::presentation::handlers::{self, MinerAppState};

/// Create the miner router with PostgreSQL and local-disk storage
pub fn miner_router(repo: PgMinerRepository, store: LocalFileStore, config: MinerConfig) -> Router {
    miner_router_generic(repo, store, config)
}

/// Create a generic miner router for any repository and store
pub fn miner_router_generic<R, S>(repo: R, store: S, config: MinerConfig) -> Router
where
    R: MinerRepository + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let body_limit = config.max_request_bytes;
    let state = MinerAppState {
        repo: Arc::new(repo),
        store: Arc::new(store),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            post(handlers::register_miner::<R, S>).get(handlers::list_miners::<R, S>),
        )
        .route(
            "/{id}",
            get(handlers::get_miner::<R, S>).delete(handlers::delete_miner::<R, S>),
        )
        .route("/{id}/totp", get(handlers::current_totp::<R, S>))
        .route("/{id}/totp/validate", post(handlers::validate_totp::<R, S>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
