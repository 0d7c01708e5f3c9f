//! Account Router

use axum::{Router, routing::post};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AccountAppState};

/// Create the account router with PostgreSQL repository
pub fn account_router(repo: PgUserRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create a generic account router for any repository implementation
pub fn account_router_generic<R>(repo: R, config: AccountConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register_user::<R>))
        .with_state(state)
}
