//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::{AccountConfig, RegisterUserUseCase};
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{RegisterUserRequest, UserResponse};

/// Shared state for account handlers
pub struct AccountAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountConfig>,
}

impl<R> Clone for AccountAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /api/v1/users/register
pub async fn register_user<R>(
    State(state): State<AccountAppState<R>>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> AccountResult<(StatusCode, Json<UserResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(|e| AccountError::BadRequest(e.body_text()))?;

    let use_case = RegisterUserUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(req.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
