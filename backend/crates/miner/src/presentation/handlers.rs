//! HTTP Handlers

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use kernel::id::MinerId;
use kernel::pagination::{Page, PageQuery, PageRequest};
use std::sync::Arc;

use crate::application::config::MinerConfig;
use crate::application::{
    MinerQueryUseCase, MinerTotpUseCase, RegisterMinerInput, RegisterMinerUseCase,
};
use crate::domain::repository::{DocumentStore, MinerRepository};
use crate::domain::value_object::{
    document_role::DocumentRole, uploaded_document::UploadedDocument,
};
use crate::error::{MinerError, MinerResult};
use crate::presentation::dto::{
    MinerResponse, RegisterMinerResponse, TotpCodeResponse, TotpValidateRequest,
    TotpValidateResponse,
};

/// Shared state for miner handlers
pub struct MinerAppState<R, S>
where
    R: MinerRepository + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub store: Arc<S>,
    pub config: Arc<MinerConfig>,
}

impl<R, S> Clone for MinerAppState<R, S>
where
    R: MinerRepository + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

fn parse_miner_id(raw: &str) -> MinerResult<MinerId> {
    Ok(MinerId::parse_str(raw)?)
}

// ============================================================================
// Registration
// ============================================================================

/// POST /api/v1/miners (multipart/form-data)
pub async fn register_miner<R, S>(
    State(state): State<MinerAppState<R, S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> MinerResult<(StatusCode, Json<RegisterMinerResponse>)>
where
    R: MinerRepository + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let multipart = multipart.map_err(|e| MinerError::BadRequest(e.body_text()))?;
    let input = read_registration_form(multipart).await?;

    let use_case = RegisterMinerUseCase::new(
        state.repo.clone(),
        state.store.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

/// Collect text fields and document parts. File inputs left empty by the
/// browser (no name, no bytes) count as absent.
async fn read_registration_form(mut multipart: Multipart) -> MinerResult<RegisterMinerInput> {
    let mut input = RegisterMinerInput::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(role) = DocumentRole::from_field_name(&name) {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let content = field.bytes().await.map_err(multipart_error)?;
            if content.is_empty() && filename.is_empty() {
                continue;
            }
            input
                .documents
                .push(UploadedDocument::new(role, content, content_type, filename));
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        match name.as_str() {
            "full_name" => input.full_name = value,
            "last_name" => input.last_name = value,
            "id_number" => input.id_number = value,
            "phone_number" => input.phone_number = Some(value),
            "email" => input.email = value,
            "miner_type" | "category" => input.category = value,
            other => tracing::debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    Ok(input)
}

fn multipart_error(err: MultipartError) -> MinerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        MinerError::PayloadTooLarge
    } else {
        MinerError::BadRequest(err.body_text())
    }
}

// ============================================================================
// Queries
// ============================================================================

/// GET /api/v1/miners?page=1&limit=10
pub async fn list_miners<R, S>(
    State(state): State<MinerAppState<R, S>>,
    Query(query): Query<PageQuery>,
) -> MinerResult<Json<Page<MinerResponse>>>
where
    R: MinerRepository + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let use_case = MinerQueryUseCase::new(state.repo.clone());
    let page = use_case.list(PageRequest::from(query)).await?;

    Ok(Json(page.map(|miner| MinerResponse::from(&miner))))
}

/// GET /api/v1/miners/{id}
pub async fn get_miner<R, S>(
    State(state): State<MinerAppState<R, S>>,
    Path(id): Path<String>,
) -> MinerResult<Json<MinerResponse>>
where
    R: MinerRepository + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let miner_id = parse_miner_id(&id)?;
    let use_case = MinerQueryUseCase::new(state.repo.clone());
    let miner = use_case.get(&miner_id).await?;

    Ok(Json(MinerResponse::from(&miner)))
}

/// DELETE /api/v1/miners/{id}
pub async fn delete_miner<R, S>(
    State(state): State<MinerAppState<R, S>>,
    Path(id): Path<String>,
) -> MinerResult<StatusCode>
where
    R: MinerRepository + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let miner_id = parse_miner_id(&id)?;
    let use_case = MinerQueryUseCase::new(state.repo.clone());
    use_case.delete(&miner_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// TOTP
// ============================================================================

/// GET /api/v1/miners/{id}/totp
pub async fn current_totp<R, S>(
    State(state): State<MinerAppState<R, S>>,
    Path(id): Path<String>,
) -> MinerResult<Json<TotpCodeResponse>>
where
    R: MinerRepository + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let miner_id = parse_miner_id(&id)?;
    let use_case = MinerTotpUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.current_code(&miner_id).await?;

    Ok(Json(output.into()))
}

/// POST /api/v1/miners/{id}/totp/validate
pub async fn validate_totp<R, S>(
    State(state): State<MinerAppState<R, S>>,
    Path(id): Path<String>,
    payload: Result<Json<TotpValidateRequest>, JsonRejection>,
) -> MinerResult<Json<TotpValidateResponse>>
where
    R: MinerRepository + Send + Sync + 'static,
    S: DocumentStore + Send + Sync + 'static,
{
    let miner_id = parse_miner_id(&id)?;
    let Json(req) = payload.map_err(|e| MinerError::BadRequest(e.body_text()))?;
    let use_case = MinerTotpUseCase::new(state.repo.clone(), state.config.clone());
    use_case.validate_code(&miner_id, &req.code).await?;

    Ok(Json(TotpValidateResponse { valid: true }))
}
