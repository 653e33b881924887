use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::provider::{Model, ProviderInput};
use tracing::{error, info, warn};

use crate::errors::ApiError;
use crate::openapi::{CreateProviderDoc, MessageDoc, ProviderDoc, UpdateProviderDoc};
use crate::routes::AppState;

/// The router never yields an empty `:id`, but a blank one (e.g. `%20`) can still arrive.
fn require_id(id: &str) -> Result<&str, ApiError> {
    if id.trim().is_empty() {
        Err(ApiError::missing_id())
    } else {
        Ok(id)
    }
}

/// Create and update failures are presumed to be bad input, so they become 400.
fn read_body(payload: Result<Json<ProviderInput>, JsonRejection>) -> Result<ProviderInput, ApiError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

#[utoipa::path(
    post,
    path = "/api/providers/",
    tag = "providers",
    request_body = CreateProviderDoc,
    responses(
        (status = 201, description = "Provider created", body = ProviderDoc),
        (status = 400, description = "Validation failure", body = MessageDoc)
    )
)]
pub async fn create_provider(
    State(state): State<AppState>,
    payload: Result<Json<ProviderInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Model>), ApiError> {
    let input = read_body(payload)?;
    match state.providers.create_provider(input).await {
        Ok(m) => {
            info!(id = %m.id, service_type = %m.service_type, "created provider");
            Ok((StatusCode::CREATED, Json(m)))
        }
        Err(e) => {
            warn!(err = %e, "create provider failed");
            Err(ApiError::bad_request(e.to_string()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/providers/",
    tag = "providers",
    responses(
        (status = 200, description = "All providers", body = [ProviderDoc]),
        (status = 500, description = "Store failure", body = MessageDoc)
    )
)]
pub async fn list_providers(State(state): State<AppState>) -> Result<Json<Vec<Model>>, ApiError> {
    match state.providers.get_all_providers().await {
        Ok(list) => {
            info!(count = list.len(), "list providers");
            Ok(Json(list))
        }
        Err(e) => {
            error!(err = %e, "list providers failed");
            Err(ApiError::internal(e.to_string()))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/providers/{id}",
    tag = "providers",
    params(("id" = String, Path, description = "24 hex character provider id")),
    responses(
        (status = 200, description = "Provider", body = ProviderDoc),
        (status = 400, description = "Missing id", body = MessageDoc),
        (status = 404, description = "No such provider", body = MessageDoc),
        (status = 500, description = "Store failure or malformed id", body = MessageDoc)
    )
)]
pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Model>, ApiError> {
    let id = require_id(&id)?;
    match state.providers.get_provider_by_id(id).await {
        Ok(Some(m)) => Ok(Json(m)),
        Ok(None) => Err(ApiError::not_found()),
        Err(e) => {
            error!(%id, err = %e, "get provider failed");
            Err(ApiError::internal(e.to_string()))
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/providers/{id}",
    tag = "providers",
    params(("id" = String, Path, description = "24 hex character provider id")),
    request_body = UpdateProviderDoc,
    responses(
        (status = 200, description = "Updated provider", body = ProviderDoc),
        (status = 400, description = "Missing id, malformed id or validation failure", body = MessageDoc),
        (status = 404, description = "No such provider", body = MessageDoc)
    )
)]
pub async fn update_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProviderInput>, JsonRejection>,
) -> Result<Json<Model>, ApiError> {
    let id = require_id(&id)?;
    let patch = read_body(payload)?;
    match state.providers.update_provider(id, patch).await {
        Ok(Some(m)) => {
            info!(id = %m.id, status = ?m.status, "updated provider");
            Ok(Json(m))
        }
        Ok(None) => Err(ApiError::not_found()),
        Err(e) => {
            warn!(%id, err = %e, "update provider failed");
            Err(ApiError::bad_request(e.to_string()))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/providers/{id}",
    tag = "providers",
    params(("id" = String, Path, description = "24 hex character provider id")),
    responses(
        (status = 204, description = "Provider deleted"),
        (status = 400, description = "Missing id", body = MessageDoc),
        (status = 404, description = "No such provider", body = MessageDoc),
        (status = 500, description = "Store failure or malformed id", body = MessageDoc)
    )
)]
pub async fn delete_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = require_id(&id)?;
    match state.providers.delete_provider(id).await {
        Ok(Some(m)) => {
            info!(id = %m.id, "deleted provider");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(None) => Err(ApiError::not_found()),
        Err(e) => {
            error!(%id, err = %e, "delete provider failed");
            Err(ApiError::internal(e.to_string()))
        }
    }
}
