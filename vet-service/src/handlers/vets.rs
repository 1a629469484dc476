//! `/vets` record endpoints.
//!
//! Each handler makes exactly one store call and maps its outcome to a
//! status code. Error bodies are plain text.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::models::{Vet, VetPayload};
use crate::startup::AppState;

fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Vet not found"))
}

/// GET /vets
#[tracing::instrument(skip(state))]
pub async fn list_vets(State(state): State<AppState>) -> Result<Json<Vec<Vet>>, AppError> {
    let vets = state.store.list().await.map_err(|e| {
        tracing::error!(error = %e, "Error retrieving vets");
        AppError::InternalError(anyhow::anyhow!("Error retrieving vets"))
    })?;

    tracing::info!(count = vets.len(), "Found vets");
    Ok(Json(vets))
}

/// GET /vets/:id
#[tracing::instrument(skip(state))]
pub async fn get_vet(
    State(state): State<AppState>,
    Path(vet_id): Path<String>,
) -> Result<Json<Vet>, AppError> {
    state
        .store
        .find_by_id(&vet_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error retrieving vet");
            AppError::InternalError(anyhow::anyhow!("Error retrieving vet"))
        })?
        .map(Json)
        .ok_or_else(not_found)
}

/// POST /vets
#[tracing::instrument(skip(state, payload))]
pub async fn create_vet(
    State(state): State<AppState>,
    payload: Result<Json<VetPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Vet>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected vet body");
        AppError::BadRequest(anyhow::anyhow!("Error creating vet"))
    })?;

    let vet = state.store.insert(payload).await.map_err(|e| {
        tracing::warn!(error = %e, "Store rejected vet");
        AppError::BadRequest(anyhow::anyhow!("Error creating vet"))
    })?;

    tracing::info!(vet_id = %vet.id, "Vet created");
    Ok((StatusCode::CREATED, Json(vet)))
}

/// PUT /vets/:id
#[tracing::instrument(skip(state, payload))]
pub async fn update_vet(
    State(state): State<AppState>,
    Path(vet_id): Path<String>,
    payload: Result<Json<VetPayload>, JsonRejection>,
) -> Result<Json<Vet>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Rejected vet body");
        AppError::BadRequest(anyhow::anyhow!("Error updating vet"))
    })?;

    let vet = state
        .store
        .update(&vet_id, payload)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(vet_id = %vet.id, "Vet updated");
    Ok(Json(vet))
}

/// DELETE /vets/:id
///
/// Answers 204 whether or not the record existed.
#[tracing::instrument(skip(state))]
pub async fn delete_vet(
    State(state): State<AppState>,
    Path(vet_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let removed = state.store.delete(&vet_id).await?;

    tracing::info!(removed, "Vet delete processed");
    Ok(StatusCode::NO_CONTENT)
}
