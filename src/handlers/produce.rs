// src/handlers/produce.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::produce::{ProduceCollection, ProduceCollectionPayload, ProduceSummary},
};

// Rotas aninhadas: /api/farms/{farm_id}/produce[/...]

#[utoipa::path(
    get,
    path = "/api/farms/{farm_id}/produce",
    tag = "Produce",
    params(("farm_id" = Uuid, Path)),
    responses((status = 200, body = [ProduceCollection]), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn list_collections(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(farm_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.produce_repo.farm_owned(farm_id, user.id).await? {
        return Err(AppError::NotFound("Farm"));
    }
    let rows = app_state
        .produce_repo
        .list_collections(farm_id, user.id)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/farms/{farm_id}/produce/{id}",
    tag = "Produce",
    params(("farm_id" = Uuid, Path), ("id" = Uuid, Path)),
    responses((status = 200, body = ProduceCollection), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_collection(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((farm_id, id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let row = app_state
        .produce_repo
        .get_collection(id, farm_id, user.id)
        .await?
        .ok_or(AppError::NotFound("Produce collection"))?;
    Ok(Json(row))
}

#[utoipa::path(
    post,
    path = "/api/farms/{farm_id}/produce",
    tag = "Produce",
    params(("farm_id" = Uuid, Path)),
    request_body = ProduceCollectionPayload,
    responses((status = 201, body = ProduceCollection), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_collection(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(farm_id): Path<Uuid>,
    Json(payload): Json<ProduceCollectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .produce_repo
        .create_collection(farm_id, user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    put,
    path = "/api/farms/{farm_id}/produce/{id}",
    tag = "Produce",
    params(("farm_id" = Uuid, Path), ("id" = Uuid, Path)),
    request_body = ProduceCollectionPayload,
    responses((status = 200, body = ProduceCollection), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_collection(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((farm_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ProduceCollectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .produce_repo
        .update_collection(id, farm_id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Produce collection"))?;
    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/api/farms/{farm_id}/produce/{id}",
    tag = "Produce",
    params(("farm_id" = Uuid, Path), ("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_collection(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((farm_id, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    if app_state
        .produce_repo
        .delete_collection(id, farm_id, user.id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Produce collection"))
    }
}

#[utoipa::path(
    get,
    path = "/api/farms/{farm_id}/produce/summary",
    tag = "Produce",
    params(("farm_id" = Uuid, Path)),
    responses((status = 200, body = ProduceSummary), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(farm_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.produce_repo.summary(farm_id, user.id).await?;
    Ok(Json(summary))
}
