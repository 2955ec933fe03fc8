// src/handlers/inventory.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::inventory::{InventoryItem, InventoryItemPayload, ProductionRecordPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FarmScope {
    pub farm: Option<Uuid>,
}

// ---
// Itens de estoque
// ---

#[utoipa::path(
    get,
    path = "/api/inventory/items",
    tag = "Inventory",
    params(FarmScope),
    responses((status = 200, body = [InventoryItem])),
    security(("api_jwt" = []))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FarmScope>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state
        .inventory_repo
        .list_items(user.id, scope.farm)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = InventoryItem), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state
        .inventory_repo
        .get_item(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Inventory item"))?;
    Ok(Json(item))
}

#[utoipa::path(
    post,
    path = "/api/inventory/items",
    tag = "Inventory",
    request_body = InventoryItemPayload,
    responses((status = 201, body = InventoryItem), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let item = app_state
        .inventory_repo
        .create_item(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    put,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path)),
    request_body = InventoryItemPayload,
    responses((status = 200, body = InventoryItem), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<InventoryItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let item = app_state
        .inventory_repo
        .update_item(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Inventory item"))?;
    Ok(Json(item))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/items/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_item(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.inventory_repo.delete_item(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Inventory item"))
    }
}

// ---
// Registros de produção
// ---

#[utoipa::path(
    get,
    path = "/api/inventory/production-records",
    tag = "Inventory",
    params(FarmScope),
    responses((status = 200, description = "Registros de produção")),
    security(("api_jwt" = []))
)]
pub async fn list_production_records(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FarmScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .inventory_repo
        .list_production_records(user.id, scope.farm)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/inventory/production-records",
    tag = "Inventory",
    request_body = ProductionRecordPayload,
    responses((status = 201, description = "Registro criado"), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_production_record(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ProductionRecordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .inventory_repo
        .create_production_record(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    delete,
    path = "/api/inventory/production-records/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_production_record(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state
        .inventory_repo
        .delete_production_record(id, user.id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Production record"))
    }
}
