// src/handlers/farms.rs

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
    models::farms::{
        normalize_farm_type, EnvironmentalDataPayload, Farm, FarmPayload, Field, FieldPayload,
    },
};

// Filtro opcional ?farm= das listagens de filhos da fazenda
#[derive(Debug, Deserialize, IntoParams)]
pub struct FarmScope {
    pub farm: Option<Uuid>,
}

// ---
// Fazendas
// ---

#[utoipa::path(
    get,
    path = "/api/farms",
    tag = "Farms",
    responses((status = 200, body = [Farm])),
    security(("api_jwt" = []))
)]
pub async fn list_farms(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let farms = app_state.farm_repo.list_farms(user.id).await?;
    Ok(Json(farms))
}

#[utoipa::path(
    get,
    path = "/api/farms/{id}",
    tag = "Farms",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Farm), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_farm(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let farm = app_state
        .farm_repo
        .get_farm(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Farm"))?;
    Ok(Json(farm))
}

#[utoipa::path(
    post,
    path = "/api/farms",
    tag = "Farms",
    request_body = FarmPayload,
    responses((status = 201, body = Farm)),
    security(("api_jwt" = []))
)]
pub async fn create_farm(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<FarmPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let farm_type = normalize_farm_type(&payload.farm_type);
    let farm = app_state
        .farm_repo
        .create_farm(user.id, &payload, farm_type)
        .await?;
    Ok((StatusCode::CREATED, Json(farm)))
}

#[utoipa::path(
    put,
    path = "/api/farms/{id}",
    tag = "Farms",
    params(("id" = Uuid, Path)),
    request_body = FarmPayload,
    responses((status = 200, body = Farm), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_farm(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<FarmPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let farm_type = normalize_farm_type(&payload.farm_type);
    let farm = app_state
        .farm_repo
        .update_farm(id, user.id, &payload, farm_type)
        .await?
        .ok_or(AppError::NotFound("Farm"))?;
    Ok(Json(farm))
}

#[utoipa::path(
    delete,
    path = "/api/farms/{id}",
    tag = "Farms",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_farm(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.farm_repo.delete_farm(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Farm"))
    }
}

// ---
// Talhões
// ---

#[utoipa::path(
    get,
    path = "/api/fields",
    tag = "Farms",
    params(FarmScope),
    responses((status = 200, body = [Field])),
    security(("api_jwt" = []))
)]
pub async fn list_fields(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FarmScope>,
) -> Result<impl IntoResponse, AppError> {
    let fields = app_state.farm_repo.list_fields(user.id, scope.farm).await?;
    Ok(Json(fields))
}

#[utoipa::path(
    get,
    path = "/api/fields/{id}",
    tag = "Farms",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Field), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_field(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let field = app_state
        .farm_repo
        .get_field(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Field"))?;
    Ok(Json(field))
}

#[utoipa::path(
    post,
    path = "/api/fields",
    tag = "Farms",
    request_body = FieldPayload,
    responses((status = 201, body = Field), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_field(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<FieldPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let field = app_state.farm_repo.create_field(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(field)))
}

#[utoipa::path(
    put,
    path = "/api/fields/{id}",
    tag = "Farms",
    params(("id" = Uuid, Path)),
    request_body = FieldPayload,
    responses((status = 200, body = Field), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_field(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<FieldPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let field = app_state
        .farm_repo
        .update_field(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Field"))?;
    Ok(Json(field))
}

#[utoipa::path(
    delete,
    path = "/api/fields/{id}",
    tag = "Farms",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_field(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.farm_repo.delete_field(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Field"))
    }
}

// ---
// Dados ambientais
// ---

#[utoipa::path(
    get,
    path = "/api/environmental-data",
    tag = "Farms",
    params(FarmScope),
    responses((status = 200, description = "Leituras ambientais das fazendas do usuário")),
    security(("api_jwt" = []))
)]
pub async fn list_environmental_data(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FarmScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .farm_repo
        .list_environmental_data(user.id, scope.farm)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/environmental-data",
    tag = "Farms",
    request_body = EnvironmentalDataPayload,
    responses((status = 201, description = "Leitura registrada"), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_environmental_data(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<EnvironmentalDataPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .farm_repo
        .create_environmental_data(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}
