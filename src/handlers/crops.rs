// src/handlers/crops.rs

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
    models::crops::{
        Crop, CropAssignmentPayload, CropExpensePayload, CropPayload, CropTask, CropTaskPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FieldScope {
    pub field: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CropScope {
    pub crop: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TaskScope {
    pub task: Option<Uuid>,
}

// ---
// Culturas
// ---

#[utoipa::path(
    get,
    path = "/api/crops",
    tag = "Crops",
    params(FieldScope),
    responses((status = 200, body = [Crop])),
    security(("api_jwt" = []))
)]
pub async fn list_crops(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FieldScope>,
) -> Result<impl IntoResponse, AppError> {
    let crops = app_state.crop_repo.list_crops(user.id, scope.field).await?;
    Ok(Json(crops))
}

#[utoipa::path(
    get,
    path = "/api/crops/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Crop), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_crop(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let crop = app_state
        .crop_repo
        .get_crop(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Crop"))?;
    Ok(Json(crop))
}

#[utoipa::path(
    post,
    path = "/api/crops",
    tag = "Crops",
    request_body = CropPayload,
    responses((status = 201, body = Crop), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_crop(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CropPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let crop = app_state.crop_repo.create_crop(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(crop)))
}

#[utoipa::path(
    put,
    path = "/api/crops/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path)),
    request_body = CropPayload,
    responses((status = 200, body = Crop), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_crop(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CropPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let crop = app_state
        .crop_repo
        .update_crop(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Crop"))?;
    Ok(Json(crop))
}

#[utoipa::path(
    delete,
    path = "/api/crops/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_crop(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.crop_repo.delete_crop(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Crop"))
    }
}

// ---
// Tarefas
// ---

#[utoipa::path(
    get,
    path = "/api/crop-tasks",
    tag = "Crops",
    params(CropScope),
    responses((status = 200, body = [CropTask])),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<CropScope>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state.crop_repo.list_tasks(user.id, scope.crop).await?;
    Ok(Json(tasks))
}

#[utoipa::path(
    post,
    path = "/api/crop-tasks",
    tag = "Crops",
    request_body = CropTaskPayload,
    responses((status = 201, body = CropTask), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CropTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let task = app_state.crop_repo.create_task(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    put,
    path = "/api/crop-tasks/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path)),
    request_body = CropTaskPayload,
    responses((status = 200, body = CropTask), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CropTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let task = app_state
        .crop_repo
        .update_task(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Crop task"))?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/api/crop-tasks/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.crop_repo.delete_task(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Crop task"))
    }
}

// ---
// Atribuições de funcionários
// ---

#[utoipa::path(
    get,
    path = "/api/crop-assignments",
    tag = "Crops",
    params(TaskScope),
    responses((status = 200, description = "Atribuições das tarefas de cultura")),
    security(("api_jwt" = []))
)]
pub async fn list_assignments(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<TaskScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .crop_repo
        .list_assignments(user.id, scope.task)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/crop-assignments",
    tag = "Crops",
    request_body = CropAssignmentPayload,
    responses((status = 201, description = "Funcionário atribuído"), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_assignment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CropAssignmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .crop_repo
        .create_assignment(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    delete,
    path = "/api/crop-assignments/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_assignment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.crop_repo.delete_assignment(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Assignment"))
    }
}

// ---
// Despesas
// ---

#[utoipa::path(
    get,
    path = "/api/crop-expenses",
    tag = "Crops",
    params(CropScope),
    responses((status = 200, description = "Despesas das culturas")),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<CropScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .crop_repo
        .list_expenses(user.id, scope.crop)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/crop-expenses",
    tag = "Crops",
    request_body = CropExpensePayload,
    responses((status = 201, description = "Despesa registrada"), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CropExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state.crop_repo.create_expense(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    delete,
    path = "/api/crop-expenses/{id}",
    tag = "Crops",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.crop_repo.delete_expense(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Expense"))
    }
}
