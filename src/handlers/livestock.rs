// src/handlers/livestock.rs

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
    models::livestock::{
        Animal, AnimalPayload, LivestockAssignmentPayload, LivestockExpensePayload, LivestockTask,
        LivestockTaskPayload, LivestockUnit, LivestockUnitPayload, MedicalRecordPayload,
        ReproductiveRecordPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FieldScope {
    pub field: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UnitScope {
    pub unit: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AnimalScope {
    pub animal: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TaskScope {
    pub task: Option<Uuid>,
}

// ---
// Lotes
// ---

#[utoipa::path(
    get,
    path = "/api/livestock/units",
    tag = "Livestock",
    params(FieldScope),
    responses((status = 200, body = [LivestockUnit])),
    security(("api_jwt" = []))
)]
pub async fn list_units(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FieldScope>,
) -> Result<impl IntoResponse, AppError> {
    let units = app_state
        .livestock_repo
        .list_units(user.id, scope.field)
        .await?;
    Ok(Json(units))
}

#[utoipa::path(
    get,
    path = "/api/livestock/units/{id}",
    tag = "Livestock",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = LivestockUnit), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_unit(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let unit = app_state
        .livestock_repo
        .get_unit(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Livestock unit"))?;
    Ok(Json(unit))
}

#[utoipa::path(
    post,
    path = "/api/livestock/units",
    tag = "Livestock",
    request_body = LivestockUnitPayload,
    responses((status = 201, body = LivestockUnit), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_unit(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<LivestockUnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let unit = app_state
        .livestock_repo
        .create_unit(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(unit)))
}

#[utoipa::path(
    put,
    path = "/api/livestock/units/{id}",
    tag = "Livestock",
    params(("id" = Uuid, Path)),
    request_body = LivestockUnitPayload,
    responses((status = 200, body = LivestockUnit), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_unit(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<LivestockUnitPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let unit = app_state
        .livestock_repo
        .update_unit(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Livestock unit"))?;
    Ok(Json(unit))
}

#[utoipa::path(
    delete,
    path = "/api/livestock/units/{id}",
    tag = "Livestock",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_unit(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.livestock_repo.delete_unit(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Livestock unit"))
    }
}

// ---
// Animais
// ---

#[utoipa::path(
    get,
    path = "/api/livestock/animals",
    tag = "Livestock",
    params(UnitScope),
    responses((status = 200, body = [Animal])),
    security(("api_jwt" = []))
)]
pub async fn list_animals(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<UnitScope>,
) -> Result<impl IntoResponse, AppError> {
    let animals = app_state
        .livestock_repo
        .list_animals(user.id, scope.unit)
        .await?;
    Ok(Json(animals))
}

#[utoipa::path(
    get,
    path = "/api/livestock/animals/{id}",
    tag = "Livestock",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Animal), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_animal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let animal = app_state
        .livestock_repo
        .get_animal(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Animal"))?;
    Ok(Json(animal))
}

#[utoipa::path(
    post,
    path = "/api/livestock/animals",
    tag = "Livestock",
    request_body = AnimalPayload,
    responses((status = 201, body = Animal), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_animal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<AnimalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let animal = app_state
        .livestock_repo
        .create_animal(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(animal)))
}

#[utoipa::path(
    put,
    path = "/api/livestock/animals/{id}",
    tag = "Livestock",
    params(("id" = Uuid, Path)),
    request_body = AnimalPayload,
    responses((status = 200, body = Animal), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_animal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnimalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let animal = app_state
        .livestock_repo
        .update_animal(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Animal"))?;
    Ok(Json(animal))
}

#[utoipa::path(
    delete,
    path = "/api/livestock/animals/{id}",
    tag = "Livestock",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_animal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.livestock_repo.delete_animal(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Animal"))
    }
}

// ---
// Registros reprodutivos
// ---

#[utoipa::path(
    get,
    path = "/api/livestock/reproductive-records",
    tag = "Livestock",
    params(AnimalScope),
    responses((status = 200, description = "Eventos reprodutivos")),
    security(("api_jwt" = []))
)]
pub async fn list_reproductive_records(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<AnimalScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .livestock_repo
        .list_reproductive_records(user.id, scope.animal)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/livestock/reproductive-records",
    tag = "Livestock",
    request_body = ReproductiveRecordPayload,
    responses((status = 201, description = "Evento registrado"), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_reproductive_record(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ReproductiveRecordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .livestock_repo
        .create_reproductive_record(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

// ---
// Tarefas
// ---

#[utoipa::path(
    get,
    path = "/api/livestock/tasks",
    tag = "Livestock",
    params(UnitScope),
    responses((status = 200, body = [LivestockTask])),
    security(("api_jwt" = []))
)]
pub async fn list_tasks(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<UnitScope>,
) -> Result<impl IntoResponse, AppError> {
    let tasks = app_state
        .livestock_repo
        .list_tasks(user.id, scope.unit)
        .await?;
    Ok(Json(tasks))
}

#[utoipa::path(
    post,
    path = "/api/livestock/tasks",
    tag = "Livestock",
    request_body = LivestockTaskPayload,
    responses((status = 201, body = LivestockTask), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<LivestockTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let task = app_state
        .livestock_repo
        .create_task(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    put,
    path = "/api/livestock/tasks/{id}",
    tag = "Livestock",
    params(("id" = Uuid, Path)),
    request_body = LivestockTaskPayload,
    responses((status = 200, body = LivestockTask), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<LivestockTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let task = app_state
        .livestock_repo
        .update_task(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Livestock task"))?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/api/livestock/tasks/{id}",
    tag = "Livestock",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_task(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.livestock_repo.delete_task(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Livestock task"))
    }
}

// ---
// Atribuições
// ---

#[utoipa::path(
    get,
    path = "/api/livestock/assignments",
    tag = "Livestock",
    params(TaskScope),
    responses((status = 200, description = "Atribuições das tarefas de rebanho")),
    security(("api_jwt" = []))
)]
pub async fn list_assignments(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<TaskScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .livestock_repo
        .list_assignments(user.id, scope.task)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/livestock/assignments",
    tag = "Livestock",
    request_body = LivestockAssignmentPayload,
    responses((status = 201, description = "Funcionário atribuído"), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_assignment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<LivestockAssignmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .livestock_repo
        .create_assignment(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

// ---
// Despesas
// ---

#[utoipa::path(
    get,
    path = "/api/livestock/expenses",
    tag = "Livestock",
    params(UnitScope),
    responses((status = 200, description = "Despesas dos lotes")),
    security(("api_jwt" = []))
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<UnitScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .livestock_repo
        .list_expenses(user.id, scope.unit)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/livestock/expenses",
    tag = "Livestock",
    request_body = LivestockExpensePayload,
    responses((status = 201, description = "Despesa registrada"), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<LivestockExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .livestock_repo
        .create_expense(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

// ---
// Registros médicos
// ---

#[utoipa::path(
    get,
    path = "/api/livestock/medical-records",
    tag = "Livestock",
    params(AnimalScope),
    responses((status = 200, description = "Registros médicos dos animais")),
    security(("api_jwt" = []))
)]
pub async fn list_medical_records(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<AnimalScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .livestock_repo
        .list_medical_records(user.id, scope.animal)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/livestock/medical-records",
    tag = "Livestock",
    request_body = MedicalRecordPayload,
    responses((status = 201, description = "Registro criado"), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_medical_record(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<MedicalRecordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .livestock_repo
        .create_medical_record(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}
