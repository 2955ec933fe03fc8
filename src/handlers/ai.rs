// src/handlers/ai.rs

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
    models::ai::{
        AiLog, Alert, AlertPayload, ChatPayload, ChatResponse, Prediction, PredictionPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct LogScope {
    pub context_type: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PredictionScope {
    pub farm: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AlertScope {
    pub farm: Option<Uuid>,
    pub resolved: Option<bool>,
}

// Conversa com o assistente; a resposta vem do provedor upstream e o
// histórico fica registrado nos logs do usuário.
#[utoipa::path(
    post,
    path = "/api/ai/chat",
    tag = "AI",
    request_body = ChatPayload,
    responses((status = 200, body = ChatResponse), (status = 502)),
    security(("api_jwt" = []))
)]
pub async fn chat(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ChatPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let response = app_state.assistant_service.chat(user.id, &payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/ai/logs",
    tag = "AI",
    params(LogScope),
    responses((status = 200, body = [AiLog])),
    security(("api_jwt" = []))
)]
pub async fn list_logs(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<LogScope>,
) -> Result<impl IntoResponse, AppError> {
    let logs = app_state
        .ai_repo
        .list_logs(user.id, scope.context_type.as_deref())
        .await?;
    Ok(Json(logs))
}

// ---
// Previsões
// ---

#[utoipa::path(
    get,
    path = "/api/ai/predictions",
    tag = "AI",
    params(PredictionScope),
    responses((status = 200, body = [Prediction])),
    security(("api_jwt" = []))
)]
pub async fn list_predictions(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<PredictionScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .ai_repo
        .list_predictions(user.id, scope.farm)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/ai/predictions",
    tag = "AI",
    request_body = PredictionPayload,
    responses((status = 201, body = Prediction), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_prediction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<PredictionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .ai_repo
        .create_prediction(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

// ---
// Alertas
// ---

#[utoipa::path(
    get,
    path = "/api/ai/alerts",
    tag = "AI",
    params(AlertScope),
    responses((status = 200, body = [Alert])),
    security(("api_jwt" = []))
)]
pub async fn list_alerts(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<AlertScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .ai_repo
        .list_alerts(user.id, scope.farm, scope.resolved)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/ai/alerts",
    tag = "AI",
    request_body = AlertPayload,
    responses((status = 201, body = Alert), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_alert(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<AlertPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state.ai_repo.create_alert(user.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    post,
    path = "/api/ai/alerts/{id}/resolve",
    tag = "AI",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Alert), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn resolve_alert(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let alert = app_state
        .ai_repo
        .resolve_alert(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Alert"))?;
    Ok(Json(alert))
}
