// src/handlers/analytics.rs

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
    models::analytics::{
        AnalyticsAggregate, FarmFinance, FarmFinancePayload, FinanceSummary, Report, ReportPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FinanceScope {
    pub farm: Option<Uuid>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SummaryScope {
    pub farm: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AggregateScope {
    pub farm: Option<Uuid>,
    pub metric_type: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FarmScope {
    pub farm: Option<Uuid>,
}

// ---
// Finanças
// ---

#[utoipa::path(
    get,
    path = "/api/analytics/finances",
    tag = "Analytics",
    params(FinanceScope),
    responses((status = 200, body = [FarmFinance])),
    security(("api_jwt" = []))
)]
pub async fn list_finances(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FinanceScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .analytics_repo
        .list_finances(user.id, scope.farm, scope.entry_type.as_deref())
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/analytics/finances",
    tag = "Analytics",
    request_body = FarmFinancePayload,
    responses((status = 201, body = FarmFinance), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_finance(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<FarmFinancePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .analytics_repo
        .create_finance(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    delete,
    path = "/api/analytics/finances/{id}",
    tag = "Analytics",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_finance(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state
        .analytics_repo
        .delete_finance(id, user.id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Finance entry"))
    }
}

// Receita, despesa e saldo da fazenda, com quebra por categoria.
#[utoipa::path(
    get,
    path = "/api/analytics/finances/summary",
    tag = "Analytics",
    params(SummaryScope),
    responses((status = 200, body = FinanceSummary), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn finance_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<SummaryScope>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .analytics_repo
        .finance_summary(scope.farm, user.id)
        .await?;
    Ok(Json(summary))
}

// ---
// Agregados
// ---

#[utoipa::path(
    get,
    path = "/api/analytics/aggregates",
    tag = "Analytics",
    params(AggregateScope),
    responses((status = 200, body = [AnalyticsAggregate])),
    security(("api_jwt" = []))
)]
pub async fn list_aggregates(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<AggregateScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .analytics_repo
        .list_aggregates(user.id, scope.farm, scope.metric_type.as_deref())
        .await?;
    Ok(Json(rows))
}

// ---
// Relatórios
// ---

#[utoipa::path(
    get,
    path = "/api/analytics/reports",
    tag = "Analytics",
    params(FarmScope),
    responses((status = 200, body = [Report])),
    security(("api_jwt" = []))
)]
pub async fn list_reports(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FarmScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .analytics_repo
        .list_reports(user.id, scope.farm)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/analytics/reports",
    tag = "Analytics",
    request_body = ReportPayload,
    responses((status = 201, body = Report), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_report(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ReportPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .analytics_repo
        .create_report(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}
