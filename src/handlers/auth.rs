// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::accounts::{
        AccessResponse, LoginUserPayload, RefreshPayload, RegisterUserPayload, TokenPairResponse,
    },
};

// Handler de registro: cria o usuário e já devolve o par de tokens.
#[utoipa::path(
    post,
    path = "/api/accounts/register",
    tag = "Accounts",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado"),
        (status = 409, description = "Email ou username já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (user, tokens) = app_state.auth_service.register_user(&payload).await?;

    tracing::info!(user_id = %user.id, "Novo usuário registrado");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "user": user, "tokens": tokens })),
    ))
}

// Handler de login (emissão do par access/refresh)
#[utoipa::path(
    post,
    path = "/api/accounts/token",
    tag = "Accounts",
    request_body = LoginUserPayload,
    responses(
        (status = 200, body = TokenPairResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn token(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<TokenPairResponse>, AppError> {
    payload.validate()?;

    let tokens = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;
    Ok(Json(tokens))
}

#[utoipa::path(
    post,
    path = "/api/accounts/token/refresh",
    tag = "Accounts",
    request_body = RefreshPayload,
    responses(
        (status = 200, body = AccessResponse),
        (status = 401, description = "Refresh token inválido")
    )
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<AccessResponse>, AppError> {
    payload.validate()?;

    let access = app_state.auth_service.refresh_access(&payload.refresh)?;
    Ok(Json(AccessResponse { access }))
}
