// src/handlers/accounts.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::accounts::{CreateWalletPayload, OnboardingPayload, UpdateMePayload, User},
};

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/accounts/me",
    tag = "Accounts",
    responses((status = 200, body = User)),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

#[utoipa::path(
    patch,
    path = "/api/accounts/me",
    tag = "Accounts",
    request_body = UpdateMePayload,
    responses((status = 200, body = User)),
    security(("api_jwt" = []))
)]
pub async fn update_me(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<UpdateMePayload>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;
    let updated = app_state.accounts_repo.update_me(user.id, &payload).await?;
    Ok(Json(updated))
}

// ---
// Carteira digital
// ---

#[utoipa::path(
    get,
    path = "/api/accounts/wallet",
    tag = "Accounts",
    responses(
        (status = 200, description = "Carteira do usuário"),
        (status = 404, description = "Usuário ainda não tem carteira")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_wallet(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let wallet = app_state
        .accounts_repo
        .get_wallet(user.id)
        .await?
        .ok_or(AppError::NotFound("Wallet"))?;
    Ok(Json(wallet))
}

#[utoipa::path(
    post,
    path = "/api/accounts/wallet",
    tag = "Accounts",
    request_body = CreateWalletPayload,
    responses(
        (status = 201, description = "Carteira criada"),
        (status = 409, description = "Usuário já tem carteira")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_wallet(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateWalletPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if app_state.accounts_repo.get_wallet(user.id).await?.is_some() {
        return Err(AppError::Conflict("You already have a wallet.".into()));
    }

    let wallet = app_state
        .accounts_repo
        .create_wallet(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(wallet)))
}

// ---
// Onboarding
// ---

#[utoipa::path(
    get,
    path = "/api/accounts/onboarding",
    tag = "Accounts",
    responses((status = 200, description = "Passos registrados do onboarding")),
    security(("api_jwt" = []))
)]
pub async fn list_onboarding(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let steps = app_state.accounts_repo.list_onboarding(user.id).await?;
    Ok(Json(steps))
}

#[utoipa::path(
    post,
    path = "/api/accounts/onboarding",
    tag = "Accounts",
    request_body = OnboardingPayload,
    responses((status = 201, description = "Passo registrado")),
    security(("api_jwt" = []))
)]
pub async fn record_onboarding(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<OnboardingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let step = app_state
        .accounts_repo
        .record_onboarding(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(step)))
}
