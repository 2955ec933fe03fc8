// src/models/accounts.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// O papel do usuário na plataforma (o mesmo ROLE_CHOICES do cadastro).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Farmer,
    Retailer,
    Specialized,
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub phone: Option<String>,
    pub country_code: Option<String>,
    pub role: Option<UserRole>,
    pub is_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DigitalWallet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub balance: Decimal,
    pub currency: String,
    #[schema(value_type = Object)]
    pub bank_cards: serde_json::Value,
    #[schema(value_type = Object)]
    pub coupons: serde_json::Value,
    pub last_transaction: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub step: String,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
}

// ---
// Payloads de autenticação
// ---

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(
        length(min = 1, message = "Username is required."),
        custom(function = "validate_no_spaces")
    )]
    pub username: String,

    #[validate(email(message = "The given email is invalid."))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,

    pub phone: Option<String>,
    pub country_code: Option<String>,
    pub role: Option<UserRole>,
}

// Regra herdada do cadastro original: username não pode conter espaços.
fn validate_no_spaces(value: &str) -> Result<(), validator::ValidationError> {
    if value.chars().any(char::is_whitespace) {
        let mut err = validator::ValidationError::new("no_spaces");
        err.message = Some("Username cannot contain spaces.".into());
        return Err(err);
    }
    Ok(())
}

// Dados para obter o par de tokens (login)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(email(message = "The given email is invalid."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    #[validate(length(min = 1, message = "Refresh token is required."))]
    pub refresh: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMePayload {
    pub phone: Option<String>,
    pub country_code: Option<String>,
    pub role: Option<UserRole>,
}

// Resposta de autenticação: par de tokens (mesmo contrato do simplejwt original)
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccessResponse {
    pub access: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,          // Subject (ID do usuário)
    pub exp: usize,         // Expiration time
    pub iat: usize,         // Issued At
    pub token_type: String, // "access" ou "refresh"
}

// ---
// Payloads de carteira / onboarding
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletPayload {
    #[serde(default)]
    pub balance: Option<Decimal>,
    pub currency: Option<String>,
    #[schema(value_type = Object)]
    pub bank_cards: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub coupons: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingPayload {
    #[validate(length(min = 1, message = "Step is required."))]
    pub step: String,
    pub status: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}
