// src/models/ai.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Histórico de interações com o assistente (pergunta + resposta).
// context_type/context_id amarram a conversa a uma tela ("crop", "farm"...).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub context_type: String,
    pub context_id: String,
    pub prompt: String,
    pub response: String,
    pub model: String,
    pub tokens_used: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: Uuid,
    pub farm_id: Option<Uuid>,
    pub crop_id: Option<Uuid>,
    pub livestock_unit_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    pub prediction_type: String,
    #[schema(value_type = Object)]
    pub inputs: serde_json::Value,
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
    pub confidence: Decimal,
    pub explanation: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub alert_type: String,
    pub title: String,
    pub message: String,
    pub related_table: String,
    pub related_id: String,
    pub due_date: Option<DateTime<Utc>>,
    pub sent_to_email: bool,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

// Uma mensagem do histórico que o cliente reenvia a cada turno.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    #[validate(length(min = 1, message = "Role is required."))]
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    #[validate(length(min = 1, message = "Prompt is required."))]
    pub prompt: String,
    #[serde(default)]
    pub context_type: Option<String>,
    #[serde(default)]
    pub context_id: Option<String>,
    // Contexto extra montado pelo frontend (dados da tela atual etc.)
    pub context: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub log_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPayload {
    pub farm_id: Option<Uuid>,
    pub crop_id: Option<Uuid>,
    pub livestock_unit_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Prediction type is required."))]
    pub prediction_type: String,
    #[schema(value_type = Object)]
    pub inputs: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub result: Option<serde_json::Value>,
    pub confidence: Decimal,
    #[validate(length(min = 1, message = "Explanation is required."))]
    pub explanation: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertPayload {
    pub farm_id: Uuid,
    #[validate(length(min = 1, message = "Alert type is required."))]
    pub alert_type: String,
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Message is required."))]
    pub message: String,
    #[validate(length(min = 1, message = "Related table is required."))]
    pub related_table: String,
    #[serde(default)]
    pub related_id: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}
