// src/models/analytics.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Lançamento financeiro da fazenda ("income" ou "expense").
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FarmFinance {
    pub id: Uuid,
    pub farm_id: Uuid,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub category: String,
    pub related_id: Option<Uuid>,
    pub amount: Decimal,
    pub currency: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsAggregate {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub period: String,
    pub metric_type: String,
    pub metric_value: Decimal,
    #[schema(value_type = Object)]
    pub metadata: serde_json::Value,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub report_type: String,
    #[schema(value_type = Object)]
    pub parameters: serde_json::Value,
    #[schema(value_type = Object)]
    pub generated_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FarmFinancePayload {
    pub farm_id: Uuid,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Entry type is required."))]
    pub entry_type: String,
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,
    pub related_id: Option<Uuid>,
    #[validate(custom(function = "crate::models::validate_positive"))]
    pub amount: Decimal,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub farm_id: Uuid,
    #[validate(length(min = 1, message = "Report type is required."))]
    pub report_type: String,
    #[schema(value_type = Object)]
    pub parameters: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub generated_data: Option<serde_json::Value>,
}

// Resumo financeiro agregado por categoria, devolvido pelo summary.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub category: String,
    pub total: Decimal,
}
