// src/models/crops.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: Uuid,
    pub field_id: Uuid,
    pub name: String,
    pub variety: String,
    pub seed_source: String,
    pub planting_month_year: String,
    pub expected_harvest_month_year: String,
    pub status: String,
    pub yield_estimate: Option<Decimal>,
    pub yield_unit: Option<String>,
    pub value_estimate: Option<Decimal>,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropTask {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: String,
    pub equipment_used: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropEmployeeAssignment {
    pub id: Uuid,
    pub crop_task_id: Uuid,
    pub employee_id: Uuid,
    pub role: String,
    pub assigned_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
    pub ai_recommended_duration: Option<i32>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropExpense {
    pub id: Uuid,
    pub crop_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub category: String,
    pub additional_notes: Option<String>,
    pub purchased_by: Option<Uuid>,
    pub incurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropPayload {
    pub field_id: Uuid,

    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[validate(length(min = 1, message = "Variety is required."))]
    pub variety: String,
    #[validate(length(min = 1, message = "Seed source is required."))]
    pub seed_source: String,
    #[validate(length(min = 1, message = "Planting month/year is required."))]
    pub planting_month_year: String,
    #[validate(length(min = 1, message = "Expected harvest month/year is required."))]
    pub expected_harvest_month_year: String,
    #[validate(length(min = 1, message = "Status is required."))]
    pub status: String,

    pub yield_estimate: Option<Decimal>,
    pub yield_unit: Option<String>,
    pub value_estimate: Option<Decimal>,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropTaskPayload {
    pub crop_id: Uuid,

    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    #[validate(length(min = 1, message = "Status is required."))]
    pub status: String,
    pub equipment_used: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropAssignmentPayload {
    pub crop_task_id: Uuid,
    pub employee_id: Uuid,

    #[validate(length(min = 1, message = "Role is required."))]
    pub role: String,
    pub removed_at: Option<DateTime<Utc>>,
    pub ai_recommended_duration: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CropExpensePayload {
    pub crop_id: Uuid,

    #[validate(custom(function = "crate::models::validate_positive"))]
    pub amount: Decimal,
    pub currency: Option<String>,
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,
    pub additional_notes: Option<String>,
    pub purchased_by: Option<Uuid>,
    pub incurred_on: NaiveDate,
}
