// src/models/livestock.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivestockUnit {
    pub id: Uuid,
    pub field_id: Uuid,
    pub unit_name: String,
    pub animal_type: String,
    pub quantity: i32,
    pub breed: String,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// pai/mãe são auto-referências (podem ser nulas, SET NULL no delete)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: Uuid,
    pub livestock_unit_id: Uuid,
    pub tag_id: String,
    pub name: Option<String>,
    pub sex: String,
    pub age_group: String,
    pub dob: Option<NaiveDate>,
    pub breed: String,
    pub status: String,
    pub health_score: Option<Decimal>,
    pub father_id: Option<Uuid>,
    pub mother_id: Option<Uuid>,
    pub value_estimate: Option<Decimal>,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalReproductiveRecord {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub sex: String,
    pub event_date: NaiveDate,
    pub event_type: String,
    pub details: Option<String>,
    pub offspring_ids: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivestockTask {
    pub id: Uuid,
    pub livestock_unit_id: Uuid,
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
pub struct LivestockEmployeeAssignment {
    pub id: Uuid,
    pub livestock_task_id: Uuid,
    pub employee_id: Uuid,
    pub role: String,
    pub assigned_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
    pub ai_recommended_duration: Option<i32>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivestockExpense {
    pub id: Uuid,
    pub livestock_unit_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub category: String,
    pub additional_notes: Option<String>,
    pub purchased_by: Option<Uuid>,
    pub incurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalMedicalRecord {
    pub id: Uuid,
    pub animal_id: Uuid,
    pub livestock_unit_id: Uuid,
    pub date: NaiveDate,
    pub record_type: String,
    pub drug_name: Option<String>,
    pub quantity_used: Option<Decimal>,
    pub next_vaccination_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivestockUnitPayload {
    pub field_id: Uuid,

    #[validate(length(min = 1, message = "Unit name is required."))]
    pub unit_name: String,
    #[validate(length(min = 1, message = "Animal type is required."))]
    pub animal_type: String,
    #[validate(range(min = 0, message = "Quantity cannot be negative."))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "Breed is required."))]
    pub breed: String,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPayload {
    pub livestock_unit_id: Uuid,

    #[validate(length(min = 1, message = "Tag ID is required."))]
    pub tag_id: String,
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Sex is required."))]
    pub sex: String,
    #[validate(length(min = 1, message = "Age group is required."))]
    pub age_group: String,
    pub dob: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Breed is required."))]
    pub breed: String,
    #[validate(length(min = 1, message = "Status is required."))]
    pub status: String,
    pub health_score: Option<Decimal>,
    pub father_id: Option<Uuid>,
    pub mother_id: Option<Uuid>,
    pub value_estimate: Option<Decimal>,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReproductiveRecordPayload {
    pub animal_id: Uuid,
    #[validate(length(min = 1, message = "Sex is required."))]
    pub sex: String,
    pub event_date: NaiveDate,
    #[validate(length(min = 1, message = "Event type is required."))]
    pub event_type: String,
    pub details: Option<String>,
    pub offspring_ids: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivestockTaskPayload {
    pub livestock_unit_id: Uuid,

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
pub struct LivestockAssignmentPayload {
    pub livestock_task_id: Uuid,
    pub employee_id: Uuid,

    #[validate(length(min = 1, message = "Role is required."))]
    pub role: String,
    pub removed_at: Option<DateTime<Utc>>,
    pub ai_recommended_duration: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivestockExpensePayload {
    pub livestock_unit_id: Uuid,

    #[validate(custom(function = "crate::models::validate_positive"))]
    pub amount: Decimal,
    pub currency: Option<String>,
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,
    pub additional_notes: Option<String>,
    pub purchased_by: Option<Uuid>,
    pub incurred_on: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordPayload {
    pub animal_id: Uuid,
    pub livestock_unit_id: Uuid,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Record type is required."))]
    pub record_type: String,
    pub drug_name: Option<String>,
    pub quantity_used: Option<Decimal>,
    pub next_vaccination_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub additional_info: Option<String>,
}
