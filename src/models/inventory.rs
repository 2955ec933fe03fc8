// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Estoque de insumos da fazenda (ração, sementes, fertilizante...).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub item_name: String,
    pub category: String,
    pub quantity: Decimal,
    pub unit: String,
    pub reorder_threshold: Option<Decimal>,
    pub supplier: Option<String>,
    pub last_received_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Registro de produção (colheita/produto animal), opcionalmente ligado
// à cultura, ao animal ou ao lote de origem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub crop_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    pub livestock_unit_id: Option<Uuid>,
    pub date: NaiveDate,
    pub item_type: String,
    pub quantity: Decimal,
    pub unit: String,
    pub value_estimate: Option<Decimal>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemPayload {
    pub farm_id: Uuid,

    #[validate(length(min = 1, message = "Item name is required."))]
    pub item_name: String,
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub quantity: Decimal,
    #[validate(length(min = 1, message = "Unit is required."))]
    pub unit: String,
    pub reorder_threshold: Option<Decimal>,
    pub supplier: Option<String>,
    pub last_received_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecordPayload {
    pub farm_id: Uuid,
    pub crop_id: Option<Uuid>,
    pub animal_id: Option<Uuid>,
    pub livestock_unit_id: Option<Uuid>,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Item type is required."))]
    pub item_type: String,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub quantity: Decimal,
    #[validate(length(min = 1, message = "Unit is required."))]
    pub unit: String,
    pub value_estimate: Option<Decimal>,
    pub notes: Option<String>,
}
