// src/models/produce.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "produce_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProduceSource {
    Crop,
    Animal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "produce_unit", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProduceUnit {
    Kg,
    Liters,
    Crates,
    Bags,
    Tons,
    Pieces,
}

// Coleta de produção registrada por fazenda (aninhada na rota da fazenda).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProduceCollection {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub source: ProduceSource,
    pub product_name: String,
    pub quantity: Decimal,
    pub unit: ProduceUnit,
    pub collection_date: NaiveDate,
    pub quality_grade: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProduceCollectionPayload {
    pub source: ProduceSource,
    #[validate(length(min = 1, message = "Product name is required."))]
    pub product_name: String,
    #[validate(custom(function = "crate::models::validate_positive"))]
    pub quantity: Decimal,
    pub unit: Option<ProduceUnit>,
    pub collection_date: NaiveDate,
    pub quality_grade: Option<String>,
    pub notes: Option<String>,
}

// Totais da fazenda (o summary da rota aninhada).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProduceSummary {
    pub total_collections: i64,
    pub total_quantity: Decimal,
    pub last_collection: Option<NaiveDate>,
}
