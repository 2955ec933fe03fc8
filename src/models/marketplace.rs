// src/models/marketplace.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub farm_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_email: String,
    pub countries_of_operation: String,
    pub total_value: Decimal,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: Decimal,
    pub unit: String,
    pub is_dropshippable: bool,
    pub total_value: Decimal,
    pub expiration_date: Option<NaiveDate>,
    pub source_produce_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Produto do catálogo, com a média de avaliações agregada no SELECT
// (o queryset original fazia annotate(Avg, Count)).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub id: Uuid,
    pub store_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: Decimal,
    pub unit: String,
    pub is_dropshippable: bool,
    pub total_value: Decimal,
    pub expiration_date: Option<NaiveDate>,
    pub source_produce_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub average_rating: Option<Decimal>,
    pub reviews_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub store_id: Uuid,
    pub total_amount: Decimal,
    pub status: String,
    pub shipping_address: Option<String>,
    pub transport_mode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub price_per_unit: Decimal,
    pub subtotal: Decimal,
}

// Pedido + itens, como o detail do pedido devolve
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub method: String,
    pub provider: String,
    pub provider_reference: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    pub id: Uuid,
    pub order_id: Uuid,
    pub provider: String,
    pub tracking_number: Option<String>,
    pub status: String,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreReview {
    pub id: Uuid,
    pub store_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductReview {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorePayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub farm_id: Option<Uuid>,
    pub description: Option<String>,
    pub owner_name: Option<String>,
    pub owner_phone: Option<String>,
    pub owner_email: Option<String>,
    pub countries_of_operation: Option<String>,
    pub total_value: Option<Decimal>,
    // O frontend manda "verified"; o modelo chama is_verified.
    #[serde(alias = "verified")]
    pub is_verified: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub store_id: Uuid,

    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Category is required."))]
    pub category: String,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub price: Decimal,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub stock_quantity: Decimal,
    #[validate(length(min = 1, message = "Unit is required."))]
    pub unit: String,
    #[serde(default)]
    pub is_dropshippable: bool,
    pub total_value: Option<Decimal>,
    pub expiration_date: Option<NaiveDate>,
    pub source_produce_id: Option<Uuid>,
    pub image_url: Option<String>,
}

// Filtros do catálogo (?q=, ?category=, ?min_price=...)
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "snake_case")]
pub struct ProductFilter {
    pub store: Option<Uuid>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub ordering: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    pub product_id: Uuid,
    #[validate(custom(function = "crate::models::validate_positive"))]
    pub quantity: Decimal,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub price_per_unit: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub store_id: Uuid,
    #[validate(length(min = 1, message = "Status is required."))]
    pub status: String,
    pub shipping_address: Option<String>,
    pub transport_mode: Option<String>,

    #[validate(nested)]
    #[validate(length(min = 1, message = "At least one item is required."))]
    pub items: Vec<OrderItemPayload>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderPayload {
    #[validate(length(min = 1, message = "Status is required."))]
    pub status: String,
    pub shipping_address: Option<String>,
    pub transport_mode: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub order_id: Uuid,
    #[validate(custom(function = "crate::models::validate_positive"))]
    pub amount: Decimal,
    #[validate(length(min = 1, message = "Method is required."))]
    pub method: String,
    #[validate(length(min = 1, message = "Provider is required."))]
    pub provider: String,
    pub provider_reference: Option<String>,
    #[validate(length(min = 1, message = "Status is required."))]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingPayload {
    pub order_id: Uuid,
    #[validate(length(min = 1, message = "Provider is required."))]
    pub provider: String,
    pub tracking_number: Option<String>,
    #[validate(length(min = 1, message = "Status is required."))]
    pub status: String,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    // store_id OU product_id, conforme a rota
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5."))]
    pub rating: i32,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i32) -> ReviewPayload {
        ReviewPayload {
            rating,
            comment: None,
        }
    }

    #[test]
    fn rating_must_stay_between_one_and_five() {
        for rating in [0, -1, 6, 100] {
            let errors = review(rating).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("rating"));
        }
        assert!(review(1).validate().is_ok());
        assert!(review(5).validate().is_ok());
    }
}
