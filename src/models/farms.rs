// src/models/farms.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "farm_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FarmType {
    Crops,
    Livestock,
    Mixed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "size_unit", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    Acres,
    Hectares,
    SquareMeters,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub farm_type: FarmType,
    pub country: String,
    pub state: Option<String>,
    pub city: String,
    pub address: Option<String>,
    pub total_size: Decimal,
    pub size_unit: SizeUnit,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub name: String,
    pub purpose: Option<String>,
    pub total_size: Option<Decimal>,
    pub size_unit: SizeUnit,
    pub soil_type: Option<String>,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalData {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub date: NaiveDate,
    pub temperature: Option<Decimal>,
    pub rainfall: Option<Decimal>,
    pub humidity: Option<Decimal>,
    pub soil_moisture: Option<Decimal>,
    pub pest_alerts: Option<String>,
    #[schema(value_type = Object)]
    pub additional_info: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

// O frontend manda o tipo de fazenda em formatos variados ("crop", "farming",
// "animals", "both"...). Normalizamos aqui, como o serializer original fazia.
pub fn normalize_farm_type(raw: &str) -> FarmType {
    match raw.trim().to_lowercase().as_str() {
        "livestock" | "l" | "animals" => FarmType::Livestock,
        "mixed" | "both" | "m" => FarmType::Mixed,
        // Fallback: tudo o resto conta como lavoura
        _ => FarmType::Crops,
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FarmPayload {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,

    // Texto livre, normalizado por normalize_farm_type
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required."))]
    pub farm_type: String,

    #[validate(length(min = 1, message = "Country is required."))]
    pub country: String,
    pub state: Option<String>,
    #[validate(length(min = 1, message = "City is required."))]
    pub city: String,
    pub address: Option<String>,

    pub total_size: Decimal,
    pub size_unit: Option<SizeUnit>,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldPayload {
    pub farm_id: Uuid,

    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    pub purpose: Option<String>,
    pub total_size: Option<Decimal>,
    pub size_unit: Option<SizeUnit>,
    pub soil_type: Option<String>,
    pub additional_notes: Option<String>,
}

// Faixas físicas plausíveis para as leituras ambientais.
fn range_error(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("range");
    err.message = Some(message.into());
    err
}

pub fn validate_temperature(val: &Decimal) -> Result<(), ValidationError> {
    if *val < Decimal::from(-50) || *val > Decimal::from(60) {
        return Err(range_error("Temperature must be between -50 and 60."));
    }
    Ok(())
}

pub fn validate_rainfall(val: &Decimal) -> Result<(), ValidationError> {
    if *val < Decimal::ZERO || *val > Decimal::from(1000) {
        return Err(range_error("Rainfall must be between 0 and 1000."));
    }
    Ok(())
}

pub fn validate_percentage(val: &Decimal) -> Result<(), ValidationError> {
    if *val < Decimal::ZERO || *val > Decimal::from(100) {
        return Err(range_error("Value must be between 0 and 100."));
    }
    Ok(())
}

pub fn validate_not_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Utc::now().date_naive() {
        let mut err = ValidationError::new("date");
        err.message = Some("Date cannot be in the future.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalDataPayload {
    pub farm_id: Uuid,
    #[validate(custom(function = "validate_not_future"))]
    pub date: NaiveDate,
    #[validate(custom(function = "validate_temperature"))]
    pub temperature: Option<Decimal>,
    #[validate(custom(function = "validate_rainfall"))]
    pub rainfall: Option<Decimal>,
    #[validate(custom(function = "validate_percentage"))]
    pub humidity: Option<Decimal>,
    #[validate(custom(function = "validate_percentage"))]
    pub soil_moisture: Option<Decimal>,
    pub pest_alerts: Option<String>,
    #[schema(value_type = Object)]
    pub additional_info: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn farm_type_normalization_table() {
        assert_eq!(normalize_farm_type("livestock"), FarmType::Livestock);
        assert_eq!(normalize_farm_type("Animals"), FarmType::Livestock);
        assert_eq!(normalize_farm_type("l"), FarmType::Livestock);
        assert_eq!(normalize_farm_type("both"), FarmType::Mixed);
        assert_eq!(normalize_farm_type(" MIXED "), FarmType::Mixed);
        assert_eq!(normalize_farm_type("m"), FarmType::Mixed);
        assert_eq!(normalize_farm_type("crop"), FarmType::Crops);
        assert_eq!(normalize_farm_type("farming"), FarmType::Crops);
        // Qualquer coisa desconhecida cai em lavoura
        assert_eq!(normalize_farm_type("qualquer"), FarmType::Crops);
    }

    fn payload(temperature: Decimal, humidity: Decimal, date: NaiveDate) -> EnvironmentalDataPayload {
        EnvironmentalDataPayload {
            farm_id: Uuid::new_v4(),
            date,
            temperature: Some(temperature),
            rainfall: Some(dec!(10)),
            humidity: Some(humidity),
            soil_moisture: None,
            pest_alerts: None,
            additional_info: None,
        }
    }

    #[test]
    fn environmental_readings_within_bounds_pass() {
        let today = Utc::now().date_naive();
        assert!(payload(dec!(25.5), dec!(80), today).validate().is_ok());
        assert!(payload(dec!(-50), dec!(0), today).validate().is_ok());
        assert!(payload(dec!(60), dec!(100), today).validate().is_ok());
    }

    #[test]
    fn out_of_range_readings_are_rejected() {
        let today = Utc::now().date_naive();
        let errors = payload(dec!(61), dec!(80), today).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("temperature"));

        let errors = payload(dec!(20), dec!(101), today).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("humidity"));
    }

    #[test]
    fn future_dates_are_rejected() {
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        let errors = payload(dec!(20), dec!(50), tomorrow).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("date"));
    }
}
