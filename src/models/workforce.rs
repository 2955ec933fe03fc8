// src/models/workforce.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// Enums (os choices do domínio original)
// ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "specialty", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    Agronomist,
    Veterinarian,
    Mechanic,
    Chemist,
    FarmManager,
    AgriculturalEngineer,
    SoilScientist,
    CropConsultant,
    PestControl,
    LivestockHandler,
    IrrigationSpecialist,
    AgriculturalEconomist,
    Horticulturist,
    AgriculturalTechnician,
    FoodSafety,
    DataAnalyst,
    FarmLaborer,
    EquipmentOperator,
    Harvester,
    PlantingSpecialist,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "availability", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    FullTime,
    PartTime,
    Contract,
    Seasonal,
    Available,
    NotAvailable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    InProgress,
    Completed,
    Cancelled,
}

// Ciclo de vida da candidatura: pending -> accepted/rejected/withdrawn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Withdrawn,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, ToSchema)]
#[sqlx(type_name = "payment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Hourly,
    Fixed,
    Daily,
}

// ---
// Modelos
// ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub country_code: String,
    pub role: String,
    pub employment_type: String,
    pub hire_date: NaiveDate,
    pub salary: Decimal,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Machinery {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub purchased_by: Option<Uuid>,
    pub purchased_on: Option<NaiveDate>,
    pub value: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: String,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub purchased_by: Option<Uuid>,
    pub purchased_on: Option<NaiveDate>,
    pub value: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// Perfil profissional da rede (um por usuário).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub profile_image_url: Option<String>,
    pub bio: String,
    pub phone: String,
    pub location: String,
    pub specialty: Specialty,
    pub years_experience: i32,
    pub hourly_rate: Decimal,
    pub availability: Availability,
    pub education: String,
    pub work_experience: String,
    #[schema(value_type = Object)]
    pub skills: serde_json::Value,
    #[schema(value_type = Object)]
    pub certifications: serde_json::Value,
    #[schema(value_type = Object)]
    pub languages: serde_json::Value,
    pub notable_projects: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
    pub total_jobs_completed: i32,
    pub average_rating: Decimal,
    pub total_reviews: i32,
    pub response_time: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalReview {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub reviewer_id: Uuid,
    pub rating: i32,
    pub title: String,
    pub comment: String,
    pub job_title: Option<String>,
    pub work_quality: Option<i32>,
    pub professionalism: Option<i32>,
    pub communication: Option<i32>,
    pub timeliness: Option<i32>,
    pub is_verified: bool,
    pub helpful_count: i32,
    pub response: Option<String>,
    pub response_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub farm_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub specialty_required: Specialty,
    pub location: String,
    pub budget: Decimal,
    pub payment_type: PaymentType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub duration: Option<String>,
    pub experience_required: i32,
    #[schema(value_type = Object)]
    pub skills_required: serde_json::Value,
    pub status: JobStatus,
    pub hired_professional_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub professional_id: Uuid,
    pub cover_letter: String,
    pub proposed_rate: Decimal,
    pub availability_start: NaiveDate,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub farm_id: Uuid,

    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required."))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Phone is required."))]
    pub phone: String,
    #[validate(length(min = 1, message = "Country code is required."))]
    pub country_code: String,
    #[validate(length(min = 1, message = "Role is required."))]
    pub role: String,
    #[validate(length(min = 1, message = "Employment type is required."))]
    pub employment_type: String,
    pub hire_date: NaiveDate,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub salary: Decimal,
    pub additional_notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineryPayload {
    pub farm_id: Uuid,

    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required."))]
    pub machine_type: String,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub purchased_by: Option<Uuid>,
    pub purchased_on: Option<NaiveDate>,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub value: Decimal,
    #[validate(length(min = 1, message = "Status is required."))]
    pub status: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalProfilePayload {
    pub profile_image_url: Option<String>,
    #[validate(length(max = 500, message = "Bio must be at most 500 characters."))]
    pub bio: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Location is required."))]
    pub location: String,
    pub specialty: Specialty,
    #[validate(range(min = 0, message = "Experience cannot be negative."))]
    pub years_experience: i32,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub hourly_rate: Decimal,
    pub availability: Option<Availability>,
    pub education: Option<String>,
    pub work_experience: Option<String>,
    #[schema(value_type = Object)]
    pub skills: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub certifications: Option<serde_json::Value>,
    #[schema(value_type = Object)]
    pub languages: Option<serde_json::Value>,
    pub notable_projects: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalReviewPayload {
    pub professional_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5."))]
    pub rating: i32,
    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Comment is required."))]
    pub comment: String,
    pub job_title: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5."))]
    pub work_quality: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5."))]
    pub professionalism: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5."))]
    pub communication: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "Score must be between 1 and 5."))]
    pub timeliness: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondReviewPayload {
    #[validate(length(min = 1, message = "Response text is required."))]
    pub response: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingPayload {
    pub farm_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Title is required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required."))]
    pub description: String,
    pub specialty_required: Specialty,
    #[validate(length(min = 1, message = "Location is required."))]
    pub location: String,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub budget: Decimal,
    pub payment_type: PaymentType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub duration: Option<String>,
    #[serde(default)]
    pub experience_required: i32,
    #[schema(value_type = Object)]
    pub skills_required: Option<serde_json::Value>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationPayload {
    pub job_id: Uuid,

    #[validate(length(min = 1, message = "Cover letter is required."))]
    pub cover_letter: String,
    #[validate(custom(function = "crate::models::validate_non_negative"))]
    pub proposed_rate: Decimal,
    pub availability_start: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HirePayload {
    pub application_id: Uuid,
}

// Filtros da listagem de profissionais
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "snake_case")]
pub struct ProfessionalFilter {
    pub specialty: Option<Specialty>,
    pub availability: Option<Availability>,
    pub min_rating: Option<Decimal>,
    pub max_rate: Option<Decimal>,
    pub min_experience: Option<i32>,
}
