// src/handlers/workforce.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::workforce::{
        Employee, EmployeePayload, Equipment, HirePayload, JobApplication, JobApplicationPayload,
        JobPosting, JobPostingPayload, JobStatus, Machinery, MachineryPayload, ProfessionalFilter,
        ProfessionalProfile, ProfessionalProfilePayload, ProfessionalReview,
        ProfessionalReviewPayload, RespondReviewPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FarmScope {
    pub farm: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct JobScope {
    pub job: Option<Uuid>,
    pub status: Option<JobStatus>,
}

// ---
// Funcionários
// ---

#[utoipa::path(
    get,
    path = "/api/workforce/employees",
    tag = "Workforce",
    params(FarmScope),
    responses((status = 200, body = [Employee])),
    security(("api_jwt" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FarmScope>,
) -> Result<impl IntoResponse, AppError> {
    let employees = app_state
        .workforce_repo
        .list_employees(user.id, scope.farm)
        .await?;
    Ok(Json(employees))
}

#[utoipa::path(
    get,
    path = "/api/workforce/employees/{id}",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Employee), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let employee = app_state
        .workforce_repo
        .get_employee(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;
    Ok(Json(employee))
}

#[utoipa::path(
    post,
    path = "/api/workforce/employees",
    tag = "Workforce",
    request_body = EmployeePayload,
    responses((status = 201, body = Employee), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let employee = app_state
        .workforce_repo
        .create_employee(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    put,
    path = "/api/workforce/employees/{id}",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    request_body = EmployeePayload,
    responses((status = 200, body = Employee), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmployeePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let employee = app_state
        .workforce_repo
        .update_employee(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Employee"))?;
    Ok(Json(employee))
}

#[utoipa::path(
    delete,
    path = "/api/workforce/employees/{id}",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state
        .workforce_repo
        .delete_employee(id, user.id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Employee"))
    }
}

// ---
// Maquinário e equipamentos
// ---

#[utoipa::path(
    get,
    path = "/api/workforce/machinery",
    tag = "Workforce",
    params(FarmScope),
    responses((status = 200, body = [Machinery])),
    security(("api_jwt" = []))
)]
pub async fn list_machinery(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FarmScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .workforce_repo
        .list_machinery(user.id, scope.farm)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/workforce/machinery",
    tag = "Workforce",
    request_body = MachineryPayload,
    responses((status = 201, body = Machinery), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_machinery(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<MachineryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .workforce_repo
        .create_machinery(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    delete,
    path = "/api/workforce/machinery/{id}",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_machinery(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state
        .workforce_repo
        .delete_machinery(id, user.id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Machinery"))
    }
}

#[utoipa::path(
    get,
    path = "/api/workforce/equipment",
    tag = "Workforce",
    params(FarmScope),
    responses((status = 200, body = [Equipment])),
    security(("api_jwt" = []))
)]
pub async fn list_equipment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<FarmScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .workforce_repo
        .list_equipment(user.id, scope.farm)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/workforce/equipment",
    tag = "Workforce",
    request_body = MachineryPayload,
    responses((status = 201, body = Equipment), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_equipment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<MachineryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let row = app_state
        .workforce_repo
        .create_equipment(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

#[utoipa::path(
    delete,
    path = "/api/workforce/equipment/{id}",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_equipment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state
        .workforce_repo
        .delete_equipment(id, user.id)
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Equipment"))
    }
}

// ---
// Rede de profissionais
// ---

#[utoipa::path(
    get,
    path = "/api/workforce/professionals",
    tag = "Workforce",
    params(ProfessionalFilter),
    responses((status = 200, body = [ProfessionalProfile])),
    security(("api_jwt" = []))
)]
pub async fn list_professionals(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Query(filter): Query<ProfessionalFilter>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .workforce_repo
        .list_professionals(&filter)
        .await?;
    Ok(Json(rows))
}

// /me antes de /{id} na montagem das rotas
#[utoipa::path(
    get,
    path = "/api/workforce/professionals/me",
    tag = "Workforce",
    responses((status = 200, body = ProfessionalProfile), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_my_professional(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state
        .workforce_repo
        .get_professional_by_user(user.id)
        .await?
        .ok_or(AppError::NotFound("Professional profile"))?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/workforce/professionals/featured",
    tag = "Workforce",
    responses((status = 200, body = [ProfessionalProfile])),
    security(("api_jwt" = []))
)]
pub async fn list_featured_professionals(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .workforce_repo
        .list_featured_professionals()
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/workforce/professionals/top-rated",
    tag = "Workforce",
    responses((status = 200, body = [ProfessionalProfile])),
    security(("api_jwt" = []))
)]
pub async fn list_top_rated_professionals(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .workforce_repo
        .list_top_rated_professionals()
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/workforce/professionals/{id}",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = ProfessionalProfile), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_professional(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state
        .workforce_repo
        .get_professional(id)
        .await?
        .ok_or(AppError::NotFound("Professional"))?;
    Ok(Json(profile))
}

#[utoipa::path(
    post,
    path = "/api/workforce/professionals",
    tag = "Workforce",
    request_body = ProfessionalProfilePayload,
    responses((status = 201, body = ProfessionalProfile), (status = 409)),
    security(("api_jwt" = []))
)]
pub async fn create_professional(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ProfessionalProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if app_state
        .workforce_repo
        .get_professional_by_user(user.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "You already have a professional profile.".into(),
        ));
    }

    let profile = app_state
        .workforce_repo
        .create_professional(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

#[utoipa::path(
    patch,
    path = "/api/workforce/professionals/me",
    tag = "Workforce",
    request_body = ProfessionalProfilePayload,
    responses((status = 200, body = ProfessionalProfile), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_my_professional(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ProfessionalProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let profile = app_state
        .workforce_repo
        .update_professional(user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Professional profile"))?;
    Ok(Json(profile))
}

// ---
// Avaliações de profissionais
// ---

#[utoipa::path(
    get,
    path = "/api/workforce/professionals/{id}/reviews",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = [ProfessionalReview])),
    security(("api_jwt" = []))
)]
pub async fn list_professional_reviews(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .workforce_repo
        .list_professional_reviews(id)
        .await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post,
    path = "/api/workforce/professional-reviews",
    tag = "Workforce",
    request_body = ProfessionalReviewPayload,
    responses((status = 201, body = ProfessionalReview), (status = 400), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_professional_review(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<ProfessionalReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let review = app_state
        .workforce_service
        .create_review(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

// Só o profissional avaliado pode responder.
#[utoipa::path(
    post,
    path = "/api/workforce/professional-reviews/{id}/respond",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    request_body = RespondReviewPayload,
    responses((status = 200, body = ProfessionalReview), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn respond_professional_review(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let review = app_state
        .workforce_repo
        .respond_review(id, user.id, &payload.response)
        .await?
        .ok_or(AppError::NotFound("Review"))?;
    Ok(Json(review))
}

#[utoipa::path(
    post,
    path = "/api/workforce/professional-reviews/{id}/helpful",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = ProfessionalReview), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn mark_review_helpful(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let review = app_state
        .workforce_repo
        .mark_review_helpful(id)
        .await?
        .ok_or(AppError::NotFound("Review"))?;
    Ok(Json(review))
}

// ---
// Vagas
// ---

#[utoipa::path(
    get,
    path = "/api/workforce/jobs",
    tag = "Workforce",
    params(JobScope),
    responses((status = 200, body = [JobPosting])),
    security(("api_jwt" = []))
)]
pub async fn list_jobs(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Query(scope): Query<JobScope>,
) -> Result<impl IntoResponse, AppError> {
    let jobs = app_state.workforce_repo.list_jobs(scope.status).await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/workforce/jobs/my-postings",
    tag = "Workforce",
    params(JobScope),
    responses((status = 200, body = [JobPosting])),
    security(("api_jwt" = []))
)]
pub async fn list_my_postings(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<JobScope>,
) -> Result<impl IntoResponse, AppError> {
    let jobs = app_state
        .workforce_repo
        .list_jobs_by_employer(user.id, scope.status)
        .await?;
    Ok(Json(jobs))
}

#[utoipa::path(
    get,
    path = "/api/workforce/jobs/{id}",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = JobPosting), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_job(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let job = app_state
        .workforce_repo
        .get_job(id)
        .await?
        .ok_or(AppError::NotFound("Job"))?;
    Ok(Json(job))
}

#[utoipa::path(
    post,
    path = "/api/workforce/jobs",
    tag = "Workforce",
    request_body = JobPostingPayload,
    responses((status = 201, body = JobPosting)),
    security(("api_jwt" = []))
)]
pub async fn create_job(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<JobPostingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let job = app_state
        .workforce_repo
        .create_job(user.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[utoipa::path(
    put,
    path = "/api/workforce/jobs/{id}",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    request_body = JobPostingPayload,
    responses((status = 200, body = JobPosting), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_job(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<JobPostingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let job = app_state
        .workforce_repo
        .update_job(id, user.id, &payload)
        .await?
        .ok_or(AppError::NotFound("Job"))?;
    Ok(Json(job))
}

#[utoipa::path(
    delete,
    path = "/api/workforce/jobs/{id}",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_job(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if app_state.workforce_repo.delete_job(id, user.id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Job"))
    }
}

// Aceita uma candidatura e fecha a vaga para as demais.
#[utoipa::path(
    post,
    path = "/api/workforce/jobs/{id}/hire",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    request_body = HirePayload,
    responses((status = 200, description = "Vaga e candidatura atualizadas"), (status = 404), (status = 409)),
    security(("api_jwt" = []))
)]
pub async fn hire(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<HirePayload>,
) -> Result<impl IntoResponse, AppError> {
    let (job, application) = app_state
        .workforce_service
        .hire(user.id, id, payload.application_id)
        .await?;
    Ok(Json(json!({ "job": job, "application": application })))
}

// ---
// Candidaturas
// ---

#[utoipa::path(
    get,
    path = "/api/workforce/applications",
    tag = "Workforce",
    params(JobScope),
    responses((status = 200, body = [JobApplication])),
    security(("api_jwt" = []))
)]
pub async fn list_applications(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(scope): Query<JobScope>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state
        .workforce_repo
        .list_applications(user.id, scope.job)
        .await?;
    Ok(Json(rows))
}

// Exige perfil profissional do usuário logado.
#[utoipa::path(
    post,
    path = "/api/workforce/applications",
    tag = "Workforce",
    request_body = JobApplicationPayload,
    responses((status = 201, body = JobApplication), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_application(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<JobApplicationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let professional = app_state
        .workforce_repo
        .get_professional_by_user(user.id)
        .await?
        .ok_or(AppError::NotFound("Professional profile"))?;

    let application = app_state
        .workforce_repo
        .create_application(professional.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    post,
    path = "/api/workforce/applications/{id}/withdraw",
    tag = "Workforce",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = JobApplication), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn withdraw_application(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let application = app_state
        .workforce_repo
        .withdraw_application(id, user.id)
        .await?
        .ok_or(AppError::NotFound("Application"))?;
    Ok(Json(application))
}
