// src/db/workforce_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::workforce::{
        ApplicationStatus, Employee, EmployeePayload, Equipment, JobApplication,
        JobApplicationPayload, JobPosting, JobPostingPayload, JobStatus, Machinery,
        MachineryPayload, ProfessionalFilter, ProfessionalProfile, ProfessionalProfilePayload,
        ProfessionalReview, ProfessionalReviewPayload,
    },
};

// Mão de obra: funcionários da fazenda, maquinário e a rede de
// profissionais (perfis, avaliações, vagas e candidaturas).
#[derive(Clone)]
pub struct WorkforceRepository {
    pool: PgPool,
}

impl WorkforceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn farm_owned(&self, farm_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM farms WHERE id = $1 AND owner_id = $2)",
        )
        .bind(farm_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }

    // ---
    // Funcionários
    // ---

    pub async fn list_employees(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
    ) -> Result<Vec<Employee>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT e.* FROM employees e
            JOIN farms fa ON fa.id = e.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR e.farm_id = $2)
            ORDER BY e.last_name ASC, e.first_name ASC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    pub async fn get_employee(
        &self,
        employee_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT e.* FROM employees e
            JOIN farms fa ON fa.id = e.farm_id
            WHERE e.id = $1 AND fa.owner_id = $2
            "#,
        )
        .bind(employee_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    pub async fn create_employee(
        &self,
        owner_id: Uuid,
        payload: &EmployeePayload,
    ) -> Result<Employee, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (
                farm_id, first_name, last_name, phone, country_code, role,
                employment_type, hire_date, salary, additional_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.phone)
        .bind(&payload.country_code)
        .bind(&payload.role)
        .bind(&payload.employment_type)
        .bind(payload.hire_date)
        .bind(payload.salary)
        .bind(payload.additional_notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(employee)
    }

    pub async fn update_employee(
        &self,
        employee_id: Uuid,
        owner_id: Uuid,
        payload: &EmployeePayload,
    ) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees e SET
                first_name = $3, last_name = $4, phone = $5, country_code = $6,
                role = $7, employment_type = $8, hire_date = $9, salary = $10,
                additional_notes = $11, updated_at = NOW()
            FROM farms fa
            WHERE e.id = $1 AND fa.id = e.farm_id AND fa.owner_id = $2
            RETURNING e.*
            "#,
        )
        .bind(employee_id)
        .bind(owner_id)
        .bind(&payload.first_name)
        .bind(&payload.last_name)
        .bind(&payload.phone)
        .bind(&payload.country_code)
        .bind(&payload.role)
        .bind(&payload.employment_type)
        .bind(payload.hire_date)
        .bind(payload.salary)
        .bind(payload.additional_notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    pub async fn delete_employee(&self, employee_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM employees e
            USING farms fa
            WHERE e.id = $1 AND fa.id = e.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(employee_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Maquinário e equipamentos (mesma forma, tabelas distintas)
    // ---

    pub async fn list_machinery(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
    ) -> Result<Vec<Machinery>, AppError> {
        let rows = sqlx::query_as::<_, Machinery>(
            r#"
            SELECT m.* FROM machinery m
            JOIN farms fa ON fa.id = m.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR m.farm_id = $2)
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_machinery(
        &self,
        owner_id: Uuid,
        payload: &MachineryPayload,
    ) -> Result<Machinery, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let row = sqlx::query_as::<_, Machinery>(
            r#"
            INSERT INTO machinery (
                farm_id, name, machine_type, description, assigned_to,
                purchased_by, purchased_on, value, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(&payload.name)
        .bind(&payload.machine_type)
        .bind(payload.description.as_deref())
        .bind(payload.assigned_to)
        .bind(payload.purchased_by)
        .bind(payload.purchased_on)
        .bind(payload.value)
        .bind(&payload.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_machinery(&self, machinery_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM machinery m
            USING farms fa
            WHERE m.id = $1 AND fa.id = m.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(machinery_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_equipment(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
    ) -> Result<Vec<Equipment>, AppError> {
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT e.* FROM equipment e
            JOIN farms fa ON fa.id = e.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR e.farm_id = $2)
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_equipment(
        &self,
        owner_id: Uuid,
        payload: &MachineryPayload,
    ) -> Result<Equipment, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                farm_id, name, equipment_type, description, assigned_to,
                purchased_by, purchased_on, value, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(&payload.name)
        .bind(&payload.machine_type)
        .bind(payload.description.as_deref())
        .bind(payload.assigned_to)
        .bind(payload.purchased_by)
        .bind(payload.purchased_on)
        .bind(payload.value)
        .bind(&payload.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_equipment(&self, equipment_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM equipment e
            USING farms fa
            WHERE e.id = $1 AND fa.id = e.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(equipment_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Perfis profissionais (listagem pública, escrita do próprio dono)
    // ---

    pub async fn list_professionals(
        &self,
        filter: &ProfessionalFilter,
    ) -> Result<Vec<ProfessionalProfile>, AppError> {
        let rows = sqlx::query_as::<_, ProfessionalProfile>(
            r#"
            SELECT * FROM professional_profiles
            WHERE is_active = TRUE
              AND ($1::specialty IS NULL OR specialty = $1)
              AND ($2::availability IS NULL OR availability = $2)
              AND ($3::numeric IS NULL OR average_rating >= $3)
              AND ($4::numeric IS NULL OR hourly_rate <= $4)
              AND ($5::int IS NULL OR years_experience >= $5)
            ORDER BY featured DESC, average_rating DESC
            "#,
        )
        .bind(filter.specialty)
        .bind(filter.availability)
        .bind(filter.min_rating)
        .bind(filter.max_rate)
        .bind(filter.min_experience)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_professional(
        &self,
        profile_id: Uuid,
    ) -> Result<Option<ProfessionalProfile>, AppError> {
        let row = sqlx::query_as::<_, ProfessionalProfile>(
            "SELECT * FROM professional_profiles WHERE id = $1",
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_professional_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfessionalProfile>, AppError> {
        let row = sqlx::query_as::<_, ProfessionalProfile>(
            "SELECT * FROM professional_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn list_featured_professionals(&self) -> Result<Vec<ProfessionalProfile>, AppError> {
        let rows = sqlx::query_as::<_, ProfessionalProfile>(
            r#"
            SELECT * FROM professional_profiles
            WHERE is_active = TRUE AND featured = TRUE
            ORDER BY average_rating DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Melhor avaliados com um mínimo de avaliações, como o queryset original.
    pub async fn list_top_rated_professionals(&self) -> Result<Vec<ProfessionalProfile>, AppError> {
        let rows = sqlx::query_as::<_, ProfessionalProfile>(
            r#"
            SELECT * FROM professional_profiles
            WHERE is_active = TRUE AND total_reviews >= 3
            ORDER BY average_rating DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_professional(
        &self,
        user_id: Uuid,
        payload: &ProfessionalProfilePayload,
    ) -> Result<ProfessionalProfile, AppError> {
        sqlx::query_as::<_, ProfessionalProfile>(
            r#"
            INSERT INTO professional_profiles (
                user_id, profile_image_url, bio, phone, location, specialty,
                years_experience, hourly_rate, availability, education,
                work_experience, skills, certifications, languages,
                notable_projects, linkedin_url, portfolio_url
            )
            VALUES (
                $1, $2, COALESCE($3, ''), COALESCE($4, ''), $5, $6, $7, $8,
                COALESCE($9, 'available'::availability), COALESCE($10, ''),
                COALESCE($11, ''), COALESCE($12, '[]'::jsonb), COALESCE($13, '[]'::jsonb),
                COALESCE($14, '[]'::jsonb), COALESCE($15, ''), COALESCE($16, ''),
                COALESCE($17, '')
            )
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(payload.profile_image_url.as_deref())
        .bind(payload.bio.as_deref())
        .bind(payload.phone.as_deref())
        .bind(&payload.location)
        .bind(payload.specialty)
        .bind(payload.years_experience)
        .bind(payload.hourly_rate)
        .bind(payload.availability)
        .bind(payload.education.as_deref())
        .bind(payload.work_experience.as_deref())
        .bind(payload.skills.as_ref())
        .bind(payload.certifications.as_ref())
        .bind(payload.languages.as_ref())
        .bind(payload.notable_projects.as_deref())
        .bind(payload.linkedin_url.as_deref())
        .bind(payload.portfolio_url.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("You already have a professional profile.".into());
                }
            }
            e.into()
        })
    }

    pub async fn update_professional(
        &self,
        user_id: Uuid,
        payload: &ProfessionalProfilePayload,
    ) -> Result<Option<ProfessionalProfile>, AppError> {
        let row = sqlx::query_as::<_, ProfessionalProfile>(
            r#"
            UPDATE professional_profiles SET
                profile_image_url = COALESCE($2, profile_image_url),
                bio = COALESCE($3, bio),
                phone = COALESCE($4, phone),
                location = $5,
                specialty = $6,
                years_experience = $7,
                hourly_rate = $8,
                availability = COALESCE($9, availability),
                education = COALESCE($10, education),
                work_experience = COALESCE($11, work_experience),
                skills = COALESCE($12, skills),
                certifications = COALESCE($13, certifications),
                languages = COALESCE($14, languages),
                notable_projects = COALESCE($15, notable_projects),
                linkedin_url = COALESCE($16, linkedin_url),
                portfolio_url = COALESCE($17, portfolio_url),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(payload.profile_image_url.as_deref())
        .bind(payload.bio.as_deref())
        .bind(payload.phone.as_deref())
        .bind(&payload.location)
        .bind(payload.specialty)
        .bind(payload.years_experience)
        .bind(payload.hourly_rate)
        .bind(payload.availability)
        .bind(payload.education.as_deref())
        .bind(payload.work_experience.as_deref())
        .bind(payload.skills.as_ref())
        .bind(payload.certifications.as_ref())
        .bind(payload.languages.as_ref())
        .bind(payload.notable_projects.as_deref())
        .bind(payload.linkedin_url.as_deref())
        .bind(payload.portfolio_url.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    // ---
    // Avaliações de profissionais
    // ---

    pub async fn list_professional_reviews(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<ProfessionalReview>, AppError> {
        let rows = sqlx::query_as::<_, ProfessionalReview>(
            "SELECT * FROM professional_reviews WHERE professional_id = $1 ORDER BY created_at DESC",
        )
        .bind(professional_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert_review<'e, E>(
        &self,
        executor: E,
        reviewer_id: Uuid,
        payload: &ProfessionalReviewPayload,
    ) -> Result<ProfessionalReview, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, ProfessionalReview>(
            r#"
            INSERT INTO professional_reviews (
                professional_id, reviewer_id, rating, title, comment, job_title,
                work_quality, professionalism, communication, timeliness
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(payload.professional_id)
        .bind(reviewer_id)
        .bind(payload.rating)
        .bind(&payload.title)
        .bind(&payload.comment)
        .bind(payload.job_title.as_deref())
        .bind(payload.work_quality)
        .bind(payload.professionalism)
        .bind(payload.communication)
        .bind(payload.timeliness)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "You have already reviewed this professional.".into(),
                    );
                }
            }
            e.into()
        })
    }

    pub async fn list_review_ratings<'e, E>(
        &self,
        executor: E,
        professional_id: Uuid,
    ) -> Result<Vec<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ratings = sqlx::query_scalar::<_, i32>(
            "SELECT rating FROM professional_reviews WHERE professional_id = $1",
        )
        .bind(professional_id)
        .fetch_all(executor)
        .await?;
        Ok(ratings)
    }

    pub async fn set_rating_stats<'e, E>(
        &self,
        executor: E,
        professional_id: Uuid,
        average_rating: Decimal,
        total_reviews: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE professional_profiles SET
                average_rating = $2, total_reviews = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(professional_id)
        .bind(average_rating)
        .bind(total_reviews)
        .execute(executor)
        .await?;
        Ok(())
    }

    // Só o profissional avaliado pode responder, uma única vez.
    pub async fn respond_review(
        &self,
        review_id: Uuid,
        user_id: Uuid,
        response: &str,
    ) -> Result<Option<ProfessionalReview>, AppError> {
        let row = sqlx::query_as::<_, ProfessionalReview>(
            r#"
            UPDATE professional_reviews r SET
                response = $3, response_date = NOW(), updated_at = NOW()
            FROM professional_profiles p
            WHERE r.id = $1 AND p.id = r.professional_id AND p.user_id = $2
              AND r.response IS NULL
            RETURNING r.*
            "#,
        )
        .bind(review_id)
        .bind(user_id)
        .bind(response)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn mark_review_helpful(
        &self,
        review_id: Uuid,
    ) -> Result<Option<ProfessionalReview>, AppError> {
        let row = sqlx::query_as::<_, ProfessionalReview>(
            r#"
            UPDATE professional_reviews SET
                helpful_count = helpful_count + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    // ---
    // Vagas
    // ---

    pub async fn list_jobs(&self, status: Option<JobStatus>) -> Result<Vec<JobPosting>, AppError> {
        let rows = sqlx::query_as::<_, JobPosting>(
            r#"
            SELECT * FROM job_postings
            WHERE ($1::job_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn list_jobs_by_employer(
        &self,
        employer_id: Uuid,
        status: Option<JobStatus>,
    ) -> Result<Vec<JobPosting>, AppError> {
        let rows = sqlx::query_as::<_, JobPosting>(
            r#"
            SELECT * FROM job_postings
            WHERE employer_id = $1
              AND ($2::job_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(employer_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_job(&self, job_id: Uuid) -> Result<Option<JobPosting>, AppError> {
        let row = sqlx::query_as::<_, JobPosting>("SELECT * FROM job_postings WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create_job(
        &self,
        employer_id: Uuid,
        payload: &JobPostingPayload,
    ) -> Result<JobPosting, AppError> {
        let row = sqlx::query_as::<_, JobPosting>(
            r#"
            INSERT INTO job_postings (
                employer_id, farm_id, title, description, specialty_required,
                location, budget, payment_type, start_date, end_date, duration,
                experience_required, skills_required, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    COALESCE($13, '[]'::jsonb), COALESCE($14, 'open'::job_status))
            RETURNING *
            "#,
        )
        .bind(employer_id)
        .bind(payload.farm_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.specialty_required)
        .bind(&payload.location)
        .bind(payload.budget)
        .bind(payload.payment_type)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.duration.as_deref())
        .bind(payload.experience_required)
        .bind(payload.skills_required.as_ref())
        .bind(payload.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_job(
        &self,
        job_id: Uuid,
        employer_id: Uuid,
        payload: &JobPostingPayload,
    ) -> Result<Option<JobPosting>, AppError> {
        let row = sqlx::query_as::<_, JobPosting>(
            r#"
            UPDATE job_postings SET
                farm_id = $3, title = $4, description = $5, specialty_required = $6,
                location = $7, budget = $8, payment_type = $9, start_date = $10,
                end_date = $11, duration = $12, experience_required = $13,
                skills_required = COALESCE($14, skills_required),
                status = COALESCE($15, status),
                updated_at = NOW()
            WHERE id = $1 AND employer_id = $2
            RETURNING *
            "#,
        )
        .bind(job_id)
        .bind(employer_id)
        .bind(payload.farm_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(payload.specialty_required)
        .bind(&payload.location)
        .bind(payload.budget)
        .bind(payload.payment_type)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.duration.as_deref())
        .bind(payload.experience_required)
        .bind(payload.skills_required.as_ref())
        .bind(payload.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_job(&self, job_id: Uuid, employer_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM job_postings WHERE id = $1 AND employer_id = $2")
            .bind(job_id)
            .bind(employer_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Usado pela contratação, dentro da transação do serviço.
    pub async fn lock_job<'e, E>(
        &self,
        executor: E,
        job_id: Uuid,
        employer_id: Uuid,
    ) -> Result<Option<JobPosting>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, JobPosting>(
            "SELECT * FROM job_postings WHERE id = $1 AND employer_id = $2 FOR UPDATE",
        )
        .bind(job_id)
        .bind(employer_id)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    pub async fn mark_job_hired<'e, E>(
        &self,
        executor: E,
        job_id: Uuid,
        professional_id: Uuid,
    ) -> Result<JobPosting, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, JobPosting>(
            r#"
            UPDATE job_postings SET
                status = 'in_progress', hired_professional_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(job_id)
        .bind(professional_id)
        .fetch_one(executor)
        .await?;
        Ok(row)
    }

    // ---
    // Candidaturas
    // ---

    pub async fn create_application(
        &self,
        professional_id: Uuid,
        payload: &JobApplicationPayload,
    ) -> Result<JobApplication, AppError> {
        sqlx::query_as::<_, JobApplication>(
            r#"
            INSERT INTO job_applications (job_id, professional_id, cover_letter, proposed_rate, availability_start)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.job_id)
        .bind(professional_id)
        .bind(&payload.cover_letter)
        .bind(payload.proposed_rate)
        .bind(payload.availability_start)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("You have already applied to this job.".into());
                }
            }
            e.into()
        })
    }

    // Candidaturas visíveis: as do próprio profissional e as das vagas do empregador.
    pub async fn list_applications(
        &self,
        user_id: Uuid,
        job_id: Option<Uuid>,
    ) -> Result<Vec<JobApplication>, AppError> {
        let rows = sqlx::query_as::<_, JobApplication>(
            r#"
            SELECT a.* FROM job_applications a
            JOIN job_postings j ON j.id = a.job_id
            LEFT JOIN professional_profiles p ON p.id = a.professional_id
            WHERE (j.employer_id = $1 OR p.user_id = $1)
              AND ($2::uuid IS NULL OR a.job_id = $2)
            ORDER BY a.applied_at DESC
            "#,
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_application<'e, E>(
        &self,
        executor: E,
        application_id: Uuid,
    ) -> Result<Option<JobApplication>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row =
            sqlx::query_as::<_, JobApplication>("SELECT * FROM job_applications WHERE id = $1")
                .bind(application_id)
                .fetch_optional(executor)
                .await?;
        Ok(row)
    }

    pub async fn set_application_status<'e, E>(
        &self,
        executor: E,
        application_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<JobApplication>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, JobApplication>(
            r#"
            UPDATE job_applications SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(application_id)
        .bind(status)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    // Marca as demais candidaturas da vaga como rejeitadas após a contratação.
    pub async fn reject_other_applications<'e, E>(
        &self,
        executor: E,
        job_id: Uuid,
        accepted_id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE job_applications SET status = 'rejected', updated_at = NOW()
            WHERE job_id = $1 AND id <> $2 AND status = 'pending'
            "#,
        )
        .bind(job_id)
        .bind(accepted_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // O profissional retira a própria candidatura enquanto pendente.
    pub async fn withdraw_application(
        &self,
        application_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<JobApplication>, AppError> {
        let row = sqlx::query_as::<_, JobApplication>(
            r#"
            UPDATE job_applications a SET status = 'withdrawn', updated_at = NOW()
            FROM professional_profiles p
            WHERE a.id = $1 AND p.id = a.professional_id AND p.user_id = $2
              AND a.status = 'pending'
            RETURNING a.*
            "#,
        )
        .bind(application_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
