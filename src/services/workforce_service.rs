// src/services/workforce_service.rs

use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WorkforceRepository,
    models::workforce::{
        ApplicationStatus, JobApplication, JobPosting, JobStatus, ProfessionalReview,
        ProfessionalReviewPayload,
    },
};

// Regras da rede de profissionais que envolvem mais de uma tabela:
// contratação (vaga + candidaturas) e avaliação (review + média do perfil).
#[derive(Clone)]
pub struct WorkforceService {
    repo: WorkforceRepository,
    pool: PgPool,
}

impl WorkforceService {
    pub fn new(repo: WorkforceRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // Aceita uma candidatura: marca a vaga como em andamento, aceita a
    // candidatura escolhida e rejeita as demais, tudo na mesma transação.
    pub async fn hire(
        &self,
        employer_id: Uuid,
        job_id: Uuid,
        application_id: Uuid,
    ) -> Result<(JobPosting, JobApplication), AppError> {
        let mut tx = self.pool.begin().await?;

        let application = self
            .repo
            .get_application(&mut *tx, application_id)
            .await?
            .filter(|a| a.job_id == job_id)
            .ok_or(AppError::NotFound("Application"))?;

        if application.status != ApplicationStatus::Pending {
            return Err(AppError::Conflict(
                "This application is no longer pending.".into(),
            ));
        }

        let job = self
            .repo
            .lock_job(&mut *tx, application.job_id, employer_id)
            .await?
            .ok_or(AppError::NotFound("Job"))?;

        if job.status != JobStatus::Open {
            return Err(AppError::Conflict("This job is not open for hiring.".into()));
        }

        let accepted = self
            .repo
            .set_application_status(&mut *tx, application_id, ApplicationStatus::Accepted)
            .await?
            .ok_or(AppError::NotFound("Application"))?;
        self.repo
            .reject_other_applications(&mut *tx, job.id, application_id)
            .await?;
        let job = self
            .repo
            .mark_job_hired(&mut *tx, job.id, application.professional_id)
            .await?;

        tx.commit().await?;

        tracing::info!(job_id = %job.id, professional_id = %application.professional_id, "Profissional contratado");
        Ok((job, accepted))
    }

    // Grava a avaliação e recalcula a média do perfil na mesma transação.
    pub async fn create_review(
        &self,
        reviewer_id: Uuid,
        payload: &ProfessionalReviewPayload,
    ) -> Result<ProfessionalReview, AppError> {
        let professional = self
            .repo
            .get_professional(payload.professional_id)
            .await?
            .ok_or(AppError::NotFound("Professional"))?;

        if professional.user_id == reviewer_id {
            return Err(AppError::BadRequest("You cannot review yourself.".into()));
        }

        let mut tx = self.pool.begin().await?;
        let review = self.repo.insert_review(&mut *tx, reviewer_id, payload).await?;
        let ratings = self
            .repo
            .list_review_ratings(&mut *tx, payload.professional_id)
            .await?;
        let (average, total) = average_rating(&ratings);
        self.repo
            .set_rating_stats(&mut *tx, payload.professional_id, average, total)
            .await?;
        tx.commit().await?;

        Ok(review)
    }
}

// Média das notas com duas casas, arredondando meio para cima
// (o mesmo que numeric(3,2) faria no banco). Sem avaliações, zero.
pub fn average_rating(ratings: &[i32]) -> (Decimal, i64) {
    if ratings.is_empty() {
        return (Decimal::ZERO, 0);
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let average = (Decimal::from(sum) / Decimal::from(ratings.len() as i64))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    (average, ratings.len() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn average_is_rounded_to_two_places() {
        let (average, total) = average_rating(&[5, 4, 4]);
        assert_eq!(average, dec!(4.33));
        assert_eq!(total, 3);
    }

    #[test]
    fn midpoints_round_away_from_zero() {
        // 33 / 8 = 4.125 -> 4.13
        let (average, total) = average_rating(&[4, 4, 4, 4, 4, 4, 4, 5]);
        assert_eq!(average, dec!(4.13));
        assert_eq!(total, 8);
    }

    #[test]
    fn no_reviews_means_zero() {
        assert_eq!(average_rating(&[]), (Decimal::ZERO, 0));
    }
}
