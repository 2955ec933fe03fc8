// src/db/ai_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ai::{AiLog, Alert, AlertPayload, Prediction, PredictionPayload},
};

// Logs do assistente, previsões e alertas.
#[derive(Clone)]
pub struct AiRepository {
    pool: PgPool,
}

impl AiRepository {
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
    // Logs do assistente
    // ---

    pub async fn list_logs(
        &self,
        user_id: Uuid,
        context_type: Option<&str>,
    ) -> Result<Vec<AiLog>, AppError> {
        let logs = sqlx::query_as::<_, AiLog>(
            r#"
            SELECT * FROM ai_logs
            WHERE user_id = $1 AND ($2::text IS NULL OR context_type = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(context_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    // As últimas interações do mesmo contexto viram "memória" do assistente.
    pub async fn recent_logs(
        &self,
        user_id: Uuid,
        context_type: &str,
        limit: i64,
    ) -> Result<Vec<AiLog>, AppError> {
        let logs = sqlx::query_as::<_, AiLog>(
            r#"
            SELECT * FROM ai_logs
            WHERE user_id = $1 AND context_type = $2
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(context_type)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    pub async fn insert_log(
        &self,
        user_id: Uuid,
        context_type: &str,
        context_id: &str,
        prompt: &str,
        response: &str,
        model: &str,
        tokens_used: i32,
    ) -> Result<AiLog, AppError> {
        let log = sqlx::query_as::<_, AiLog>(
            r#"
            INSERT INTO ai_logs (user_id, context_type, context_id, prompt, response, model, tokens_used)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(context_type)
        .bind(context_id)
        .bind(prompt)
        .bind(response)
        .bind(model)
        .bind(tokens_used)
        .fetch_one(&self.pool)
        .await?;
        Ok(log)
    }

    // ---
    // Previsões
    // ---

    pub async fn list_predictions(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
    ) -> Result<Vec<Prediction>, AppError> {
        let rows = sqlx::query_as::<_, Prediction>(
            r#"
            SELECT p.* FROM predictions p
            JOIN farms fa ON fa.id = p.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR p.farm_id = $2)
            ORDER BY p.generated_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_prediction(
        &self,
        owner_id: Uuid,
        payload: &PredictionPayload,
    ) -> Result<Prediction, AppError> {
        if let Some(farm_id) = payload.farm_id {
            if !self.farm_owned(farm_id, owner_id).await? {
                return Err(AppError::NotFound("Farm"));
            }
        }
        let row = sqlx::query_as::<_, Prediction>(
            r#"
            INSERT INTO predictions (
                farm_id, crop_id, livestock_unit_id, animal_id, prediction_type,
                inputs, result, confidence, explanation
            )
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, '{}'::jsonb),
                    COALESCE($7, '{}'::jsonb), $8, $9)
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(payload.crop_id)
        .bind(payload.livestock_unit_id)
        .bind(payload.animal_id)
        .bind(&payload.prediction_type)
        .bind(payload.inputs.as_ref())
        .bind(payload.result.as_ref())
        .bind(payload.confidence)
        .bind(&payload.explanation)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    // ---
    // Alertas
    // ---

    pub async fn list_alerts(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
        resolved: Option<bool>,
    ) -> Result<Vec<Alert>, AppError> {
        let rows = sqlx::query_as::<_, Alert>(
            r#"
            SELECT a.* FROM alerts a
            JOIN farms fa ON fa.id = a.farm_id
            WHERE fa.owner_id = $1
              AND ($2::uuid IS NULL OR a.farm_id = $2)
              AND ($3::boolean IS NULL OR a.resolved = $3)
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .bind(resolved)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_alert(
        &self,
        owner_id: Uuid,
        payload: &AlertPayload,
    ) -> Result<Alert, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let row = sqlx::query_as::<_, Alert>(
            r#"
            INSERT INTO alerts (farm_id, alert_type, title, message, related_table, related_id, due_date)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, ''), $7)
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(&payload.alert_type)
        .bind(&payload.title)
        .bind(&payload.message)
        .bind(&payload.related_table)
        .bind(payload.related_id.as_deref())
        .bind(payload.due_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn resolve_alert(
        &self,
        alert_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Alert>, AppError> {
        let row = sqlx::query_as::<_, Alert>(
            r#"
            UPDATE alerts a SET resolved = TRUE
            FROM farms fa
            WHERE a.id = $1 AND fa.id = a.farm_id AND fa.owner_id = $2
            RETURNING a.*
            "#,
        )
        .bind(alert_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
