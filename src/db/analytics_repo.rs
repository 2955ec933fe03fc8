// src/db/analytics_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::analytics::{
        AnalyticsAggregate, CategoryTotal, FarmFinance, FarmFinancePayload, FinanceSummary,
        Report, ReportPayload,
    },
};

// Lançamentos financeiros, agregados e relatórios, escopados pela fazenda.
#[derive(Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
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
    // Finanças
    // ---

    pub async fn list_finances(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
        entry_type: Option<&str>,
    ) -> Result<Vec<FarmFinance>, AppError> {
        let rows = sqlx::query_as::<_, FarmFinance>(
            r#"
            SELECT f.* FROM farm_finances f
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1
              AND ($2::uuid IS NULL OR f.farm_id = $2)
              AND ($3::text IS NULL OR f.entry_type = $3)
            ORDER BY f.date DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .bind(entry_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_finance(
        &self,
        owner_id: Uuid,
        payload: &FarmFinancePayload,
    ) -> Result<FarmFinance, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let row = sqlx::query_as::<_, FarmFinance>(
            r#"
            INSERT INTO farm_finances (
                farm_id, entry_type, category, related_id, amount, currency, description, date
            )
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'USD'), $7, $8)
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(&payload.entry_type)
        .bind(&payload.category)
        .bind(payload.related_id)
        .bind(payload.amount)
        .bind(payload.currency.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_finance(&self, finance_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM farm_finances f
            USING farms fa
            WHERE f.id = $1 AND fa.id = f.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(finance_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // Receita, despesa e saldo, com a quebra por categoria.
    pub async fn finance_summary(
        &self,
        farm_id: Uuid,
        owner_id: Uuid,
    ) -> Result<FinanceSummary, AppError> {
        if !self.farm_owned(farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }

        let by_category = sqlx::query_as::<_, CategoryTotal>(
            r#"
            SELECT entry_type, category, SUM(amount) AS total
            FROM farm_finances
            WHERE farm_id = $1
            GROUP BY entry_type, category
            ORDER BY entry_type, category
            "#,
        )
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;

        let total_income: Decimal = by_category
            .iter()
            .filter(|c| c.entry_type == "income")
            .map(|c| c.total)
            .sum();
        let total_expense: Decimal = by_category
            .iter()
            .filter(|c| c.entry_type == "expense")
            .map(|c| c.total)
            .sum();

        Ok(FinanceSummary {
            net: total_income - total_expense,
            total_income,
            total_expense,
            by_category,
        })
    }

    // ---
    // Agregados
    // ---

    pub async fn list_aggregates(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
        metric_type: Option<&str>,
    ) -> Result<Vec<AnalyticsAggregate>, AppError> {
        let rows = sqlx::query_as::<_, AnalyticsAggregate>(
            r#"
            SELECT a.* FROM analytics_aggregates a
            JOIN farms fa ON fa.id = a.farm_id
            WHERE fa.owner_id = $1
              AND ($2::uuid IS NULL OR a.farm_id = $2)
              AND ($3::text IS NULL OR a.metric_type = $3)
            ORDER BY a.calculated_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .bind(metric_type)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // ---
    // Relatórios
    // ---

    pub async fn list_reports(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
    ) -> Result<Vec<Report>, AppError> {
        let rows = sqlx::query_as::<_, Report>(
            r#"
            SELECT r.* FROM reports r
            JOIN farms fa ON fa.id = r.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR r.farm_id = $2)
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_report(
        &self,
        owner_id: Uuid,
        payload: &ReportPayload,
    ) -> Result<Report, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let row = sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (farm_id, report_type, parameters, generated_data)
            VALUES ($1, $2, COALESCE($3, '{}'::jsonb), COALESCE($4, '{}'::jsonb))
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(&payload.report_type)
        .bind(payload.parameters.as_ref())
        .bind(payload.generated_data.as_ref())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
