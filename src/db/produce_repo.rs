// src/db/produce_repo.rs

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::produce::{
        ProduceCollection, ProduceCollectionPayload, ProduceSummary, ProduceUnit,
    },
};

#[derive(FromRow)]
struct SummaryRow {
    total_collections: i64,
    total_quantity: Option<Decimal>,
    last_collection: Option<chrono::NaiveDate>,
}

// Coletas de produção, sempre aninhadas em uma fazenda do usuário.
#[derive(Clone)]
pub struct ProduceRepository {
    pool: PgPool,
}

impl ProduceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn farm_owned(&self, farm_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM farms WHERE id = $1 AND owner_id = $2)",
        )
        .bind(farm_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }

    pub async fn list_collections(
        &self,
        farm_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Vec<ProduceCollection>, AppError> {
        let rows = sqlx::query_as::<_, ProduceCollection>(
            r#"
            SELECT p.* FROM produce_collections p
            JOIN farms fa ON fa.id = p.farm_id
            WHERE p.farm_id = $1 AND fa.owner_id = $2
            ORDER BY p.collection_date DESC
            "#,
        )
        .bind(farm_id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_collection(
        &self,
        collection_id: Uuid,
        farm_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<ProduceCollection>, AppError> {
        let row = sqlx::query_as::<_, ProduceCollection>(
            r#"
            SELECT p.* FROM produce_collections p
            JOIN farms fa ON fa.id = p.farm_id
            WHERE p.id = $1 AND p.farm_id = $2 AND fa.owner_id = $3
            "#,
        )
        .bind(collection_id)
        .bind(farm_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create_collection(
        &self,
        farm_id: Uuid,
        owner_id: Uuid,
        payload: &ProduceCollectionPayload,
    ) -> Result<ProduceCollection, AppError> {
        if !self.farm_owned(farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let row = sqlx::query_as::<_, ProduceCollection>(
            r#"
            INSERT INTO produce_collections (
                farm_id, source, product_name, quantity, unit,
                collection_date, quality_grade, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(farm_id)
        .bind(payload.source)
        .bind(&payload.product_name)
        .bind(payload.quantity)
        .bind(payload.unit.unwrap_or(ProduceUnit::Kg))
        .bind(payload.collection_date)
        .bind(payload.quality_grade.as_deref())
        .bind(payload.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_collection(
        &self,
        collection_id: Uuid,
        farm_id: Uuid,
        owner_id: Uuid,
        payload: &ProduceCollectionPayload,
    ) -> Result<Option<ProduceCollection>, AppError> {
        let row = sqlx::query_as::<_, ProduceCollection>(
            r#"
            UPDATE produce_collections p SET
                source = $4, product_name = $5, quantity = $6, unit = $7,
                collection_date = $8, quality_grade = $9, notes = $10,
                updated_at = NOW()
            FROM farms fa
            WHERE p.id = $1 AND p.farm_id = $2 AND fa.id = p.farm_id AND fa.owner_id = $3
            RETURNING p.*
            "#,
        )
        .bind(collection_id)
        .bind(farm_id)
        .bind(owner_id)
        .bind(payload.source)
        .bind(&payload.product_name)
        .bind(payload.quantity)
        .bind(payload.unit.unwrap_or(ProduceUnit::Kg))
        .bind(payload.collection_date)
        .bind(payload.quality_grade.as_deref())
        .bind(payload.notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_collection(
        &self,
        collection_id: Uuid,
        farm_id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM produce_collections p
            USING farms fa
            WHERE p.id = $1 AND p.farm_id = $2 AND fa.id = p.farm_id AND fa.owner_id = $3
            "#,
        )
        .bind(collection_id)
        .bind(farm_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // Totais da fazenda (contagem, soma e última coleta).
    pub async fn summary(&self, farm_id: Uuid, owner_id: Uuid) -> Result<ProduceSummary, AppError> {
        if !self.farm_owned(farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT
                COUNT(*) AS total_collections,
                SUM(quantity) AS total_quantity,
                MAX(collection_date) AS last_collection
            FROM produce_collections
            WHERE farm_id = $1
            "#,
        )
        .bind(farm_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(ProduceSummary {
            total_collections: row.total_collections,
            total_quantity: row.total_quantity.unwrap_or(Decimal::ZERO),
            last_collection: row.last_collection,
        })
    }
}
