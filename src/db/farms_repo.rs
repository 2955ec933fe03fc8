// src/db/farms_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::farms::{
        EnvironmentalData, EnvironmentalDataPayload, Farm, FarmPayload, FarmType, Field,
        FieldPayload, SizeUnit,
    },
};

// Fazendas, talhões e dados ambientais. Todas as consultas filtram
// pela cadeia de posse (farm.owner_id), nunca só pelo id.
#[derive(Clone)]
pub struct FarmRepository {
    pool: PgPool,
}

impl FarmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Usado pelos outros repositórios antes de inserir filhos de uma fazenda.
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

    pub async fn list_farms(&self, owner_id: Uuid) -> Result<Vec<Farm>, AppError> {
        let farms = sqlx::query_as::<_, Farm>(
            "SELECT * FROM farms WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(farms)
    }

    pub async fn get_farm(&self, farm_id: Uuid, owner_id: Uuid) -> Result<Option<Farm>, AppError> {
        let farm =
            sqlx::query_as::<_, Farm>("SELECT * FROM farms WHERE id = $1 AND owner_id = $2")
                .bind(farm_id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(farm)
    }

    pub async fn create_farm(
        &self,
        owner_id: Uuid,
        payload: &FarmPayload,
        farm_type: FarmType,
    ) -> Result<Farm, AppError> {
        let farm = sqlx::query_as::<_, Farm>(
            r#"
            INSERT INTO farms (
                owner_id, name, farm_type, country, state, city, address,
                total_size, size_unit, additional_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&payload.name)
        .bind(farm_type)
        .bind(&payload.country)
        .bind(payload.state.as_deref())
        .bind(&payload.city)
        .bind(payload.address.as_deref())
        .bind(payload.total_size)
        .bind(payload.size_unit.unwrap_or(SizeUnit::Acres))
        .bind(payload.additional_notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(farm)
    }

    pub async fn update_farm(
        &self,
        farm_id: Uuid,
        owner_id: Uuid,
        payload: &FarmPayload,
        farm_type: FarmType,
    ) -> Result<Option<Farm>, AppError> {
        let farm = sqlx::query_as::<_, Farm>(
            r#"
            UPDATE farms SET
                name = $3, farm_type = $4, country = $5, state = $6, city = $7,
                address = $8, total_size = $9, size_unit = $10,
                additional_notes = $11, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(farm_id)
        .bind(owner_id)
        .bind(&payload.name)
        .bind(farm_type)
        .bind(&payload.country)
        .bind(payload.state.as_deref())
        .bind(&payload.city)
        .bind(payload.address.as_deref())
        .bind(payload.total_size)
        .bind(payload.size_unit.unwrap_or(SizeUnit::Acres))
        .bind(payload.additional_notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(farm)
    }

    pub async fn delete_farm(&self, farm_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM farms WHERE id = $1 AND owner_id = $2")
            .bind(farm_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Talhões (fields)
    // ---

    pub async fn list_fields(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
    ) -> Result<Vec<Field>, AppError> {
        let fields = sqlx::query_as::<_, Field>(
            r#"
            SELECT f.* FROM fields f
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR f.farm_id = $2)
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(fields)
    }

    pub async fn get_field(&self, field_id: Uuid, owner_id: Uuid) -> Result<Option<Field>, AppError> {
        let field = sqlx::query_as::<_, Field>(
            r#"
            SELECT f.* FROM fields f
            JOIN farms fa ON fa.id = f.farm_id
            WHERE f.id = $1 AND fa.owner_id = $2
            "#,
        )
        .bind(field_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(field)
    }

    pub async fn create_field(
        &self,
        owner_id: Uuid,
        payload: &FieldPayload,
    ) -> Result<Field, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let field = sqlx::query_as::<_, Field>(
            r#"
            INSERT INTO fields (farm_id, name, purpose, total_size, size_unit, soil_type, additional_notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(&payload.name)
        .bind(payload.purpose.as_deref())
        .bind(payload.total_size)
        .bind(payload.size_unit.unwrap_or(SizeUnit::Acres))
        .bind(payload.soil_type.as_deref())
        .bind(payload.additional_notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(field)
    }

    pub async fn update_field(
        &self,
        field_id: Uuid,
        owner_id: Uuid,
        payload: &FieldPayload,
    ) -> Result<Option<Field>, AppError> {
        let field = sqlx::query_as::<_, Field>(
            r#"
            UPDATE fields f SET
                name = $3, purpose = $4, total_size = $5, size_unit = $6,
                soil_type = $7, additional_notes = $8, updated_at = NOW()
            FROM farms fa
            WHERE f.id = $1 AND fa.id = f.farm_id AND fa.owner_id = $2
            RETURNING f.*
            "#,
        )
        .bind(field_id)
        .bind(owner_id)
        .bind(&payload.name)
        .bind(payload.purpose.as_deref())
        .bind(payload.total_size)
        .bind(payload.size_unit.unwrap_or(SizeUnit::Acres))
        .bind(payload.soil_type.as_deref())
        .bind(payload.additional_notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(field)
    }

    pub async fn delete_field(&self, field_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM fields f
            USING farms fa
            WHERE f.id = $1 AND fa.id = f.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(field_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Dados ambientais
    // ---

    pub async fn list_environmental_data(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
    ) -> Result<Vec<EnvironmentalData>, AppError> {
        let rows = sqlx::query_as::<_, EnvironmentalData>(
            r#"
            SELECT e.* FROM environmental_data e
            JOIN farms fa ON fa.id = e.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR e.farm_id = $2)
            ORDER BY e.date DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_environmental_data(
        &self,
        owner_id: Uuid,
        payload: &EnvironmentalDataPayload,
    ) -> Result<EnvironmentalData, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let row = sqlx::query_as::<_, EnvironmentalData>(
            r#"
            INSERT INTO environmental_data (
                farm_id, date, temperature, rainfall, humidity,
                soil_moisture, pest_alerts, additional_info
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, '{}'::jsonb))
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(payload.date)
        .bind(payload.temperature)
        .bind(payload.rainfall)
        .bind(payload.humidity)
        .bind(payload.soil_moisture)
        .bind(payload.pest_alerts.as_deref())
        .bind(payload.additional_info.as_ref())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
