// src/db/inventory_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{
        InventoryItem, InventoryItemPayload, ProductionRecord, ProductionRecordPayload,
    },
};

// Estoque de insumos e registros de produção, escopados pela fazenda.
#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
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

    pub async fn list_items(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
    ) -> Result<Vec<InventoryItem>, AppError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT i.* FROM inventory_items i
            JOIN farms fa ON fa.id = i.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR i.farm_id = $2)
            ORDER BY i.item_name ASC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn get_item(
        &self,
        item_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<InventoryItem>, AppError> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT i.* FROM inventory_items i
            JOIN farms fa ON fa.id = i.farm_id
            WHERE i.id = $1 AND fa.owner_id = $2
            "#,
        )
        .bind(item_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn create_item(
        &self,
        owner_id: Uuid,
        payload: &InventoryItemPayload,
    ) -> Result<InventoryItem, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            INSERT INTO inventory_items (
                farm_id, item_name, category, quantity, unit,
                reorder_threshold, supplier, last_received_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(&payload.item_name)
        .bind(&payload.category)
        .bind(payload.quantity)
        .bind(&payload.unit)
        .bind(payload.reorder_threshold)
        .bind(payload.supplier.as_deref())
        .bind(payload.last_received_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn update_item(
        &self,
        item_id: Uuid,
        owner_id: Uuid,
        payload: &InventoryItemPayload,
    ) -> Result<Option<InventoryItem>, AppError> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items i SET
                item_name = $3, category = $4, quantity = $5, unit = $6,
                reorder_threshold = $7, supplier = $8, last_received_date = $9,
                updated_at = NOW()
            FROM farms fa
            WHERE i.id = $1 AND fa.id = i.farm_id AND fa.owner_id = $2
            RETURNING i.*
            "#,
        )
        .bind(item_id)
        .bind(owner_id)
        .bind(&payload.item_name)
        .bind(&payload.category)
        .bind(payload.quantity)
        .bind(&payload.unit)
        .bind(payload.reorder_threshold)
        .bind(payload.supplier.as_deref())
        .bind(payload.last_received_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn delete_item(&self, item_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM inventory_items i
            USING farms fa
            WHERE i.id = $1 AND fa.id = i.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(item_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Registros de produção
    // ---

    pub async fn list_production_records(
        &self,
        owner_id: Uuid,
        farm_id: Option<Uuid>,
    ) -> Result<Vec<ProductionRecord>, AppError> {
        let rows = sqlx::query_as::<_, ProductionRecord>(
            r#"
            SELECT p.* FROM production_records p
            JOIN farms fa ON fa.id = p.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR p.farm_id = $2)
            ORDER BY p.date DESC
            "#,
        )
        .bind(owner_id)
        .bind(farm_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_production_record(
        &self,
        owner_id: Uuid,
        payload: &ProductionRecordPayload,
    ) -> Result<ProductionRecord, AppError> {
        if !self.farm_owned(payload.farm_id, owner_id).await? {
            return Err(AppError::NotFound("Farm"));
        }
        let row = sqlx::query_as::<_, ProductionRecord>(
            r#"
            INSERT INTO production_records (
                farm_id, crop_id, animal_id, livestock_unit_id, date,
                item_type, quantity, unit, value_estimate, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(payload.farm_id)
        .bind(payload.crop_id)
        .bind(payload.animal_id)
        .bind(payload.livestock_unit_id)
        .bind(payload.date)
        .bind(&payload.item_type)
        .bind(payload.quantity)
        .bind(&payload.unit)
        .bind(payload.value_estimate)
        .bind(payload.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_production_record(
        &self,
        record_id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM production_records p
            USING farms fa
            WHERE p.id = $1 AND fa.id = p.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(record_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
