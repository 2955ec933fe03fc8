// src/db/crops_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crops::{
        Crop, CropAssignmentPayload, CropEmployeeAssignment, CropExpense, CropExpensePayload,
        CropPayload, CropTask, CropTaskPayload,
    },
};

// Culturas e seus filhos (tarefas, atribuições, despesas).
// A posse é verificada via crop -> field -> farm -> owner.
#[derive(Clone)]
pub struct CropRepository {
    pool: PgPool,
}

impl CropRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn field_owned(&self, field_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM fields f
                JOIN farms fa ON fa.id = f.farm_id
                WHERE f.id = $1 AND fa.owner_id = $2
            )
            "#,
        )
        .bind(field_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }

    async fn crop_owned(&self, crop_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM crops c
                JOIN fields f ON f.id = c.field_id
                JOIN farms fa ON fa.id = f.farm_id
                WHERE c.id = $1 AND fa.owner_id = $2
            )
            "#,
        )
        .bind(crop_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }

    async fn task_owned(&self, task_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM crop_tasks t
                JOIN crops c ON c.id = t.crop_id
                JOIN fields f ON f.id = c.field_id
                JOIN farms fa ON fa.id = f.farm_id
                WHERE t.id = $1 AND fa.owner_id = $2
            )
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }

    // ---
    // Culturas
    // ---

    pub async fn list_crops(
        &self,
        owner_id: Uuid,
        field_id: Option<Uuid>,
    ) -> Result<Vec<Crop>, AppError> {
        let crops = sqlx::query_as::<_, Crop>(
            r#"
            SELECT c.* FROM crops c
            JOIN fields f ON f.id = c.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR c.field_id = $2)
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(field_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(crops)
    }

    pub async fn get_crop(&self, crop_id: Uuid, owner_id: Uuid) -> Result<Option<Crop>, AppError> {
        let crop = sqlx::query_as::<_, Crop>(
            r#"
            SELECT c.* FROM crops c
            JOIN fields f ON f.id = c.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE c.id = $1 AND fa.owner_id = $2
            "#,
        )
        .bind(crop_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(crop)
    }

    pub async fn create_crop(&self, owner_id: Uuid, payload: &CropPayload) -> Result<Crop, AppError> {
        if !self.field_owned(payload.field_id, owner_id).await? {
            return Err(AppError::NotFound("Field"));
        }
        let crop = sqlx::query_as::<_, Crop>(
            r#"
            INSERT INTO crops (
                field_id, name, variety, seed_source, planting_month_year,
                expected_harvest_month_year, status, yield_estimate, yield_unit,
                value_estimate, additional_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(payload.field_id)
        .bind(&payload.name)
        .bind(&payload.variety)
        .bind(&payload.seed_source)
        .bind(&payload.planting_month_year)
        .bind(&payload.expected_harvest_month_year)
        .bind(&payload.status)
        .bind(payload.yield_estimate)
        .bind(payload.yield_unit.as_deref())
        .bind(payload.value_estimate)
        .bind(payload.additional_notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(crop)
    }

    pub async fn update_crop(
        &self,
        crop_id: Uuid,
        owner_id: Uuid,
        payload: &CropPayload,
    ) -> Result<Option<Crop>, AppError> {
        let crop = sqlx::query_as::<_, Crop>(
            r#"
            UPDATE crops c SET
                name = $3, variety = $4, seed_source = $5, planting_month_year = $6,
                expected_harvest_month_year = $7, status = $8, yield_estimate = $9,
                yield_unit = $10, value_estimate = $11, additional_notes = $12,
                updated_at = NOW()
            FROM fields f
            JOIN farms fa ON fa.id = f.farm_id
            WHERE c.id = $1 AND f.id = c.field_id AND fa.owner_id = $2
            RETURNING c.*
            "#,
        )
        .bind(crop_id)
        .bind(owner_id)
        .bind(&payload.name)
        .bind(&payload.variety)
        .bind(&payload.seed_source)
        .bind(&payload.planting_month_year)
        .bind(&payload.expected_harvest_month_year)
        .bind(&payload.status)
        .bind(payload.yield_estimate)
        .bind(payload.yield_unit.as_deref())
        .bind(payload.value_estimate)
        .bind(payload.additional_notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(crop)
    }

    pub async fn delete_crop(&self, crop_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM crops c
            USING fields f, farms fa
            WHERE c.id = $1 AND f.id = c.field_id AND fa.id = f.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(crop_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Tarefas
    // ---

    pub async fn list_tasks(
        &self,
        owner_id: Uuid,
        crop_id: Option<Uuid>,
    ) -> Result<Vec<CropTask>, AppError> {
        let tasks = sqlx::query_as::<_, CropTask>(
            r#"
            SELECT t.* FROM crop_tasks t
            JOIN crops c ON c.id = t.crop_id
            JOIN fields f ON f.id = c.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR t.crop_id = $2)
            ORDER BY t.due_date ASC
            "#,
        )
        .bind(owner_id)
        .bind(crop_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn create_task(
        &self,
        owner_id: Uuid,
        payload: &CropTaskPayload,
    ) -> Result<CropTask, AppError> {
        if !self.crop_owned(payload.crop_id, owner_id).await? {
            return Err(AppError::NotFound("Crop"));
        }
        let task = sqlx::query_as::<_, CropTask>(
            r#"
            INSERT INTO crop_tasks (
                crop_id, title, description, start_date, due_date,
                status, equipment_used, completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(payload.crop_id)
        .bind(&payload.title)
        .bind(payload.description.as_deref())
        .bind(payload.start_date)
        .bind(payload.due_date)
        .bind(&payload.status)
        .bind(payload.equipment_used.as_deref())
        .bind(payload.completed_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(task)
    }

    pub async fn update_task(
        &self,
        task_id: Uuid,
        owner_id: Uuid,
        payload: &CropTaskPayload,
    ) -> Result<Option<CropTask>, AppError> {
        let task = sqlx::query_as::<_, CropTask>(
            r#"
            UPDATE crop_tasks t SET
                title = $3, description = $4, start_date = $5, due_date = $6,
                status = $7, equipment_used = $8, completed_at = $9
            FROM crops c
            JOIN fields f ON f.id = c.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE t.id = $1 AND c.id = t.crop_id AND fa.owner_id = $2
            RETURNING t.*
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .bind(&payload.title)
        .bind(payload.description.as_deref())
        .bind(payload.start_date)
        .bind(payload.due_date)
        .bind(&payload.status)
        .bind(payload.equipment_used.as_deref())
        .bind(payload.completed_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    pub async fn delete_task(&self, task_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM crop_tasks t
            USING crops c, fields f, farms fa
            WHERE t.id = $1 AND c.id = t.crop_id AND f.id = c.field_id
              AND fa.id = f.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Atribuições de funcionários
    // ---

    pub async fn list_assignments(
        &self,
        owner_id: Uuid,
        crop_task_id: Option<Uuid>,
    ) -> Result<Vec<CropEmployeeAssignment>, AppError> {
        let rows = sqlx::query_as::<_, CropEmployeeAssignment>(
            r#"
            SELECT a.* FROM crop_employee_assignments a
            JOIN crop_tasks t ON t.id = a.crop_task_id
            JOIN crops c ON c.id = t.crop_id
            JOIN fields f ON f.id = c.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR a.crop_task_id = $2)
            ORDER BY a.assigned_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(crop_task_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_assignment(
        &self,
        owner_id: Uuid,
        payload: &CropAssignmentPayload,
    ) -> Result<CropEmployeeAssignment, AppError> {
        if !self.task_owned(payload.crop_task_id, owner_id).await? {
            return Err(AppError::NotFound("Crop task"));
        }
        let row = sqlx::query_as::<_, CropEmployeeAssignment>(
            r#"
            INSERT INTO crop_employee_assignments (
                crop_task_id, employee_id, role, removed_at, ai_recommended_duration
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.crop_task_id)
        .bind(payload.employee_id)
        .bind(&payload.role)
        .bind(payload.removed_at)
        .bind(payload.ai_recommended_duration)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_assignment(
        &self,
        assignment_id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM crop_employee_assignments a
            USING crop_tasks t, crops c, fields f, farms fa
            WHERE a.id = $1 AND t.id = a.crop_task_id AND c.id = t.crop_id
              AND f.id = c.field_id AND fa.id = f.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(assignment_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Despesas
    // ---

    pub async fn list_expenses(
        &self,
        owner_id: Uuid,
        crop_id: Option<Uuid>,
    ) -> Result<Vec<CropExpense>, AppError> {
        let rows = sqlx::query_as::<_, CropExpense>(
            r#"
            SELECT e.* FROM crop_expenses e
            JOIN crops c ON c.id = e.crop_id
            JOIN fields f ON f.id = c.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR e.crop_id = $2)
            ORDER BY e.incurred_on DESC
            "#,
        )
        .bind(owner_id)
        .bind(crop_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_expense(
        &self,
        owner_id: Uuid,
        payload: &CropExpensePayload,
    ) -> Result<CropExpense, AppError> {
        if !self.crop_owned(payload.crop_id, owner_id).await? {
            return Err(AppError::NotFound("Crop"));
        }
        let row = sqlx::query_as::<_, CropExpense>(
            r#"
            INSERT INTO crop_expenses (
                crop_id, amount, currency, category, additional_notes,
                purchased_by, incurred_on
            )
            VALUES ($1, $2, COALESCE($3, 'USD'), $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.crop_id)
        .bind(payload.amount)
        .bind(payload.currency.as_deref())
        .bind(&payload.category)
        .bind(payload.additional_notes.as_deref())
        .bind(payload.purchased_by)
        .bind(payload.incurred_on)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn delete_expense(&self, expense_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM crop_expenses e
            USING crops c, fields f, farms fa
            WHERE e.id = $1 AND c.id = e.crop_id AND f.id = c.field_id
              AND fa.id = f.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(expense_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
