// src/db/livestock_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::livestock::{
        Animal, AnimalMedicalRecord, AnimalPayload, AnimalReproductiveRecord,
        LivestockAssignmentPayload, LivestockEmployeeAssignment, LivestockExpense,
        LivestockExpensePayload, LivestockTask, LivestockTaskPayload, LivestockUnit,
        LivestockUnitPayload, MedicalRecordPayload, ReproductiveRecordPayload,
    },
};

// Rebanho: lotes, animais, tarefas, despesas e registros médicos.
// Cadeia de posse: unit -> field -> farm -> owner.
#[derive(Clone)]
pub struct LivestockRepository {
    pool: PgPool,
}

impl LivestockRepository {
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

    async fn unit_owned(&self, unit_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM livestock_units u
                JOIN fields f ON f.id = u.field_id
                JOIN farms fa ON fa.id = f.farm_id
                WHERE u.id = $1 AND fa.owner_id = $2
            )
            "#,
        )
        .bind(unit_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }

    async fn animal_owned(&self, animal_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM animals a
                JOIN livestock_units u ON u.id = a.livestock_unit_id
                JOIN fields f ON f.id = u.field_id
                JOIN farms fa ON fa.id = f.farm_id
                WHERE a.id = $1 AND fa.owner_id = $2
            )
            "#,
        )
        .bind(animal_id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(owned)
    }

    async fn task_owned(&self, task_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let owned = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM livestock_tasks t
                JOIN livestock_units u ON u.id = t.livestock_unit_id
                JOIN fields f ON f.id = u.field_id
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
    // Lotes (livestock units)
    // ---

    pub async fn list_units(
        &self,
        owner_id: Uuid,
        field_id: Option<Uuid>,
    ) -> Result<Vec<LivestockUnit>, AppError> {
        let units = sqlx::query_as::<_, LivestockUnit>(
            r#"
            SELECT u.* FROM livestock_units u
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR u.field_id = $2)
            ORDER BY u.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(field_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(units)
    }

    pub async fn get_unit(
        &self,
        unit_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<LivestockUnit>, AppError> {
        let unit = sqlx::query_as::<_, LivestockUnit>(
            r#"
            SELECT u.* FROM livestock_units u
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE u.id = $1 AND fa.owner_id = $2
            "#,
        )
        .bind(unit_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(unit)
    }

    pub async fn create_unit(
        &self,
        owner_id: Uuid,
        payload: &LivestockUnitPayload,
    ) -> Result<LivestockUnit, AppError> {
        if !self.field_owned(payload.field_id, owner_id).await? {
            return Err(AppError::NotFound("Field"));
        }
        let unit = sqlx::query_as::<_, LivestockUnit>(
            r#"
            INSERT INTO livestock_units (field_id, unit_name, animal_type, quantity, breed, additional_notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(payload.field_id)
        .bind(&payload.unit_name)
        .bind(&payload.animal_type)
        .bind(payload.quantity)
        .bind(&payload.breed)
        .bind(payload.additional_notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(unit)
    }

    pub async fn update_unit(
        &self,
        unit_id: Uuid,
        owner_id: Uuid,
        payload: &LivestockUnitPayload,
    ) -> Result<Option<LivestockUnit>, AppError> {
        let unit = sqlx::query_as::<_, LivestockUnit>(
            r#"
            UPDATE livestock_units u SET
                unit_name = $3, animal_type = $4, quantity = $5, breed = $6,
                additional_notes = $7, updated_at = NOW()
            FROM fields f
            JOIN farms fa ON fa.id = f.farm_id
            WHERE u.id = $1 AND f.id = u.field_id AND fa.owner_id = $2
            RETURNING u.*
            "#,
        )
        .bind(unit_id)
        .bind(owner_id)
        .bind(&payload.unit_name)
        .bind(&payload.animal_type)
        .bind(payload.quantity)
        .bind(&payload.breed)
        .bind(payload.additional_notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(unit)
    }

    pub async fn delete_unit(&self, unit_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM livestock_units u
            USING fields f, farms fa
            WHERE u.id = $1 AND f.id = u.field_id AND fa.id = f.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(unit_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Animais
    // ---

    pub async fn list_animals(
        &self,
        owner_id: Uuid,
        unit_id: Option<Uuid>,
    ) -> Result<Vec<Animal>, AppError> {
        let animals = sqlx::query_as::<_, Animal>(
            r#"
            SELECT a.* FROM animals a
            JOIN livestock_units u ON u.id = a.livestock_unit_id
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR a.livestock_unit_id = $2)
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(animals)
    }

    pub async fn get_animal(
        &self,
        animal_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<Animal>, AppError> {
        let animal = sqlx::query_as::<_, Animal>(
            r#"
            SELECT a.* FROM animals a
            JOIN livestock_units u ON u.id = a.livestock_unit_id
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE a.id = $1 AND fa.owner_id = $2
            "#,
        )
        .bind(animal_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(animal)
    }

    pub async fn create_animal(
        &self,
        owner_id: Uuid,
        payload: &AnimalPayload,
    ) -> Result<Animal, AppError> {
        if !self.unit_owned(payload.livestock_unit_id, owner_id).await? {
            return Err(AppError::NotFound("Livestock unit"));
        }
        let animal = sqlx::query_as::<_, Animal>(
            r#"
            INSERT INTO animals (
                livestock_unit_id, tag_id, name, sex, age_group, dob, breed, status,
                health_score, father_id, mother_id, value_estimate, additional_notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(payload.livestock_unit_id)
        .bind(&payload.tag_id)
        .bind(payload.name.as_deref())
        .bind(&payload.sex)
        .bind(&payload.age_group)
        .bind(payload.dob)
        .bind(&payload.breed)
        .bind(&payload.status)
        .bind(payload.health_score)
        .bind(payload.father_id)
        .bind(payload.mother_id)
        .bind(payload.value_estimate)
        .bind(payload.additional_notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(animal)
    }

    pub async fn update_animal(
        &self,
        animal_id: Uuid,
        owner_id: Uuid,
        payload: &AnimalPayload,
    ) -> Result<Option<Animal>, AppError> {
        let animal = sqlx::query_as::<_, Animal>(
            r#"
            UPDATE animals a SET
                tag_id = $3, name = $4, sex = $5, age_group = $6, dob = $7,
                breed = $8, status = $9, health_score = $10, father_id = $11,
                mother_id = $12, value_estimate = $13, additional_notes = $14,
                updated_at = NOW()
            FROM livestock_units u
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE a.id = $1 AND u.id = a.livestock_unit_id AND fa.owner_id = $2
            RETURNING a.*
            "#,
        )
        .bind(animal_id)
        .bind(owner_id)
        .bind(&payload.tag_id)
        .bind(payload.name.as_deref())
        .bind(&payload.sex)
        .bind(&payload.age_group)
        .bind(payload.dob)
        .bind(&payload.breed)
        .bind(&payload.status)
        .bind(payload.health_score)
        .bind(payload.father_id)
        .bind(payload.mother_id)
        .bind(payload.value_estimate)
        .bind(payload.additional_notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(animal)
    }

    pub async fn delete_animal(&self, animal_id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM animals a
            USING livestock_units u, fields f, farms fa
            WHERE a.id = $1 AND u.id = a.livestock_unit_id AND f.id = u.field_id
              AND fa.id = f.farm_id AND fa.owner_id = $2
            "#,
        )
        .bind(animal_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Registros reprodutivos
    // ---

    pub async fn list_reproductive_records(
        &self,
        owner_id: Uuid,
        animal_id: Option<Uuid>,
    ) -> Result<Vec<AnimalReproductiveRecord>, AppError> {
        let rows = sqlx::query_as::<_, AnimalReproductiveRecord>(
            r#"
            SELECT r.* FROM animal_reproductive_records r
            JOIN animals a ON a.id = r.animal_id
            JOIN livestock_units u ON u.id = a.livestock_unit_id
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR r.animal_id = $2)
            ORDER BY r.event_date DESC
            "#,
        )
        .bind(owner_id)
        .bind(animal_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_reproductive_record(
        &self,
        owner_id: Uuid,
        payload: &ReproductiveRecordPayload,
    ) -> Result<AnimalReproductiveRecord, AppError> {
        if !self.animal_owned(payload.animal_id, owner_id).await? {
            return Err(AppError::NotFound("Animal"));
        }
        let row = sqlx::query_as::<_, AnimalReproductiveRecord>(
            r#"
            INSERT INTO animal_reproductive_records (
                animal_id, sex, event_date, event_type, details, offspring_ids
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(payload.animal_id)
        .bind(&payload.sex)
        .bind(payload.event_date)
        .bind(&payload.event_type)
        .bind(payload.details.as_deref())
        .bind(payload.offspring_ids.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    // ---
    // Tarefas
    // ---

    pub async fn list_tasks(
        &self,
        owner_id: Uuid,
        unit_id: Option<Uuid>,
    ) -> Result<Vec<LivestockTask>, AppError> {
        let tasks = sqlx::query_as::<_, LivestockTask>(
            r#"
            SELECT t.* FROM livestock_tasks t
            JOIN livestock_units u ON u.id = t.livestock_unit_id
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR t.livestock_unit_id = $2)
            ORDER BY t.due_date ASC
            "#,
        )
        .bind(owner_id)
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    pub async fn create_task(
        &self,
        owner_id: Uuid,
        payload: &LivestockTaskPayload,
    ) -> Result<LivestockTask, AppError> {
        if !self.unit_owned(payload.livestock_unit_id, owner_id).await? {
            return Err(AppError::NotFound("Livestock unit"));
        }
        let task = sqlx::query_as::<_, LivestockTask>(
            r#"
            INSERT INTO livestock_tasks (
                livestock_unit_id, title, description, start_date, due_date,
                status, equipment_used, completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(payload.livestock_unit_id)
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
        payload: &LivestockTaskPayload,
    ) -> Result<Option<LivestockTask>, AppError> {
        let task = sqlx::query_as::<_, LivestockTask>(
            r#"
            UPDATE livestock_tasks t SET
                title = $3, description = $4, start_date = $5, due_date = $6,
                status = $7, equipment_used = $8, completed_at = $9
            FROM livestock_units u
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE t.id = $1 AND u.id = t.livestock_unit_id AND fa.owner_id = $2
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
            DELETE FROM livestock_tasks t
            USING livestock_units u, fields f, farms fa
            WHERE t.id = $1 AND u.id = t.livestock_unit_id AND f.id = u.field_id
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
    // Atribuições
    // ---

    pub async fn list_assignments(
        &self,
        owner_id: Uuid,
        task_id: Option<Uuid>,
    ) -> Result<Vec<LivestockEmployeeAssignment>, AppError> {
        let rows = sqlx::query_as::<_, LivestockEmployeeAssignment>(
            r#"
            SELECT a.* FROM livestock_employee_assignments a
            JOIN livestock_tasks t ON t.id = a.livestock_task_id
            JOIN livestock_units u ON u.id = t.livestock_unit_id
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR a.livestock_task_id = $2)
            ORDER BY a.assigned_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_assignment(
        &self,
        owner_id: Uuid,
        payload: &LivestockAssignmentPayload,
    ) -> Result<LivestockEmployeeAssignment, AppError> {
        if !self.task_owned(payload.livestock_task_id, owner_id).await? {
            return Err(AppError::NotFound("Livestock task"));
        }
        let row = sqlx::query_as::<_, LivestockEmployeeAssignment>(
            r#"
            INSERT INTO livestock_employee_assignments (
                livestock_task_id, employee_id, role, removed_at, ai_recommended_duration
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.livestock_task_id)
        .bind(payload.employee_id)
        .bind(&payload.role)
        .bind(payload.removed_at)
        .bind(payload.ai_recommended_duration)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    // ---
    // Despesas
    // ---

    pub async fn list_expenses(
        &self,
        owner_id: Uuid,
        unit_id: Option<Uuid>,
    ) -> Result<Vec<LivestockExpense>, AppError> {
        let rows = sqlx::query_as::<_, LivestockExpense>(
            r#"
            SELECT e.* FROM livestock_expenses e
            JOIN livestock_units u ON u.id = e.livestock_unit_id
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR e.livestock_unit_id = $2)
            ORDER BY e.incurred_on DESC
            "#,
        )
        .bind(owner_id)
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_expense(
        &self,
        owner_id: Uuid,
        payload: &LivestockExpensePayload,
    ) -> Result<LivestockExpense, AppError> {
        if !self.unit_owned(payload.livestock_unit_id, owner_id).await? {
            return Err(AppError::NotFound("Livestock unit"));
        }
        let row = sqlx::query_as::<_, LivestockExpense>(
            r#"
            INSERT INTO livestock_expenses (
                livestock_unit_id, amount, currency, category, additional_notes,
                purchased_by, incurred_on
            )
            VALUES ($1, $2, COALESCE($3, 'USD'), $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.livestock_unit_id)
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

    // ---
    // Registros médicos
    // ---

    pub async fn list_medical_records(
        &self,
        owner_id: Uuid,
        animal_id: Option<Uuid>,
    ) -> Result<Vec<AnimalMedicalRecord>, AppError> {
        let rows = sqlx::query_as::<_, AnimalMedicalRecord>(
            r#"
            SELECT m.* FROM animal_medical_records m
            JOIN animals a ON a.id = m.animal_id
            JOIN livestock_units u ON u.id = a.livestock_unit_id
            JOIN fields f ON f.id = u.field_id
            JOIN farms fa ON fa.id = f.farm_id
            WHERE fa.owner_id = $1 AND ($2::uuid IS NULL OR m.animal_id = $2)
            ORDER BY m.date DESC
            "#,
        )
        .bind(owner_id)
        .bind(animal_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_medical_record(
        &self,
        owner_id: Uuid,
        payload: &MedicalRecordPayload,
    ) -> Result<AnimalMedicalRecord, AppError> {
        if !self.animal_owned(payload.animal_id, owner_id).await? {
            return Err(AppError::NotFound("Animal"));
        }
        let row = sqlx::query_as::<_, AnimalMedicalRecord>(
            r#"
            INSERT INTO animal_medical_records (
                animal_id, livestock_unit_id, date, record_type, drug_name,
                quantity_used, next_vaccination_date, cost, additional_info
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(payload.animal_id)
        .bind(payload.livestock_unit_id)
        .bind(payload.date)
        .bind(&payload.record_type)
        .bind(payload.drug_name.as_deref())
        .bind(payload.quantity_used)
        .bind(payload.next_vaccination_date)
        .bind(payload.cost)
        .bind(payload.additional_info.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
