//! Equipment repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::EquipmentStore;
use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, EquipmentItem, EquipmentLogEntry, Transition},
        EquipmentStatus,
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentStore for EquipmentRepository {
    async fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<EquipmentItem>> {
        let row = sqlx::query_as::<_, EquipmentItem>("SELECT * FROM equipment WHERE barcode = $1")
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, status: Option<EquipmentStatus>) -> AppResult<Vec<EquipmentItem>> {
        let rows = sqlx::query_as::<_, EquipmentItem>(
            r#"
            SELECT * FROM equipment
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY name, barcode
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, data: &CreateEquipment) -> AppResult<EquipmentItem> {
        sqlx::query_as::<_, EquipmentItem>(
            r#"
            INSERT INTO equipment (name, barcode, category)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.barcode)
        .bind(data.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Duplicate(format!("Barcode {} is already registered", data.barcode))
            }
            other => AppError::Database(other),
        })
    }

    async fn transition(
        &self,
        transition: &Transition,
    ) -> AppResult<Option<(EquipmentItem, EquipmentLogEntry)>> {
        let mut tx = self.pool.begin().await?;

        // Conditional on the status read by the caller; a concurrent writer makes this a no-op
        let updated = sqlx::query_as::<_, EquipmentItem>(
            r#"
            UPDATE equipment
            SET status = $1, checked_out_by = $2, checked_out_at = $3, updated_at = $4
            WHERE id = $5 AND status = $6
            RETURNING *
            "#,
        )
        .bind(transition.new_status())
        .bind(transition.holder())
        .bind(transition.holder_since())
        .bind(transition.at)
        .bind(transition.equipment_id)
        .bind(transition.expected_status)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(equipment) = updated else {
            tx.rollback().await?;
            return Ok(None);
        };

        let log = sqlx::query_as::<_, EquipmentLogEntry>(
            r#"
            INSERT INTO equipment_logs (equipment_id, barcode, action, user_name, timestamp)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(equipment.id)
        .bind(&transition.barcode)
        .bind(transition.action)
        .bind(&transition.user_name)
        .bind(transition.at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some((equipment, log)))
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
