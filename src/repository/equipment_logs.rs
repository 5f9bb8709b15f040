//! Scan log repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::AuditLogStore;
use crate::{error::AppResult, models::equipment::EquipmentLogDetails};

/// Items are never deleted, but the log has no foreign key, so the join stays a LEFT JOIN
const SELECT_DETAILS: &str = r#"
    SELECT l.id, l.equipment_id, l.barcode, l.action, l.user_name, l.timestamp,
           e.name AS equipment_name, e.category AS equipment_category
    FROM equipment_logs l
    LEFT JOIN equipment e ON e.id = l.equipment_id
"#;

#[derive(Clone)]
pub struct EquipmentLogsRepository {
    pool: Pool<Postgres>,
}

impl EquipmentLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogStore for EquipmentLogsRepository {
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<EquipmentLogDetails>> {
        let query = format!("{} ORDER BY l.timestamp DESC LIMIT $1", SELECT_DETAILS);
        let rows = sqlx::query_as::<_, EquipmentLogDetails>(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_for_equipment(&self, equipment_id: Uuid, limit: i64) -> AppResult<Vec<EquipmentLogDetails>> {
        let query = format!(
            "{} WHERE l.equipment_id = $1 ORDER BY l.timestamp DESC LIMIT $2",
            SELECT_DETAILS
        );
        let rows = sqlx::query_as::<_, EquipmentLogDetails>(&query)
            .bind(equipment_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
