//! Repository layer for equipment and scan log storage

pub mod credentials;
pub mod equipment;
pub mod equipment_logs;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        equipment::{CreateEquipment, EquipmentItem, EquipmentLogDetails, EquipmentLogEntry, Transition},
        EquipmentStatus,
    },
};

/// Storage for equipment records
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    async fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<EquipmentItem>>;

    /// List equipment ordered by name, optionally filtered by status
    async fn list(&self, status: Option<EquipmentStatus>) -> AppResult<Vec<EquipmentItem>>;

    /// Insert a new item. Fails with [`AppError::Duplicate`](crate::error::AppError::Duplicate)
    /// when the barcode is already registered.
    async fn insert(&self, data: &CreateEquipment) -> AppResult<EquipmentItem>;

    /// Apply a status flip and append its log row as one atomic unit.
    ///
    /// The update only applies while the stored status equals
    /// `transition.expected_status`; otherwise nothing is written and `None`
    /// is returned.
    async fn transition(
        &self,
        transition: &Transition,
    ) -> AppResult<Option<(EquipmentItem, EquipmentLogEntry)>>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Read side of the append-only scan log
#[async_trait]
pub trait AuditLogStore: Send + Sync {
    /// Most recent entries, newest first
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<EquipmentLogDetails>>;

    /// Most recent entries for one item, newest first
    async fn list_for_equipment(&self, equipment_id: Uuid, limit: i64) -> AppResult<Vec<EquipmentLogDetails>>;
}

/// Main repository struct holding the stores used by the services
#[derive(Clone)]
pub struct Repository {
    pub equipment: Arc<dyn EquipmentStore>,
    pub logs: Arc<dyn AuditLogStore>,
}

impl Repository {
    /// Create a PostgreSQL-backed repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: Arc::new(equipment::EquipmentRepository::new(pool.clone())),
            logs: Arc::new(equipment_logs::EquipmentLogsRepository::new(pool)),
        }
    }

    /// Create a repository that keeps everything in process memory
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::default();
        Self::from_stores(Arc::new(store.clone()), Arc::new(store))
    }

    pub fn from_stores(equipment: Arc<dyn EquipmentStore>, logs: Arc<dyn AuditLogStore>) -> Self {
        Self { equipment, logs }
    }
}
