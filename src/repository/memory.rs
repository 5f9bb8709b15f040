//! In-process store used for tests and database-less demo runs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AuditLogStore, EquipmentStore};
use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{CreateEquipment, EquipmentItem, EquipmentLogDetails, EquipmentLogEntry, Transition},
        EquipmentStatus,
    },
};

#[derive(Default)]
struct MemoryState {
    items: Vec<EquipmentItem>,
    /// Append order, oldest first
    logs: Vec<EquipmentLogEntry>,
}

impl MemoryState {
    fn details(&self, log: &EquipmentLogEntry) -> EquipmentLogDetails {
        let item = self.items.iter().find(|i| i.id == log.equipment_id);
        EquipmentLogDetails {
            id: log.id,
            equipment_id: log.equipment_id,
            barcode: log.barcode.clone(),
            action: log.action,
            user_name: log.user_name.clone(),
            timestamp: log.timestamp,
            equipment_name: item.map(|i| i.name.clone()),
            equipment_category: item.map(|i| i.category),
        }
    }
}

/// Equipment and scan log kept behind one lock, so a transition's
/// compare, update and append happen as a single step
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

#[async_trait]
impl EquipmentStore for MemoryStore {
    async fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<EquipmentItem>> {
        let state = self.state.read().await;
        Ok(state.items.iter().find(|i| i.barcode == barcode).cloned())
    }

    async fn list(&self, status: Option<EquipmentStatus>) -> AppResult<Vec<EquipmentItem>> {
        let state = self.state.read().await;
        let mut items: Vec<EquipmentItem> = state
            .items
            .iter()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.barcode.cmp(&b.barcode)));
        Ok(items)
    }

    async fn insert(&self, data: &CreateEquipment) -> AppResult<EquipmentItem> {
        let mut state = self.state.write().await;
        if state.items.iter().any(|i| i.barcode == data.barcode) {
            return Err(AppError::Duplicate(format!(
                "Barcode {} is already registered",
                data.barcode
            )));
        }

        let now = Utc::now();
        let item = EquipmentItem {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            barcode: data.barcode.clone(),
            category: data.category,
            status: EquipmentStatus::Available,
            checked_out_by: None,
            checked_out_at: None,
            created_at: now,
            updated_at: now,
        };
        state.items.push(item.clone());
        Ok(item)
    }

    async fn transition(
        &self,
        transition: &Transition,
    ) -> AppResult<Option<(EquipmentItem, EquipmentLogEntry)>> {
        let mut state = self.state.write().await;

        let Some(item) = state
            .items
            .iter_mut()
            .find(|i| i.id == transition.equipment_id && i.status == transition.expected_status)
        else {
            return Ok(None);
        };

        item.status = transition.new_status();
        item.checked_out_by = transition.holder().map(str::to_string);
        item.checked_out_at = transition.holder_since();
        item.updated_at = transition.at;
        let item = item.clone();

        let log = EquipmentLogEntry {
            id: Uuid::new_v4(),
            equipment_id: item.id,
            barcode: transition.barcode.clone(),
            action: transition.action,
            user_name: transition.user_name.clone(),
            timestamp: transition.at,
        };
        state.logs.push(log.clone());

        Ok(Some((item, log)))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl AuditLogStore for MemoryStore {
    async fn list_recent(&self, limit: i64) -> AppResult<Vec<EquipmentLogDetails>> {
        let state = self.state.read().await;
        Ok(state
            .logs
            .iter()
            .rev()
            .take(clamp_limit(limit))
            .map(|log| state.details(log))
            .collect())
    }

    async fn list_for_equipment(&self, equipment_id: Uuid, limit: i64) -> AppResult<Vec<EquipmentLogDetails>> {
        let state = self.state.read().await;
        Ok(state
            .logs
            .iter()
            .rev()
            .filter(|log| log.equipment_id == equipment_id)
            .take(clamp_limit(limit))
            .map(|log| state.details(log))
            .collect())
    }
}
