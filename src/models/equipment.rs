//! Equipment model and scan log types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::{EquipmentCategory, EquipmentStatus, ScanAction};

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentItem {
    pub id: Uuid,
    /// Human readable label
    pub name: String,
    /// Unique scannable code, the external lookup key
    pub barcode: String,
    pub category: EquipmentCategory,
    pub status: EquipmentStatus,
    /// Holder name, set only while checked out
    pub checked_out_by: Option<String>,
    /// Set only while checked out
    pub checked_out_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EquipmentItem {
    /// Holder fields are present iff the item is checked out
    pub fn holder_fields_consistent(&self) -> bool {
        match self.status {
            EquipmentStatus::CheckedOut => {
                self.checked_out_by.is_some() && self.checked_out_at.is_some()
            }
            EquipmentStatus::Available => {
                self.checked_out_by.is_none() && self.checked_out_at.is_none()
            }
        }
    }
}

/// One row of the append-only scan log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentLogEntry {
    pub id: Uuid,
    pub equipment_id: Uuid,
    /// Barcode of the item at the time of the scan
    pub barcode: String,
    pub action: ScanAction,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Log entry joined with the item it refers to
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentLogDetails {
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub barcode: String,
    pub action: ScanAction,
    pub user_name: String,
    pub timestamp: DateTime<Utc>,
    pub equipment_name: Option<String>,
    pub equipment_category: Option<EquipmentCategory>,
}

/// A status flip to apply atomically together with its log row
#[derive(Debug, Clone)]
pub struct Transition {
    pub equipment_id: Uuid,
    pub barcode: String,
    pub action: ScanAction,
    /// Status the stored row must still have for the write to apply
    pub expected_status: EquipmentStatus,
    pub user_name: String,
    pub at: DateTime<Utc>,
}

impl Transition {
    pub fn new_status(&self) -> EquipmentStatus {
        self.action.resulting_status()
    }

    /// Holder to store on the item after the transition
    pub fn holder(&self) -> Option<&str> {
        match self.action {
            ScanAction::Checkout => Some(self.user_name.as_str()),
            ScanAction::Return => None,
        }
    }

    pub fn holder_since(&self) -> Option<DateTime<Utc>> {
        match self.action {
            ScanAction::Checkout => Some(self.at),
            ScanAction::Return => None,
        }
    }
}

/// Create equipment request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 64, message = "Barcode must be between 1 and 64 characters"))]
    pub barcode: String,
    #[serde(default)]
    pub category: EquipmentCategory,
}

/// Query parameters for the inventory listing
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Filter by status (`available` or `checked_out`)
    pub status: Option<String>,
}

/// Query parameters for log listings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LogQuery {
    /// Number of entries to return (default 50, max 500)
    pub limit: Option<i64>,
}

/// Single scan request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ScanRequest {
    pub barcode: Option<String>,
    /// `checkout` or `return`
    pub action: Option<String>,
    #[serde(rename = "userName", alias = "user_name")]
    pub user_name: Option<String>,
}

/// Batch scan request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BatchScanRequest {
    #[serde(default)]
    pub barcodes: Vec<String>,
    /// `checkout` or `return`
    pub action: Option<String>,
    #[serde(rename = "userName", alias = "user_name")]
    pub user_name: Option<String>,
}

/// Result of a successful single scan
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub equipment: EquipmentItem,
    pub log: EquipmentLogEntry,
    pub message: String,
}

/// An item processed successfully during a batch scan
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchScanSuccess {
    pub barcode: String,
    pub name: String,
    pub category: EquipmentCategory,
    pub status: EquipmentStatus,
}

/// A barcode that could not be processed during a batch scan
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchScanFailure {
    pub barcode: String,
    pub reason: String,
}

/// Per-item outcomes of a batch scan, in input order
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BatchScanResults {
    pub success: Vec<BatchScanSuccess>,
    pub failed: Vec<BatchScanFailure>,
}

#[derive(Debug, Clone)]
pub struct BatchScanOutcome {
    pub results: BatchScanResults,
    pub message: String,
}
