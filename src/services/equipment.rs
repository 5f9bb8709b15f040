//! Equipment scanning service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        equipment::{
            BatchScanFailure, BatchScanOutcome, BatchScanRequest, BatchScanResults, BatchScanSuccess,
            CreateEquipment, EquipmentItem, EquipmentLogDetails, EquipmentQuery, ScanOutcome,
            ScanRequest, Transition,
        },
        EquipmentStatus, ScanAction,
    },
    repository::Repository,
};

pub const DEFAULT_LOG_LIMIT: i64 = 50;
pub const MAX_LOG_LIMIT: i64 = 500;

/// Trimmed, non-empty value of a required request field
fn required(value: Option<&str>, field: &str) -> AppResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn parse_action(value: Option<&str>) -> AppResult<ScanAction> {
    required(value, "Action")?
        .parse()
        .map_err(AppError::Validation)
}

pub fn clamp_log_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LOG_LIMIT).clamp(1, MAX_LOG_LIMIT)
}

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Check out or return a single item
    pub async fn scan(&self, request: &ScanRequest) -> AppResult<ScanOutcome> {
        let barcode = required(request.barcode.as_deref(), "Barcode")?;
        let action = parse_action(request.action.as_deref())?;
        let user_name = required(request.user_name.as_deref(), "User name")?;

        self.process(&barcode, action, &user_name).await
    }

    /// Apply the same action to every barcode, collecting per-item outcomes.
    /// A failing barcode never stops the ones after it.
    pub async fn batch_scan(&self, request: &BatchScanRequest) -> AppResult<BatchScanOutcome> {
        if request.barcodes.is_empty() {
            return Err(AppError::Validation("At least one barcode is required".to_string()));
        }
        let action = parse_action(request.action.as_deref())?;
        let user_name = required(request.user_name.as_deref(), "User name")?;

        let mut results = BatchScanResults::default();

        for raw in &request.barcodes {
            let barcode = raw.trim();
            let outcome = if barcode.is_empty() {
                Err(AppError::Validation("Barcode is required".to_string()))
            } else {
                self.process(barcode, action, &user_name).await
            };

            match outcome {
                Ok(outcome) => results.success.push(BatchScanSuccess {
                    barcode: outcome.equipment.barcode,
                    name: outcome.equipment.name,
                    category: outcome.equipment.category,
                    status: outcome.equipment.status,
                }),
                Err(e) => {
                    tracing::warn!(barcode, action = %action, error = %e, "Batch scan item failed");
                    results.failed.push(BatchScanFailure {
                        barcode: barcode.to_string(),
                        reason: e.user_message(),
                    });
                }
            }
        }

        let message = format!(
            "{} item(s) processed successfully, {} failed",
            results.success.len(),
            results.failed.len()
        );
        tracing::info!(
            action = %action,
            user = %user_name,
            succeeded = results.success.len(),
            failed = results.failed.len(),
            "Batch scan completed"
        );

        Ok(BatchScanOutcome { results, message })
    }

    async fn process(&self, barcode: &str, action: ScanAction, user_name: &str) -> AppResult<ScanOutcome> {
        let item = self
            .repository
            .equipment
            .find_by_barcode(barcode)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment with barcode {} not found", barcode)))?;

        if item.status != action.required_status() {
            return Err(AppError::Conflict(match action {
                ScanAction::Checkout => "Equipment is already checked out".to_string(),
                ScanAction::Return => "Equipment is already available".to_string(),
            }));
        }

        let transition = Transition {
            equipment_id: item.id,
            barcode: item.barcode.clone(),
            action,
            expected_status: item.status,
            user_name: user_name.to_string(),
            at: Utc::now(),
        };

        let (equipment, log) = self
            .repository
            .equipment
            .transition(&transition)
            .await?
            .ok_or_else(|| {
                AppError::Conflict(format!(
                    "Equipment {} was changed by another scan, please retry",
                    barcode
                ))
            })?;

        tracing::info!(barcode, action = %action, user = user_name, "Equipment scanned");

        let message = match action {
            ScanAction::Checkout => format!("{} checked out to {}", equipment.name, user_name),
            ScanAction::Return => format!("{} returned by {}", equipment.name, user_name),
        };

        Ok(ScanOutcome { equipment, log, message })
    }

    /// List inventory, optionally filtered by status
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentItem>> {
        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(s.parse::<EquipmentStatus>().map_err(AppError::Validation)?),
        };
        self.repository.equipment.list(status).await
    }

    pub async fn get_by_barcode(&self, barcode: &str) -> AppResult<EquipmentItem> {
        let barcode = barcode.trim();
        self.repository
            .equipment
            .find_by_barcode(barcode)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment with barcode {} not found", barcode)))
    }

    /// Register a new item; it starts out available
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<EquipmentItem> {
        let data = CreateEquipment {
            name: data.name.trim().to_string(),
            barcode: data.barcode.trim().to_string(),
            category: data.category,
        };
        data.validate()?;

        let item = self.repository.equipment.insert(&data).await?;
        tracing::info!(barcode = %item.barcode, name = %item.name, "Equipment registered");
        Ok(item)
    }

    /// Most recent scans across all equipment, newest first
    pub async fn recent_logs(&self, limit: Option<i64>) -> AppResult<Vec<EquipmentLogDetails>> {
        self.repository.logs.list_recent(clamp_log_limit(limit)).await
    }

    /// Scan history of one item, newest first
    pub async fn item_history(&self, barcode: &str, limit: Option<i64>) -> AppResult<Vec<EquipmentLogDetails>> {
        let item = self.get_by_barcode(barcode).await?;
        self.repository
            .logs
            .list_for_equipment(item.id, clamp_log_limit(limit))
            .await
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repository.equipment.ping().await
    }
}
