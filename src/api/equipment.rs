//! Equipment scanning and inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::equipment::{
        BatchScanRequest, BatchScanResults, CreateEquipment, EquipmentItem, EquipmentLogDetails,
        EquipmentLogEntry, EquipmentQuery, LogQuery, ScanRequest,
    },
};

use super::{AppJson, AppQuery, AuthenticatedStaff};

/// Single scan response
#[derive(Serialize, ToSchema)]
pub struct ScanResponse {
    pub success: bool,
    pub log: EquipmentLogEntry,
    pub equipment: EquipmentItem,
    pub message: String,
}

/// Batch scan response
#[derive(Serialize, ToSchema)]
pub struct BatchScanResponse {
    pub success: bool,
    pub results: BatchScanResults,
    pub message: String,
}

/// Scan history response
#[derive(Serialize, ToSchema)]
pub struct LogsResponse {
    pub success: bool,
    pub logs: Vec<EquipmentLogDetails>,
}

/// Inventory listing response
#[derive(Serialize, ToSchema)]
pub struct EquipmentListResponse {
    pub success: bool,
    pub items: Vec<EquipmentItem>,
}

#[derive(Serialize, ToSchema)]
pub struct EquipmentResponse {
    pub success: bool,
    pub equipment: EquipmentItem,
}

/// Check out or return one item
#[utoipa::path(
    post,
    path = "/equipment/scan",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Item checked out or returned", body = ScanResponse),
        (status = 400, description = "Missing fields or item already in the requested state", body = ErrorResponse),
        (status = 404, description = "Unknown barcode", body = ErrorResponse)
    )
)]
pub async fn scan_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    AppJson(request): AppJson<ScanRequest>,
) -> AppResult<Json<ScanResponse>> {
    let outcome = state.services.equipment.scan(&request).await?;

    Ok(Json(ScanResponse {
        success: true,
        log: outcome.log,
        equipment: outcome.equipment,
        message: outcome.message,
    }))
}

/// Most recent scans, newest first
#[utoipa::path(
    get,
    path = "/equipment/scan",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(LogQuery),
    responses(
        (status = 200, description = "Recent scan history", body = LogsResponse)
    )
)]
pub async fn list_scan_logs(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    AppQuery(query): AppQuery<LogQuery>,
) -> AppResult<Json<LogsResponse>> {
    let logs = state.services.equipment.recent_logs(query.limit).await?;
    Ok(Json(LogsResponse { success: true, logs }))
}

/// Apply one action to several barcodes
#[utoipa::path(
    post,
    path = "/equipment/batch-scan",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = BatchScanRequest,
    responses(
        (status = 200, description = "Per-item outcomes", body = BatchScanResponse),
        (status = 400, description = "Empty barcode list or missing action / user name", body = ErrorResponse)
    )
)]
pub async fn batch_scan(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    AppJson(request): AppJson<BatchScanRequest>,
) -> AppResult<Json<BatchScanResponse>> {
    let outcome = state.services.equipment.batch_scan(&request).await?;

    Ok(Json(BatchScanResponse {
        success: true,
        results: outcome.results,
        message: outcome.message,
    }))
}

/// List inventory
#[utoipa::path(
    get,
    path = "/equipment/items",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = EquipmentListResponse),
        (status = 400, description = "Unknown status filter", body = ErrorResponse)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    AppQuery(query): AppQuery<EquipmentQuery>,
) -> AppResult<Json<EquipmentListResponse>> {
    let items = state.services.equipment.list(&query).await?;
    Ok(Json(EquipmentListResponse { success: true, items }))
}

/// Register a new item
#[utoipa::path(
    post,
    path = "/equipment/items",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = EquipmentResponse),
        (status = 403, description = "Admin rights required", body = ErrorResponse),
        (status = 409, description = "Barcode already registered", body = ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    AppJson(data): AppJson<CreateEquipment>,
) -> AppResult<(StatusCode, Json<EquipmentResponse>)> {
    claims.require_admin()?;
    let equipment = state.services.equipment.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        Json(EquipmentResponse {
            success: true,
            equipment,
        }),
    ))
}

/// Look up an item by barcode
#[utoipa::path(
    get,
    path = "/equipment/items/{barcode}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("barcode" = String, Path, description = "Equipment barcode")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentResponse),
        (status = 404, description = "Unknown barcode", body = ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(barcode): Path<String>,
) -> AppResult<Json<EquipmentResponse>> {
    let equipment = state.services.equipment.get_by_barcode(&barcode).await?;
    Ok(Json(EquipmentResponse {
        success: true,
        equipment,
    }))
}

/// Scan history of one item
#[utoipa::path(
    get,
    path = "/equipment/items/{barcode}/history",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("barcode" = String, Path, description = "Equipment barcode"),
        LogQuery
    ),
    responses(
        (status = 200, description = "Item scan history", body = LogsResponse),
        (status = 404, description = "Unknown barcode", body = ErrorResponse)
    )
)]
pub async fn equipment_history(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(_claims): AuthenticatedStaff,
    Path(barcode): Path<String>,
    AppQuery(query): AppQuery<LogQuery>,
) -> AppResult<Json<LogsResponse>> {
    let logs = state
        .services
        .equipment
        .item_history(&barcode, query.limit)
        .await?;
    Ok(Json(LogsResponse { success: true, logs }))
}
