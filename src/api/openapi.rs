//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, equipment, health};

/// Registers the bearer token scheme referenced by the secured paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipment API",
        version = "1.0.0",
        description = "Equipment check-out / check-in REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Equipment
        equipment::scan_equipment,
        equipment::list_scan_logs,
        equipment::batch_scan,
        equipment::list_equipment,
        equipment::create_equipment,
        equipment::get_equipment,
        equipment::equipment_history,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::staff::StaffAccount,
            crate::models::staff::StaffClaims,
            crate::models::staff::StaffRole,
            // Equipment
            crate::models::equipment::EquipmentItem,
            crate::models::equipment::EquipmentLogEntry,
            crate::models::equipment::EquipmentLogDetails,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::ScanRequest,
            crate::models::equipment::BatchScanRequest,
            crate::models::equipment::BatchScanResults,
            crate::models::equipment::BatchScanSuccess,
            crate::models::equipment::BatchScanFailure,
            crate::models::enums::EquipmentStatus,
            crate::models::enums::EquipmentCategory,
            crate::models::enums::ScanAction,
            equipment::ScanResponse,
            equipment::BatchScanResponse,
            equipment::LogsResponse,
            equipment::EquipmentListResponse,
            equipment::EquipmentResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Staff authentication"),
        (name = "equipment", description = "Equipment scanning and inventory")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
