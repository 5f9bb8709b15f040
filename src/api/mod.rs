//! API handlers for the equipment REST endpoints

pub mod auth;
pub mod equipment;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
    routing::get,
    routing::post,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::staff::StaffClaims, AppState};

/// Extractor for the authenticated staff member from the bearer token
pub struct AuthenticatedStaff(pub StaffClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedStaff {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = StaffClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedStaff(claims))
    }
}

/// JSON body extractor whose rejections are reported as validation errors
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string extractor whose rejections use the same error body
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Scanning
        .route(
            "/equipment/scan",
            post(equipment::scan_equipment).get(equipment::list_scan_logs),
        )
        .route("/equipment/batch-scan", post(equipment::batch_scan))
        // Inventory
        .route(
            "/equipment/items",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route("/equipment/items/:barcode", get(equipment::get_equipment))
        .route("/equipment/items/:barcode/history", get(equipment::equipment_history))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
