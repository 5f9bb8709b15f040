//! Authentication endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppResult, ErrorResponse},
    models::staff::{StaffAccount, StaffClaims},
};

use super::{AppJson, AuthenticatedStaff};

/// Login request
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response with the session token
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: StaffAccount,
}

/// Log in and obtain a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in,
        user: session.account,
    }))
}

/// Current session
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Claims of the current token", body = StaffClaims),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn me(AuthenticatedStaff(claims): AuthenticatedStaff) -> Json<StaffClaims> {
    Json(claims)
}
