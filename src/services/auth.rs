//! Staff authentication service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::staff::{StaffAccount, StaffClaims},
    repository::credentials::CredentialStore,
};

/// Issued session token
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub account: StaffAccount,
}

#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>, config: AuthConfig) -> Self {
        Self { credentials, config }
    }

    /// Verify credentials and issue a signed session token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation("Username and password are required".to_string()));
        }

        let account = self
            .credentials
            .verify(username, password)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username, "Failed login attempt");
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        let now = Utc::now().timestamp();
        let expires_in = self.config.jwt_expiration_hours as i64 * 3600;

        let claims = StaffClaims {
            sub: account.username.clone(),
            display_name: account.display_name.clone(),
            role: account.role,
            exp: now + expires_in,
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(username = %account.username, "Staff member logged in");

        Ok(Session {
            token,
            expires_in,
            account,
        })
    }
}
