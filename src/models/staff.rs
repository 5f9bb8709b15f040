//! Staff accounts and session claims

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Staff roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    #[default]
    Staff,
    Admin,
}

/// A verified staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StaffAccount {
    pub username: String,
    pub display_name: String,
    pub role: StaffRole,
}

/// JWT claims carried by every authenticated request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffClaims {
    pub sub: String,
    pub display_name: String,
    pub role: StaffRole,
    pub exp: i64,
    pub iat: i64,
}

impl StaffClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == StaffRole::Admin
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Admin rights required".to_string()))
        }
    }
}
