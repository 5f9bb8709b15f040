//! Staff credential lookup

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::{
    config::StaffAccountConfig,
    error::{AppError, AppResult},
    models::staff::StaffAccount,
};

/// Verifies staff credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the account when the password matches, `None` otherwise
    async fn verify(&self, username: &str, password: &str) -> AppResult<Option<StaffAccount>>;
}

/// Hash a password into an argon2 PHC string
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Accounts declared under `[[auth.accounts]]` in the configuration
#[derive(Clone, Default)]
pub struct ConfigCredentialStore {
    accounts: Vec<StaffAccountConfig>,
}

impl ConfigCredentialStore {
    pub fn new(accounts: Vec<StaffAccountConfig>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl CredentialStore for ConfigCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> AppResult<Option<StaffAccount>> {
        let Some(account) = self.accounts.iter().find(|a| a.username == username) else {
            return Ok(None);
        };

        let parsed = PasswordHash::new(&account.password_hash).map_err(|e| {
            AppError::Internal(format!("Invalid password hash for account {}: {}", username, e))
        })?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            return Ok(None);
        }

        Ok(Some(StaffAccount {
            username: account.username.clone(),
            display_name: account
                .display_name
                .clone()
                .unwrap_or_else(|| account.username.clone()),
            role: account.role,
        }))
    }
}
