//! Business logic services

pub mod auth;
pub mod equipment;

use std::sync::Arc;

use crate::{
    config::AuthConfig,
    repository::{credentials::{ConfigCredentialStore, CredentialStore}, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub equipment: equipment::EquipmentService,
}

impl Services {
    /// Create all services with the given repository and credential store
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            auth: auth::AuthService::new(credentials, auth_config),
            equipment: equipment::EquipmentService::new(repository),
        }
    }

    /// Services authenticating against the accounts listed in the configuration
    pub fn from_config(repository: Repository, auth_config: AuthConfig) -> Self {
        let credentials = Arc::new(ConfigCredentialStore::new(auth_config.accounts.clone()));
        Self::new(repository, auth_config, credentials)
    }
}
