//! Application state shared across handlers

use common::DocumentStore;
use std::sync::Arc;

use crate::{
    catalog::CatalogService,
    credentials::CredentialService,
    jwt::JwtService,
    password::PasswordHasher,
    repositories::{ItemRepository, PurchaseRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialService,
    pub catalog: CatalogService,
}

impl AppState {
    /// Wire the services over a document store
    pub fn new(
        store: Arc<dyn DocumentStore>,
        jwt_service: JwtService,
        passwords: PasswordHasher,
    ) -> anyhow::Result<Self> {
        let credentials =
            CredentialService::new(UserRepository::new(store.clone()), jwt_service, passwords)?;
        let catalog = CatalogService::new(
            ItemRepository::new(store.clone()),
            PurchaseRepository::new(store),
        );

        Ok(Self {
            credentials,
            catalog,
        })
    }
}
