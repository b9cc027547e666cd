//! User repository for document store operations

use common::{DatabaseResult, DocumentStore};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::models::User;

/// Collection holding user records
pub const USERS_COLLECTION: &str = "userInfo";

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a new user and return its identifier
    ///
    /// Callers check for an existing email first; the store does not
    /// enforce uniqueness.
    pub async fn create(&self, user: &User) -> DatabaseResult<String> {
        info!("Creating new user: {}", user.email);

        let document = serde_json::to_value(user)?;
        self.store.insert_one(USERS_COLLECTION, document).await
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let document = self
            .store
            .find_one(USERS_COLLECTION, json!({ "email": email }))
            .await?;

        document.map(|document| document.decode()).transpose()
    }

    /// Check whether an account exists for an email
    pub async fn exists_by_email(&self, email: &str) -> DatabaseResult<bool> {
        let document = self
            .store
            .find_one(USERS_COLLECTION, json!({ "email": email }))
            .await?;

        Ok(document.is_some())
    }
}
