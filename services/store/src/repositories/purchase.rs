//! Purchase repository for document store operations

use common::{DatabaseResult, DocumentStore};
use std::sync::Arc;
use tracing::info;

use crate::models::Purchase;

/// Collection holding recorded purchases
pub const PURCHASES_COLLECTION: &str = "purchases";

/// Purchase repository
#[derive(Clone)]
pub struct PurchaseRepository {
    store: Arc<dyn DocumentStore>,
}

impl PurchaseRepository {
    /// Create a new purchase repository
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Record a purchase and return its identifier
    pub async fn create(&self, purchase: &Purchase) -> DatabaseResult<String> {
        info!(
            "Recording purchase of {} line(s) for {}",
            purchase.items.len(),
            purchase.email
        );

        let document = serde_json::to_value(purchase)?;
        self.store.insert_one(PURCHASES_COLLECTION, document).await
    }
}
