//! Item repository for document store operations

use common::{DatabaseResult, DocumentStore};
use std::sync::Arc;
use tracing::info;

use crate::models::{Item, ItemResponse};

/// Collection holding catalog items
pub const ITEMS_COLLECTION: &str = "items";

/// Item repository
#[derive(Clone)]
pub struct ItemRepository {
    store: Arc<dyn DocumentStore>,
}

impl ItemRepository {
    /// Create a new item repository
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Insert an item and return its identifier
    pub async fn create(&self, item: &Item) -> DatabaseResult<String> {
        info!("Adding item: {}", item.name);

        let document = serde_json::to_value(item)?;
        self.store.insert_one(ITEMS_COLLECTION, document).await
    }

    /// Get all items in insertion order
    pub async fn get_all(&self) -> DatabaseResult<Vec<ItemResponse>> {
        let documents = self.store.find_all(ITEMS_COLLECTION).await?;

        documents
            .into_iter()
            .map(|document| -> DatabaseResult<ItemResponse> {
                Ok(ItemResponse {
                    item: document.decode()?,
                    id: document.id,
                })
            })
            .collect()
    }
}
