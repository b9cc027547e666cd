//! Catalog and purchase service
//!
//! Items and purchases are inserted as received once their fields pass
//! validation. Purchases are not checked against the catalog: no stock is
//! reserved or decremented and the total is not recomputed.

use common::DatabaseError;
use thiserror::Error;

use crate::{
    models::{Item, ItemResponse, Purchase},
    repositories::{ItemRepository, PurchaseRepository},
    validation,
};

/// Errors returned by the catalog service
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A field failed validation; the message is safe to show to clients
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Catalog service
#[derive(Clone)]
pub struct CatalogService {
    items: ItemRepository,
    purchases: PurchaseRepository,
}

impl CatalogService {
    /// Create a new catalog service
    pub fn new(items: ItemRepository, purchases: PurchaseRepository) -> Self {
        Self { items, purchases }
    }

    /// List every item in insertion order
    pub async fn list_items(&self) -> Result<Vec<ItemResponse>, CatalogError> {
        Ok(self.items.get_all().await?)
    }

    /// Add an item to the catalog, returning its identifier
    pub async fn add_item(&self, item: Item) -> Result<String, CatalogError> {
        validation::validate_name(&item.name).map_err(CatalogError::Invalid)?;
        validation::validate_price("Price", item.price).map_err(CatalogError::Invalid)?;
        validation::validate_quantity(item.quantity).map_err(CatalogError::Invalid)?;

        Ok(self.items.create(&item).await?)
    }

    /// Record a purchase, returning its identifier
    pub async fn record_purchase(&self, mut purchase: Purchase) -> Result<String, CatalogError> {
        purchase.email = purchase.email.trim().to_lowercase();
        validation::validate_email(&purchase.email).map_err(CatalogError::Invalid)?;
        validation::validate_price("Total price", purchase.total_price)
            .map_err(CatalogError::Invalid)?;
        for line in &purchase.items {
            validation::validate_name(&line.name).map_err(CatalogError::Invalid)?;
            validation::validate_quantity(line.quantity).map_err(CatalogError::Invalid)?;
        }

        Ok(self.purchases.create(&purchase).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::PurchaseItem,
        repositories::{item::ITEMS_COLLECTION, purchase::PURCHASES_COLLECTION},
    };
    use common::MemoryDocumentStore;
    use std::sync::Arc;

    fn service() -> (CatalogService, MemoryDocumentStore) {
        let store = MemoryDocumentStore::new();
        let shared: Arc<dyn common::DocumentStore> = Arc::new(store.clone());
        let service = CatalogService::new(
            ItemRepository::new(shared.clone()),
            PurchaseRepository::new(shared),
        );
        (service, store)
    }

    fn item(name: &str, price: f64) -> Item {
        Item {
            name: name.to_string(),
            description: None,
            price,
            image_url: None,
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn test_list_items_in_insertion_order_with_string_ids() {
        let (service, _) = service();

        let first = service.add_item(item("Americano", 2.0)).await.unwrap();
        let second = service.add_item(item("Cappuccino", 3.0)).await.unwrap();
        let third = service.add_item(item("Americano", 2.0)).await.unwrap();

        let items = service.list_items().await.unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![first, second, third]);

        let names: Vec<_> = items.iter().map(|i| i.item.name.as_str()).collect();
        assert_eq!(names, vec!["Americano", "Cappuccino", "Americano"]);
    }

    #[tokio::test]
    async fn test_add_item_rejects_invalid_fields() {
        let (service, store) = service();

        assert!(matches!(
            service.add_item(item("", 1.0)).await,
            Err(CatalogError::Invalid(_))
        ));
        assert!(matches!(
            service.add_item(item("Tea", -0.5)).await,
            Err(CatalogError::Invalid(_))
        ));
        assert_eq!(store.count(ITEMS_COLLECTION).await, 0);
    }

    #[tokio::test]
    async fn test_record_purchase_without_catalog_checks() {
        let (service, store) = service();

        let purchase = Purchase {
            email: "Buyer@Example.com".to_string(),
            items: vec![PurchaseItem {
                name: "Not in catalog".to_string(),
                quantity: 50,
            }],
            total_price: 1.0,
        };
        service.record_purchase(purchase).await.unwrap();

        assert_eq!(store.count(PURCHASES_COLLECTION).await, 1);
        assert_eq!(store.count(ITEMS_COLLECTION).await, 0);
    }

    #[tokio::test]
    async fn test_record_purchase_validates_email() {
        let (service, store) = service();

        let purchase = Purchase {
            email: "nobody".to_string(),
            items: vec![],
            total_price: 0.0,
        };

        assert!(matches!(
            service.record_purchase(purchase).await,
            Err(CatalogError::Invalid(_))
        ));
        assert_eq!(store.count(PURCHASES_COLLECTION).await, 0);
    }
}
