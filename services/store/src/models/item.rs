//! Catalog item models

use serde::{Deserialize, Serialize};

fn default_quantity() -> i64 {
    1
}

/// Catalog item, both as accepted by `POST /items` and as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Item returned by `GET /items`, with its store identifier as a string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResponse {
    pub id: String,
    #[serde(flatten)]
    pub item: Item,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_and_default_quantity() {
        let item: Item = serde_json::from_value(json!({"name": "Espresso", "price": 2.5})).unwrap();

        assert_eq!(item.quantity, 1);
        assert!(item.description.is_none());
        assert!(item.image_url.is_none());
    }

    #[test]
    fn test_item_response_is_flat() {
        let response = ItemResponse {
            id: "8d4c7a5e-0000-4000-8000-000000000000".to_string(),
            item: Item {
                name: "Mocha".to_string(),
                description: Some("Chocolate".to_string()),
                price: 3.75,
                image_url: None,
                quantity: 4,
            },
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["id"], "8d4c7a5e-0000-4000-8000-000000000000");
        assert_eq!(value["name"], "Mocha");
        assert_eq!(value["quantity"], 4);
        assert!(value.get("item").is_none());
    }
}
