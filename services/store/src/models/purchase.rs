//! Purchase models

use serde::{Deserialize, Serialize};

/// One line of a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub name: String,
    pub quantity: i64,
}

/// Purchase as accepted by `POST /purchase` and stored in `purchases`
///
/// Lines are not checked against the catalog and the total is recorded as
/// sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub email: String,
    pub items: Vec<PurchaseItem>,
    pub total_price: f64,
}
