use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// A catalog record: current unit price and available stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    /// Units available for sale, never negative.
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogProduct {
    pub fn new(name: String, price: Decimal, quantity: i32) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::generate(),
            name,
            price,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Registration payload for a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// New absolute stock level for one product.
///
/// Computed by the order workflow and handed to the catalog's batch update;
/// it is not an entity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub id: ProductId,
    pub quantity: i32,
}
