use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use shopline_core::{CatalogProduct, OrderLineItem, OrderProduct, ProductId, RequestedProduct, StockAdjustment};

/// One requested line that asks for more units than the catalog holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub product_id: ProductId,
    pub requested: i32,
    pub available: i32,
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (requested {}, available {})", self.product_id, self.requested, self.available)
    }
}

/// Catalog records captured by a single lookup, keyed by product id.
///
/// Both the sufficiency check and the post-order stock levels are computed
/// from these values; the catalog is never re-read in between.
#[derive(Debug, Clone, Default)]
pub struct StockSnapshot {
    products: HashMap<ProductId, CatalogProduct>,
}

impl StockSnapshot {
    pub fn from_products(products: Vec<CatalogProduct>) -> Self {
        let products = products.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self { products }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&CatalogProduct> {
        self.products.get(id)
    }

    /// Requested ids absent from the snapshot, first occurrence order, no repeats.
    pub fn missing(&self, requested: &[RequestedProduct]) -> Vec<ProductId> {
        let mut seen = HashSet::new();
        requested
            .iter()
            .filter(|line| !self.products.contains_key(&line.id))
            .filter(|line| seen.insert(&line.id))
            .map(|line| line.id.clone())
            .collect()
    }

    /// Lines whose quantity exceeds the snapshot quantity.
    ///
    /// Every line is compared against the same snapshot value. Repeated ids
    /// are not accumulated, so two lines that each fit can overdraw together.
    /// Ids missing from the snapshot are skipped; check `missing` first.
    pub fn shortfalls(&self, requested: &[RequestedProduct]) -> Vec<Shortfall> {
        requested
            .iter()
            .filter_map(|line| {
                let product = self.products.get(&line.id)?;
                (line.quantity > product.quantity).then(|| Shortfall {
                    product_id: line.id.clone(),
                    requested: line.quantity,
                    available: product.quantity,
                })
            })
            .collect()
    }

    /// Pair each requested line with the snapshot price.
    pub fn line_items(&self, requested: &[RequestedProduct]) -> Result<Vec<OrderLineItem>, StockError> {
        requested
            .iter()
            .map(|line| {
                let product = self.lookup(&line.id)?;
                Ok(OrderLineItem {
                    product_id: line.id.clone(),
                    quantity: line.quantity,
                    price: product.price,
                })
            })
            .collect()
    }

    /// New absolute stock level for every persisted line: snapshot quantity
    /// minus the ordered quantity. One adjustment per line, in line order.
    pub fn decrements(&self, lines: &[OrderProduct]) -> Result<Vec<StockAdjustment>, StockError> {
        lines
            .iter()
            .map(|line| {
                let product = self.lookup(&line.product_id)?;
                let quantity = product
                    .quantity
                    .checked_sub(line.quantity)
                    .ok_or_else(|| StockError::OutOfRange(line.product_id.clone()))?;
                Ok(StockAdjustment {
                    id: line.product_id.clone(),
                    quantity,
                })
            })
            .collect()
    }

    fn lookup(&self, id: &ProductId) -> Result<&CatalogProduct, StockError> {
        self.products.get(id).ok_or_else(|| StockError::UnknownProduct(id.clone()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("Order line references product {0} that was not part of the catalog lookup")]
    UnknownProduct(ProductId),

    #[error("Stock level for product {0} is out of range")]
    OutOfRange(ProductId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shopline_core::{OrderId, OrderProductId};

    fn product(id: &str, price: Decimal, quantity: i32) -> CatalogProduct {
        let mut product = CatalogProduct::new(format!("product {id}"), price, quantity);
        product.id = id.into();
        product
    }

    fn snapshot() -> StockSnapshot {
        StockSnapshot::from_products(vec![
            product("P1", Decimal::new(1000, 2), 5),
            product("P2", Decimal::new(250, 2), 0),
        ])
    }

    fn persisted(product_id: &str, quantity: i32) -> OrderProduct {
        OrderProduct {
            id: OrderProductId::new(),
            order_id: OrderId::new(),
            product_id: product_id.into(),
            quantity,
            price: Decimal::ONE,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_missing_reports_each_absent_id_once() {
        let requested = vec![
            RequestedProduct::new("P9", 1),
            RequestedProduct::new("P1", 1),
            RequestedProduct::new("P8", 2),
            RequestedProduct::new("P9", 3),
        ];

        assert_eq!(snapshot().missing(&requested), vec![ProductId::from("P9"), ProductId::from("P8")]);
    }

    #[test]
    fn test_shortfalls_compare_against_snapshot() {
        let requested = vec![RequestedProduct::new("P1", 5), RequestedProduct::new("P2", 1)];

        let shortfalls = snapshot().shortfalls(&requested);
        assert_eq!(
            shortfalls,
            vec![Shortfall { product_id: "P2".into(), requested: 1, available: 0 }]
        );
    }

    #[test]
    fn test_repeated_ids_are_not_accumulated() {
        // 3 + 3 > 5, yet each line fits the snapshot on its own.
        let requested = vec![RequestedProduct::new("P1", 3), RequestedProduct::new("P1", 3)];

        assert!(snapshot().shortfalls(&requested).is_empty());
    }

    #[test]
    fn test_line_items_snapshot_price() {
        let snapshot = snapshot();
        let items = snapshot.line_items(&[RequestedProduct::new("P1", 3)]).unwrap();

        assert_eq!(items, vec![OrderLineItem { product_id: "P1".into(), quantity: 3, price: Decimal::new(1000, 2) }]);
        assert!(matches!(
            snapshot.line_items(&[RequestedProduct::new("P7", 1)]),
            Err(StockError::UnknownProduct(id)) if id.as_str() == "P7"
        ));
    }

    #[test]
    fn test_decrements_subtract_from_snapshot() {
        let adjustments = snapshot().decrements(&[persisted("P1", 3)]).unwrap();
        assert_eq!(adjustments, vec![StockAdjustment { id: "P1".into(), quantity: 2 }]);
    }

    #[test]
    fn test_decrements_reject_unknown_product() {
        let result = snapshot().decrements(&[persisted("P1", 1), persisted("P7", 1)]);
        assert!(matches!(result, Err(StockError::UnknownProduct(id)) if id.as_str() == "P7"));
    }

    #[test]
    fn test_decrements_out_of_range() {
        let result = snapshot().decrements(&[persisted("P1", i32::MIN)]);
        assert!(matches!(result, Err(StockError::OutOfRange(id)) if id.as_str() == "P1"));
    }
}
