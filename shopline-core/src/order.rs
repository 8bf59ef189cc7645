use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::ids::{CustomerId, OrderId, OrderProductId, ProductId};

/// One requested (product, quantity) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedProduct {
    pub id: ProductId,
    pub quantity: i32,
}

impl RequestedProduct {
    pub fn new(id: impl Into<ProductId>, quantity: i32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// Input of the order-creation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub products: Vec<RequestedProduct>,
}

impl OrderRequest {
    /// Requested product ids in request order, duplicates included.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id.clone()).collect()
    }
}

/// Line item as handed to the order store.
///
/// `price` is the catalog price captured at lookup time; later catalog
/// changes never reach an existing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
}

/// Everything the order store needs to persist an order as one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer: Customer,
    pub products: Vec<OrderLineItem>,
}

/// A persisted order line, carrying its own generated id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub id: OrderProductId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl OrderProduct {
    pub fn new(order_id: OrderId, item: OrderLineItem) -> Self {
        Self {
            id: OrderProductId::new(),
            order_id,
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
            created_at: Utc::now(),
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A persisted order with its line items in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub order_products: Vec<OrderProduct>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Materialize a new order from its unpersisted form, assigning ids.
    pub fn from_new(new_order: NewOrder) -> Self {
        let id = OrderId::new();
        let now = Utc::now();
        let order_products = new_order
            .products
            .into_iter()
            .map(|item| OrderProduct::new(id, item))
            .collect();

        Self {
            id,
            customer: new_order.customer,
            order_products,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of `price * quantity` over all lines
    pub fn total(&self) -> Decimal {
        self.order_products.iter().map(OrderProduct::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> Customer {
        Customer::new("Ada".to_string(), "ada@example.com".to_string())
    }

    fn line(product_id: &str, quantity: i32, price: Decimal) -> OrderLineItem {
        OrderLineItem { product_id: product_id.into(), quantity, price }
    }

    #[test]
    fn test_from_new_keeps_line_order_and_prices() {
        let order = Order::from_new(NewOrder {
            customer: customer(),
            products: vec![line("P2", 1, Decimal::new(450, 2)), line("P1", 3, Decimal::new(1000, 2))],
        });

        assert_eq!(order.order_products.len(), 2);
        assert_eq!(order.order_products[0].product_id, ProductId::from("P2"));
        assert_eq!(order.order_products[1].price, Decimal::new(1000, 2));
        assert!(order.order_products.iter().all(|p| p.order_id == order.id));
        assert_ne!(order.order_products[0].id, order.order_products[1].id);
    }

    #[test]
    fn test_total() {
        let order = Order::from_new(NewOrder {
            customer: customer(),
            products: vec![line("P1", 3, Decimal::new(1000, 2)), line("P2", 2, Decimal::new(25, 2))],
        });

        assert_eq!(order.total(), Decimal::new(3050, 2));
    }
}
