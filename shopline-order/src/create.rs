use std::sync::Arc;

use shopline_catalog::StockSnapshot;
use shopline_core::{
    CustomerRepository, NewOrder, Order, OrderRepository, OrderRequest, ProductRepository,
};
use tracing::{debug, info, warn};

use crate::error::OrderError;

/// Validates an order request against the customer store and the catalog,
/// persists the order and decrements stock.
///
/// Every line must ask for at least one unit; otherwise the request is
/// rejected before any collaborator is called.
///
/// Collaborator calls happen strictly in sequence: customer lookup, one
/// batched catalog lookup, order write, one batched stock write. Validation
/// failures stop the run before anything is written. Stock is only touched
/// after the order store accepted the order.
///
/// Nothing here serializes concurrent runs: two orders for the same product
/// can both pass the check against their own snapshot, and the later stock
/// write overwrites the earlier one.
#[derive(Clone)]
pub struct CreateOrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    customers: Arc<dyn CustomerRepository>,
}

impl CreateOrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            orders,
            products,
            customers,
        }
    }

    pub async fn execute(&self, request: &OrderRequest) -> Result<Order, OrderError> {
        if let Some(line) = request.products.iter().find(|line| line.quantity <= 0) {
            warn!(customer_id = %request.customer_id, product_id = %line.id, quantity = line.quantity, "order rejected: invalid quantity");
            return Err(OrderError::InvalidQuantity {
                product_id: line.id.clone(),
                quantity: line.quantity,
            });
        }

        let customer = self
            .customers
            .find_by_id(&request.customer_id)
            .await?
            .ok_or_else(|| {
                warn!(customer_id = %request.customer_id, "order rejected: customer not found");
                OrderError::CustomerNotFound
            })?;

        let found = self.products.find_all_by_id(&request.product_ids()).await?;
        debug!(requested = request.products.len(), found = found.len(), "catalog lookup");

        let snapshot = StockSnapshot::from_products(found);
        if snapshot.is_empty() {
            warn!(customer_id = %request.customer_id, "order rejected: no products found");
            return Err(OrderError::NoProductsFound);
        }

        let missing = snapshot.missing(&request.products);
        if !missing.is_empty() {
            warn!(customer_id = %request.customer_id, missing = missing.len(), "order rejected: products not found");
            return Err(OrderError::ProductsNotFound(missing));
        }

        let shortfalls = snapshot.shortfalls(&request.products);
        if !shortfalls.is_empty() {
            warn!(customer_id = %request.customer_id, shortfalls = shortfalls.len(), "order rejected: insufficient quantity");
            return Err(OrderError::InsufficientQuantity(shortfalls));
        }

        let line_items = snapshot.line_items(&request.products)?;

        let order = self
            .orders
            .create(NewOrder {
                customer,
                products: line_items,
            })
            .await?;

        let adjustments = snapshot.decrements(&order.order_products)?;
        self.products.update_quantity(&adjustments).await?;

        info!(
            order_id = %order.id,
            customer_id = %order.customer.id,
            lines = order.order_products.len(),
            "order created"
        );

        Ok(order)
    }
}
