use std::sync::Arc;

use shopline_core::{Order, OrderId, OrderRepository};

use crate::error::OrderError;

/// Looks up a persisted order by id
#[derive(Clone)]
pub struct FindOrderService {
    orders: Arc<dyn OrderRepository>,
}

impl FindOrderService {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn execute(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))
    }
}
