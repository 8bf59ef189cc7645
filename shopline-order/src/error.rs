use shopline_catalog::{Shortfall, StockError};
use shopline_core::{OrderId, ProductId, RepoError};

/// Failures of the order services.
///
/// Everything except `Store` is a validation failure caused by the request.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Quantity for product {product_id} must be positive, got {quantity}")]
    InvalidQuantity { product_id: ProductId, quantity: i32 },

    #[error("Customer not found")]
    CustomerNotFound,

    #[error("No products found")]
    NoProductsFound,

    #[error("Products not found: {}", join(.0))]
    ProductsNotFound(Vec<ProductId>),

    #[error("Insufficient quantity: {}", join(.0))]
    InsufficientQuantity(Vec<Shortfall>),

    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    #[error("Store error: {0}")]
    Store(#[from] RepoError),
}

impl OrderError {
    /// Whether the failure was caused by the request rather than the system.
    pub fn is_validation(&self) -> bool {
        !matches!(self, OrderError::Store(_) | OrderError::OrderNotFound(_))
    }
}

impl From<StockError> for OrderError {
    fn from(err: StockError) -> Self {
        Self::Store(Box::new(err))
    }
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
