//! Domain types and storage contracts shared by every Shopline crate.

pub mod customer;
pub mod ids;
pub mod order;
pub mod product;
pub mod repository;

pub use customer::{Customer, NewCustomer};
pub use ids::{CustomerId, OrderId, OrderProductId, ProductId};
pub use order::{NewOrder, Order, OrderLineItem, OrderProduct, OrderRequest, RequestedProduct};
pub use product::{CatalogProduct, NewProduct, StockAdjustment};
pub use repository::{CustomerRepository, OrderRepository, ProductRepository, RepoError, RepoResult};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
