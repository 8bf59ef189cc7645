use async_trait::async_trait;

use crate::customer::Customer;
use crate::ids::{CustomerId, OrderId, ProductId};
use crate::order::{NewOrder, Order};
use crate::product::{CatalogProduct, StockAdjustment};

/// Error raised by a storage backend. Services pass it through untouched.
pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository trait for customer data access
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: &CustomerId) -> RepoResult<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>>;

    async fn create(&self, customer: &Customer) -> RepoResult<()>;
}

/// Repository trait for product catalog access
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Resolve many ids in one call.
    ///
    /// Returns only the records that exist, so the result may be shorter
    /// than `ids`. Order is unspecified.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepoResult<Vec<CatalogProduct>>;

    /// Apply new absolute stock levels, in slice order.
    async fn update_quantity(&self, adjustments: &[StockAdjustment]) -> RepoResult<()>;

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<CatalogProduct>>;

    async fn create(&self, product: &CatalogProduct) -> RepoResult<()>;
}

/// Repository trait for order data access
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist the order and its line items as one unit and return the
    /// stored order with generated ids.
    async fn create(&self, order: NewOrder) -> RepoResult<Order>;

    async fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>>;
}
