pub mod app_config;
pub mod catalog_repo;
pub mod customer_repo;
pub mod database;
pub mod memory;
pub mod order_repo;

use std::sync::Arc;

use shopline_core::{CustomerRepository, OrderRepository, ProductRepository};

pub use catalog_repo::StoreProductRepository;
pub use customer_repo::StoreCustomerRepository;
pub use database::DbClient;
pub use memory::InMemoryStore;
pub use order_repo::StoreOrderRepository;

/// The three store contracts, backed by one storage backend.
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            customers: store.clone(),
            products: store.clone(),
            orders: store,
        }
    }

    pub fn postgres(db: &DbClient) -> Self {
        Self {
            customers: Arc::new(StoreCustomerRepository::new(db.pool.clone())),
            products: Arc::new(StoreProductRepository::new(db.pool.clone())),
            orders: Arc::new(StoreOrderRepository::new(db.pool.clone())),
        }
    }
}
