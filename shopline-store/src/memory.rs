use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use shopline_core::{
    CatalogProduct, Customer, CustomerId, CustomerRepository, NewOrder, Order, OrderId,
    OrderRepository, ProductId, ProductRepository, RepoError, RepoResult, StockAdjustment,
};

/// In-memory implementation of all three store contracts.
///
/// Intended for tests/dev. Each call runs under a single lock, so a call is
/// atomic on its own; nothing spans several calls.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    customers: RwLock<HashMap<CustomerId, Customer>>,
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> RepoError {
    "lock poisoned".into()
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find_by_id(&self, id: &CustomerId) -> RepoResult<Option<Customer>> {
        let customers = self.customers.read().map_err(poisoned)?;
        Ok(customers.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        let customers = self.customers.read().map_err(poisoned)?;
        Ok(customers.values().find(|c| c.email == email).cloned())
    }

    async fn create(&self, customer: &Customer) -> RepoResult<()> {
        let mut customers = self.customers.write().map_err(poisoned)?;
        if customers.values().any(|c| c.email == customer.email) {
            return Err(format!("duplicate e-mail {}", customer.email).into());
        }
        customers.insert(customer.id.clone(), customer.clone());
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepoResult<Vec<CatalogProduct>> {
        let products = self.products.read().map_err(poisoned)?;
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| products.get(id).cloned())
            .collect())
    }

    async fn update_quantity(&self, adjustments: &[StockAdjustment]) -> RepoResult<()> {
        let mut products = self.products.write().map_err(poisoned)?;
        if let Some(unknown) = adjustments.iter().find(|a| !products.contains_key(&a.id)) {
            return Err(format!("unknown product {}", unknown.id).into());
        }

        let now = Utc::now();
        for adjustment in adjustments {
            if let Some(product) = products.get_mut(&adjustment.id) {
                product.quantity = adjustment.quantity;
                product.updated_at = now;
            }
        }
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<CatalogProduct>> {
        let products = self.products.read().map_err(poisoned)?;
        Ok(products.values().find(|p| p.name == name).cloned())
    }

    async fn create(&self, product: &CatalogProduct) -> RepoResult<()> {
        let mut products = self.products.write().map_err(poisoned)?;
        if products.values().any(|p| p.name == product.name) {
            return Err(format!("duplicate product name {}", product.name).into());
        }
        products.insert(product.id.clone(), product.clone());
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn create(&self, order: NewOrder) -> RepoResult<Order> {
        let order = Order::from_new(order);
        let mut orders = self.orders.write().map_err(poisoned)?;
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.get(&id).cloned())
    }
}
