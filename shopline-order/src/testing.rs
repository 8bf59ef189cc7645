//! Recording fakes of the three store contracts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use shopline_core::{
    CatalogProduct, Customer, CustomerId, CustomerRepository, NewOrder, Order, OrderId,
    OrderRepository, ProductId, ProductRepository, RepoResult, StockAdjustment,
};

use crate::{CreateOrderService, FindOrderService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    FindCustomer,
    FindProducts,
    CreateOrder,
    UpdateQuantity,
    FindOrder,
}

#[derive(Default)]
struct State {
    customers: Vec<Customer>,
    products: HashMap<ProductId, CatalogProduct>,
    orders: Vec<Order>,
    calls: Vec<Call>,
    created: Vec<NewOrder>,
    stock_updates: Vec<Vec<StockAdjustment>>,
    reprice_on_create: Option<(ProductId, Decimal)>,
    fail_catalog: bool,
    fail_order_store: bool,
    fail_stock_update: bool,
}

#[derive(Default)]
pub struct FakeStore {
    state: Mutex<State>,
}

impl FakeStore {
    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl CustomerRepository for FakeStore {
    async fn find_by_id(&self, id: &CustomerId) -> RepoResult<Option<Customer>> {
        self.record(Call::FindCustomer);
        Ok(self.state.lock().unwrap().customers.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Customer>> {
        Ok(self.state.lock().unwrap().customers.iter().find(|c| c.email == email).cloned())
    }

    async fn create(&self, customer: &Customer) -> RepoResult<()> {
        self.state.lock().unwrap().customers.push(customer.clone());
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for FakeStore {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepoResult<Vec<CatalogProduct>> {
        self.record(Call::FindProducts);
        let state = self.state.lock().unwrap();
        if state.fail_catalog {
            return Err("catalog unavailable".into());
        }
        Ok(state
            .products
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn update_quantity(&self, adjustments: &[StockAdjustment]) -> RepoResult<()> {
        self.record(Call::UpdateQuantity);
        let mut state = self.state.lock().unwrap();
        if state.fail_stock_update {
            return Err("stock update failed".into());
        }
        for adjustment in adjustments {
            if let Some(product) = state.products.get_mut(&adjustment.id) {
                product.quantity = adjustment.quantity;
            }
        }
        state.stock_updates.push(adjustments.to_vec());
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<CatalogProduct>> {
        Ok(self.state.lock().unwrap().products.values().find(|p| p.name == name).cloned())
    }

    async fn create(&self, product: &CatalogProduct) -> RepoResult<()> {
        self.state.lock().unwrap().products.insert(product.id.clone(), product.clone());
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for FakeStore {
    async fn create(&self, order: NewOrder) -> RepoResult<Order> {
        self.record(Call::CreateOrder);
        let mut state = self.state.lock().unwrap();
        if state.fail_order_store {
            return Err("order store unavailable".into());
        }
        if let Some((id, price)) = state.reprice_on_create.take() {
            if let Some(product) = state.products.get_mut(&id) {
                product.price = price;
            }
        }
        state.created.push(order.clone());
        let order = Order::from_new(order);
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>> {
        self.record(Call::FindOrder);
        Ok(self.state.lock().unwrap().orders.iter().find(|o| o.id == id).cloned())
    }
}

/// Builder around a shared `FakeStore`.
pub struct Fixture {
    store: Arc<FakeStore>,
}

impl Fixture {
    pub fn new() -> Self {
        Self { store: Arc::new(FakeStore::default()) }
    }

    pub fn with_customer(self, id: &str) -> Self {
        let mut customer = Customer::new(format!("customer {id}"), format!("{id}@example.com"));
        customer.id = id.into();
        self.state().customers.push(customer);
        self
    }

    pub fn with_product(self, id: &str, price: Decimal, quantity: i32) -> Self {
        let mut product = CatalogProduct::new(format!("product {id}"), price, quantity);
        product.id = id.into();
        self.state().products.insert(product.id.clone(), product);
        self
    }

    pub fn failing_catalog(self) -> Self {
        self.state().fail_catalog = true;
        self
    }

    pub fn failing_order_store(self) -> Self {
        self.state().fail_order_store = true;
        self
    }

    pub fn failing_stock_update(self) -> Self {
        self.state().fail_stock_update = true;
        self
    }

    /// Change a catalog price while the order is being persisted.
    pub fn reprice_on_create(&self, id: &str, price: Decimal) {
        self.state().reprice_on_create = Some((id.into(), price));
    }

    pub fn service(&self) -> CreateOrderService {
        CreateOrderService::new(self.store.clone(), self.store.clone(), self.store.clone())
    }

    pub fn find_service(&self) -> FindOrderService {
        FindOrderService::new(self.store.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn created_orders(&self) -> Vec<NewOrder> {
        self.state().created.clone()
    }

    pub fn stock_updates(&self) -> Vec<Vec<StockAdjustment>> {
        self.state().stock_updates.clone()
    }

    pub fn catalog_quantity(&self, id: &str) -> Option<i32> {
        self.state().products.get(&ProductId::from(id)).map(|p| p.quantity)
    }

    pub fn catalog_price(&self, id: &str) -> Option<Decimal> {
        self.state().products.get(&ProductId::from(id)).map(|p| p.price)
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.store.state.lock().unwrap()
    }
}
