use std::sync::Arc;

use shopline_catalog::CreateProductService;
use shopline_customers::CreateCustomerService;
use shopline_order::{CreateOrderService, FindOrderService};
use shopline_store::Repositories;

#[derive(Clone)]
pub struct AppState {
    pub create_customer: Arc<CreateCustomerService>,
    pub create_product: Arc<CreateProductService>,
    pub create_order: Arc<CreateOrderService>,
    pub find_order: Arc<FindOrderService>,
}

impl AppState {
    pub fn new(repos: Repositories) -> Self {
        Self {
            create_customer: Arc::new(CreateCustomerService::new(repos.customers.clone())),
            create_product: Arc::new(CreateProductService::new(repos.products.clone())),
            create_order: Arc::new(CreateOrderService::new(
                repos.orders.clone(),
                repos.products,
                repos.customers,
            )),
            find_order: Arc::new(FindOrderService::new(repos.orders)),
        }
    }
}
