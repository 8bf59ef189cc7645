use std::sync::Arc;

use shopline_core::{Customer, CustomerRepository, NewCustomer, RepoError};
use tracing::{info, warn};

/// Registers customers; an e-mail address can belong to one customer only.
pub struct CreateCustomerService {
    customers: Arc<dyn CustomerRepository>,
}

impl CreateCustomerService {
    pub fn new(customers: Arc<dyn CustomerRepository>) -> Self {
        Self { customers }
    }

    pub async fn execute(&self, new_customer: NewCustomer) -> Result<Customer, CustomerError> {
        if self.customers.find_by_email(&new_customer.email).await?.is_some() {
            warn!("rejected customer registration: e-mail in use");
            return Err(CustomerError::EmailInUse(new_customer.email));
        }

        let customer = Customer::new(new_customer.name, new_customer.email);
        self.customers.create(&customer).await?;

        info!(customer_id = %customer.id, "customer registered");
        Ok(customer)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("E-mail {0} is already registered")]
    EmailInUse(String),

    #[error("Store error: {0}")]
    Store(#[from] RepoError),
}
