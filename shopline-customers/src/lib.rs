pub mod registration;

pub use registration::{CreateCustomerService, CustomerError};
