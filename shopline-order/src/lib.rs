pub mod create;
pub mod error;
pub mod find;

#[cfg(test)]
mod testing;

pub use create::CreateOrderService;
pub use error::OrderError;
pub use find::FindOrderService;
