pub mod product;
pub mod stock;

pub use product::{CatalogError, CreateProductService};
pub use stock::{Shortfall, StockError, StockSnapshot};
