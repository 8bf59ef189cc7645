use std::sync::Arc;

use rust_decimal::Decimal;
use shopline_core::{CatalogProduct, NewProduct, ProductRepository, RepoError};
use tracing::{info, warn};

/// Prices are stored as NUMERIC(12, 2).
const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000;

/// Registers products in the catalog
pub struct CreateProductService {
    products: Arc<dyn ProductRepository>,
}

impl CreateProductService {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    pub async fn execute(&self, new_product: NewProduct) -> Result<CatalogProduct, CatalogError> {
        let price = normalize_price(new_product.price)?;
        if new_product.quantity < 0 {
            return Err(CatalogError::InvalidQuantity(new_product.quantity));
        }

        if self.products.find_by_name(&new_product.name).await?.is_some() {
            warn!(name = %new_product.name, "rejected product registration: name in use");
            return Err(CatalogError::NameInUse(new_product.name));
        }

        let product = CatalogProduct::new(new_product.name, price, new_product.quantity);
        self.products.create(&product).await?;

        info!(product_id = %product.id, quantity = product.quantity, "product registered");
        Ok(product)
    }
}

/// Checks the price fits the catalog column and pads it to cents, so every
/// backend hands back the same value it stored.
fn normalize_price(price: Decimal) -> Result<Decimal, CatalogError> {
    if price < Decimal::ZERO || price.scale() > PRICE_SCALE || price >= Decimal::from(PRICE_LIMIT) {
        return Err(CatalogError::InvalidPrice(price));
    }
    let mut price = price;
    price.rescale(PRICE_SCALE);
    Ok(price)
}

/// Product-related errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("A product named {0} already exists")]
    NameInUse(String),

    #[error("Price must be a non-negative amount below 10000000000 with at most two decimals, got {0}")]
    InvalidPrice(Decimal),

    #[error("Quantity must not be negative, got {0}")]
    InvalidQuantity(i32),

    #[error("Store error: {0}")]
    Store(#[from] RepoError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shopline_core::{ProductId, RepoResult, StockAdjustment};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeProducts {
        stored: Mutex<Vec<CatalogProduct>>,
    }

    #[async_trait]
    impl ProductRepository for FakeProducts {
        async fn find_all_by_id(&self, _ids: &[ProductId]) -> RepoResult<Vec<CatalogProduct>> {
            unreachable!("registration never reads by id")
        }

        async fn update_quantity(&self, _adjustments: &[StockAdjustment]) -> RepoResult<()> {
            unreachable!("registration never touches stock")
        }

        async fn find_by_name(&self, name: &str) -> RepoResult<Option<CatalogProduct>> {
            Ok(self.stored.lock().unwrap().iter().find(|p| p.name == name).cloned())
        }

        async fn create(&self, product: &CatalogProduct) -> RepoResult<()> {
            self.stored.lock().unwrap().push(product.clone());
            Ok(())
        }
    }

    fn new_product(name: &str, price: Decimal, quantity: i32) -> NewProduct {
        NewProduct { name: name.to_string(), price, quantity }
    }

    #[tokio::test]
    async fn test_register_product() {
        let repo = Arc::new(FakeProducts::default());
        let service = CreateProductService::new(repo.clone());

        let product = service.execute(new_product("Keyboard", Decimal::new(4990, 2), 12)).await.unwrap();

        assert_eq!(product.price, Decimal::new(4990, 2));
        assert_eq!(product.quantity, 12);
        assert_eq!(repo.stored.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let repo = Arc::new(FakeProducts::default());
        let service = CreateProductService::new(repo.clone());
        service.execute(new_product("Keyboard", Decimal::ONE, 1)).await.unwrap();

        let result = service.execute(new_product("Keyboard", Decimal::TEN, 5)).await;

        assert!(matches!(result, Err(CatalogError::NameInUse(name)) if name == "Keyboard"));
        assert_eq!(repo.stored.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_negative_values_rejected() {
        let service = CreateProductService::new(Arc::new(FakeProducts::default()));

        let price = service.execute(new_product("Mouse", Decimal::NEGATIVE_ONE, 1)).await;
        assert!(matches!(price, Err(CatalogError::InvalidPrice(_))));

        let quantity = service.execute(new_product("Mouse", Decimal::ONE, -1)).await;
        assert!(matches!(quantity, Err(CatalogError::InvalidQuantity(-1))));
    }

    #[tokio::test]
    async fn test_price_must_fit_cents_column() {
        let repo = Arc::new(FakeProducts::default());
        let service = CreateProductService::new(repo.clone());

        let fractional = service.execute(new_product("Mouse", Decimal::new(10005, 3), 1)).await;
        assert!(matches!(fractional, Err(CatalogError::InvalidPrice(_))));

        let huge = service.execute(new_product("Mouse", Decimal::new(10_000_000_000, 0), 1)).await;
        assert!(matches!(huge, Err(CatalogError::InvalidPrice(_))));
        assert!(repo.stored.lock().unwrap().is_empty());

        let product = service.execute(new_product("Mouse", Decimal::new(45, 1), 1)).await.unwrap();
        assert_eq!(product.price.to_string(), "4.50");
        assert_eq!(repo.stored.lock().unwrap()[0].price.to_string(), "4.50");

        let top = service.execute(new_product("Server", Decimal::new(999_999_999_999, 2), 1)).await.unwrap();
        assert_eq!(top.price, Decimal::new(999_999_999_999, 2));
    }
}
