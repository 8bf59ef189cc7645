use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shopline_core::{CatalogProduct, ProductId, ProductRepository, RepoResult, StockAdjustment};
use sqlx::PgPool;
use tracing::debug;

pub struct StoreProductRepository {
    pool: PgPool,
}

impl StoreProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: Decimal,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for CatalogProduct {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::from(row.id),
            name: row.name,
            price: row.price,
            quantity: row.quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepoResult<Vec<CatalogProduct>> {
        let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_owned()).collect();

        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, quantity, created_at, updated_at FROM products WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CatalogProduct::from).collect())
    }

    async fn update_quantity(&self, adjustments: &[StockAdjustment]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        for adjustment in adjustments {
            let result = sqlx::query("UPDATE products SET quantity = $1, updated_at = NOW() WHERE id = $2")
                .bind(adjustment.quantity)
                .bind(adjustment.id.as_str())
                .execute(&mut *tx)
                .await?;

            // Dropping the transaction rolls back earlier rows of the batch.
            if result.rows_affected() == 0 {
                return Err(format!("unknown product {}", adjustment.id).into());
            }
        }

        tx.commit().await?;
        debug!(products = adjustments.len(), "stock levels updated");
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<CatalogProduct>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, quantity, created_at, updated_at FROM products WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CatalogProduct::from))
    }

    async fn create(&self, product: &CatalogProduct) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
