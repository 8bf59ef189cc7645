use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shopline_core::{
    Customer, CustomerId, NewOrder, Order, OrderId, OrderProduct, OrderProductId, OrderRepository,
    ProductId, RepoResult,
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoreOrderRepository {
    pool: PgPool,
}

impl StoreOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    customer_id: String,
    customer_name: String,
    customer_email: String,
    customer_created_at: DateTime<Utc>,
    customer_updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OrderProductRow {
    id: Uuid,
    order_id: Uuid,
    product_id: String,
    price: Decimal,
    quantity: i32,
    created_at: DateTime<Utc>,
}

impl From<OrderProductRow> for OrderProduct {
    fn from(row: OrderProductRow) -> Self {
        Self {
            id: OrderProductId(row.id),
            order_id: OrderId(row.order_id),
            product_id: ProductId::from(row.product_id),
            quantity: row.quantity,
            price: row.price,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl OrderRepository for StoreOrderRepository {
    async fn create(&self, order: NewOrder) -> RepoResult<Order> {
        let order = Order::from_new(order);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.id.0)
        .bind(order.customer.id.as_str())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for (line_no, line) in order.order_products.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO orders_products (id, order_id, product_id, line_no, price, quantity, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(line.id.0)
            .bind(order.id.0)
            .bind(line.product_id.as_str())
            .bind(i32::try_from(line_no)?)
            .bind(line.price)
            .bind(line.quantity)
            .bind(line.created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    async fn find_by_id(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT o.id, o.created_at, o.updated_at,
                   c.id AS customer_id, c.name AS customer_name, c.email AS customer_email,
                   c.created_at AS customer_created_at, c.updated_at AS customer_updated_at
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            WHERE o.id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderProductRow>(
            r#"
            SELECT id, order_id, product_id, price, quantity, created_at
            FROM orders_products
            WHERE order_id = $1
            ORDER BY line_no
            "#,
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Order {
            id: OrderId(row.id),
            customer: Customer {
                id: CustomerId::from(row.customer_id),
                name: row.customer_name,
                email: row.customer_email,
                created_at: row.customer_created_at,
                updated_at: row.customer_updated_at,
            },
            order_products: lines.into_iter().map(OrderProduct::from).collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
