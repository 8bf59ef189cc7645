use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopline_core::{CustomerId, Order, OrderId, OrderProduct, OrderRequest, ProductId, RequestedProduct};
use uuid::Uuid;

use crate::{customers::CustomerResponse, error::AppError, extract::JsonBody, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub products: Vec<OrderProductRequest>,
}

#[derive(Debug, Deserialize)]
pub struct OrderProductRequest {
    pub id: String,
    pub quantity: i32,
}

impl TryFrom<CreateOrderRequest> for OrderRequest {
    type Error = AppError;

    fn try_from(req: CreateOrderRequest) -> Result<Self, Self::Error> {
        if req.products.is_empty() {
            return Err(AppError::ValidationError("products must not be empty".to_string()));
        }

        let products = req
            .products
            .into_iter()
            .map(|line| {
                if line.quantity <= 0 {
                    return Err(AppError::ValidationError(format!(
                        "quantity for product {} must be positive, got {}",
                        line.id, line.quantity
                    )));
                }
                Ok(RequestedProduct {
                    id: ProductId::parse(line.id)?,
                    quantity: line.quantity,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(OrderRequest {
            customer_id: CustomerId::parse(req.customer_id)?,
            products,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer: CustomerResponse,
    pub order_products: Vec<OrderProductResponse>,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderProductResponse {
    pub id: Uuid,
    pub product_id: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<OrderProduct> for OrderProductResponse {
    fn from(line: OrderProduct) -> Self {
        Self {
            id: line.id.0,
            product_id: line.product_id.into(),
            quantity: line.quantity,
            price: line.price,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total = order.total();
        Self {
            id: order.id.0,
            customer: order.customer.into(),
            order_products: order.order_products.into_iter().map(Into::into).collect(),
            total,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order))
}

/// POST /orders
/// Check stock, persist the order and decrement the ordered quantities
async fn create_order(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let request = OrderRequest::try_from(req)?;
    let order = state.create_order.execute(&request).await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /orders/{id}
async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state.find_order.execute(OrderId(order_id)).await?;
    Ok(Json(order.into()))
}
