use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopline_core::{CatalogProduct, NewProduct};

use crate::{error::AppError, extract::JsonBody, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CatalogProduct> for ProductResponse {
    fn from(product: CatalogProduct) -> Self {
        Self {
            id: product.id.into(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/products", post(create_product))
}

/// POST /products
async fn create_product(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::ValidationError("name is required".to_string()));
    }

    let product = state
        .create_product
        .execute(NewProduct {
            name: name.to_string(),
            price: req.price,
            quantity: req.quantity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}
