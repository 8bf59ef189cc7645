use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shopline_catalog::CatalogError;
use shopline_customers::CustomerError;
use shopline_order::OrderError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Store(_) => AppError::InternalServerError(err.to_string()),
            OrderError::OrderNotFound(_) => AppError::NotFoundError(err.to_string()),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Store(_) => AppError::InternalServerError(err.to_string()),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::Store(_) => AppError::InternalServerError(err.to_string()),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<shopline_core::CoreError> for AppError {
    fn from(err: shopline_core::CoreError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
