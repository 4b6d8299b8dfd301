//! Error handling for the Shop Inventory Management Platform
//!
//! Every failure surfaces as a typed `AppError` rendered through the
//! platform's `{ data, error }` envelope. Workflow code never writes a
//! response mid-transaction: errors propagate with `?`, the un-committed
//! transaction is dropped, and the rollback happens before any HTTP
//! response exists.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Duplicate entry: {field}")]
    DuplicateEntry { field: String, value: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Credit limit exceeded: requested {requested}, available {available}")]
    CreditLimitExceeded {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Failed to update stock for product {0}")]
    StockMutationFailed(Uuid),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Success envelope: every payload ships as `{ "data": ..., "error": null }`
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub error: Option<ErrorDetail>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, error: None }
    }
}

/// Error envelope: `{ "data": null, "error": { code, message, field? } }`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub data: Option<()>,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::DuplicateEntry { field, value } => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message: format!("A record with this {} already exists: {}", field, value),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::CreditLimitExceeded {
                requested,
                available,
            } => (
                StatusCode::FORBIDDEN,
                ErrorDetail {
                    code: "CREDIT_LIMIT_EXCEEDED".to_string(),
                    message: format!(
                        "This customer is not allowed to buy on credit: requested {} exceeds the available limit {}",
                        requested, available
                    ),
                    field: None,
                },
            ),
            AppError::StockMutationFailed(product_id) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "STOCK_UPDATE_FAILED".to_string(),
                    message: format!("Failed to update stock for product {}", product_id),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (
            status,
            Json(ErrorResponse {
                data: None,
                error: error_detail,
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
