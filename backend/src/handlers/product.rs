//! HTTP handlers for product catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiResponse, AppResult};
use crate::middleware::CurrentUser;
use crate::services::product::{CreateProductInput, Product, ProductService, UpdateProductInput};
use crate::AppState;

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let service = ProductService::new(state.db);
    let product = service.create_product(input).await?;

    tracing::debug!(
        "Product {} created by user {}",
        product.id,
        current_user.0.user_id
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(product))))
}

/// List all products
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Product>>>> {
    let service = ProductService::new(state.db);
    let products = service.list_products().await?;
    Ok(Json(ApiResponse::new(products)))
}

/// Get a specific product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let service = ProductService::new(state.db);
    let product = service.get_product(product_id).await?;
    Ok(Json(ApiResponse::new(product)))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let service = ProductService::new(state.db);
    let product = service.update_product(product_id, input).await?;
    Ok(Json(ApiResponse::new(product)))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db);
    service.delete_product(product_id).await?;

    tracing::info!(
        "Product {} deleted by user {}",
        product_id,
        current_user.0.user_id
    );

    Ok(StatusCode::NO_CONTENT)
}
