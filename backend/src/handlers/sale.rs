//! HTTP handlers for sale endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiResponse, AppResult};
use crate::middleware::CurrentUser;
use crate::services::sale::{
    CreateSaleInput, Sale, SaleService, SaleWithItems, UpdateSaleInput,
};
use crate::AppState;

/// Create a sale
pub async fn create_sale(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateSaleInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<SaleWithItems>>)> {
    let service = SaleService::new(state.db);
    let sale = service.create_sale(input).await?;

    tracing::debug!(
        "Sale {} created by user {} ({})",
        sale.sale.sale_number,
        current_user.0.user_id,
        current_user.0.role
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(sale))))
}

/// List all sales
pub async fn list_sales(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Sale>>>> {
    let service = SaleService::new(state.db);
    let sales = service.list_sales().await?;
    Ok(Json(ApiResponse::new(sales)))
}

/// List sales for a specific shop
pub async fn list_sales_by_shop(
    State(state): State<AppState>,
    Path(shop_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<Sale>>>> {
    let service = SaleService::new(state.db);
    let sales = service.list_sales_by_shop(shop_id).await?;
    Ok(Json(ApiResponse::new(sales)))
}

/// Get a specific sale with its line items
pub async fn get_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SaleWithItems>>> {
    let service = SaleService::new(state.db);
    let sale = service.get_sale(sale_id).await?;
    Ok(Json(ApiResponse::new(sale)))
}

/// Update a sale header
pub async fn update_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(input): Json<UpdateSaleInput>,
) -> AppResult<Json<ApiResponse<SaleWithItems>>> {
    let service = SaleService::new(state.db);
    let sale = service.update_sale(sale_id, input).await?;
    Ok(Json(ApiResponse::new(sale)))
}

/// Delete a sale
pub async fn delete_sale(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(sale_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = SaleService::new(state.db);
    service.delete_sale(sale_id).await?;

    tracing::info!(
        "Sale {} deleted by user {}",
        sale_id,
        current_user.0.user_id
    );

    Ok(StatusCode::NO_CONTENT)
}
