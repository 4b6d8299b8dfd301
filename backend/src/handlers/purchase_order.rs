//! HTTP handlers for purchase order endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiResponse, AppResult};
use crate::middleware::CurrentUser;
use crate::services::purchase_order::{
    CreatePurchaseOrderInput, PurchaseOrderService, PurchaseOrderWithItems,
    UpdatePurchaseOrderInput,
};
use crate::AppState;

/// Create a purchase order
pub async fn create_purchase_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreatePurchaseOrderInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<PurchaseOrderWithItems>>)> {
    let service = PurchaseOrderService::new(state.db);
    let purchase_order = service.create_purchase_order(input).await?;

    tracing::debug!(
        "Purchase order {} created by user {}",
        purchase_order.purchase_order.ref_no,
        current_user.0.user_id
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(purchase_order))))
}

/// List all purchase orders with their line items
pub async fn list_purchase_orders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<PurchaseOrderWithItems>>>> {
    let service = PurchaseOrderService::new(state.db);
    let purchase_orders = service.list_purchase_orders().await?;
    Ok(Json(ApiResponse::new(purchase_orders)))
}

/// Get a specific purchase order with its line items
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(purchase_order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PurchaseOrderWithItems>>> {
    let service = PurchaseOrderService::new(state.db);
    let purchase_order = service.get_purchase_order(purchase_order_id).await?;
    Ok(Json(ApiResponse::new(purchase_order)))
}

/// Update a purchase order header
pub async fn update_purchase_order(
    State(state): State<AppState>,
    Path(purchase_order_id): Path<Uuid>,
    Json(input): Json<UpdatePurchaseOrderInput>,
) -> AppResult<Json<ApiResponse<PurchaseOrderWithItems>>> {
    let service = PurchaseOrderService::new(state.db);
    let purchase_order = service
        .update_purchase_order(purchase_order_id, input)
        .await?;
    Ok(Json(ApiResponse::new(purchase_order)))
}

/// Delete a purchase order
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(purchase_order_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = PurchaseOrderService::new(state.db);
    service.delete_purchase_order(purchase_order_id).await?;

    tracing::info!(
        "Purchase order {} deleted by user {}",
        purchase_order_id,
        current_user.0.user_id
    );

    Ok(StatusCode::NO_CONTENT)
}
