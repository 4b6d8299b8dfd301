//! HTTP handlers for stock adjustment endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiResponse, AppResult};
use crate::middleware::CurrentUser;
use crate::services::adjustment::{
    AdjustmentService, AdjustmentWithItems, CreateAdjustmentInput, UpdateAdjustmentInput,
};
use crate::AppState;

/// Apply a stock adjustment
pub async fn create_adjustment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateAdjustmentInput>,
) -> AppResult<(StatusCode, Json<ApiResponse<AdjustmentWithItems>>)> {
    let service = AdjustmentService::new(state.db);
    let adjustment = service.create_adjustment(input).await?;

    tracing::debug!(
        "Adjustment {} applied by user {}",
        adjustment.adjustment.ref_no,
        current_user.0.user_id
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::new(adjustment))))
}

/// List all adjustments with their line items
pub async fn list_adjustments(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<AdjustmentWithItems>>>> {
    let service = AdjustmentService::new(state.db);
    let adjustments = service.list_adjustments().await?;
    Ok(Json(ApiResponse::new(adjustments)))
}

/// Get a specific adjustment with its line items
pub async fn get_adjustment(
    State(state): State<AppState>,
    Path(adjustment_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<AdjustmentWithItems>>> {
    let service = AdjustmentService::new(state.db);
    let adjustment = service.get_adjustment(adjustment_id).await?;
    Ok(Json(ApiResponse::new(adjustment)))
}

/// Update an adjustment's reason
pub async fn update_adjustment(
    State(state): State<AppState>,
    Path(adjustment_id): Path<Uuid>,
    Json(input): Json<UpdateAdjustmentInput>,
) -> AppResult<Json<ApiResponse<AdjustmentWithItems>>> {
    let service = AdjustmentService::new(state.db);
    let adjustment = service.update_adjustment(adjustment_id, input).await?;
    Ok(Json(ApiResponse::new(adjustment)))
}

/// Delete an adjustment record
pub async fn delete_adjustment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(adjustment_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = AdjustmentService::new(state.db);
    service.delete_adjustment(adjustment_id).await?;

    tracing::info!(
        "Adjustment {} deleted by user {}",
        adjustment_id,
        current_user.0.user_id
    );

    Ok(StatusCode::NO_CONTENT)
}
