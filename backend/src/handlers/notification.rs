//! HTTP handlers for notification endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ApiResponse, AppResult};
use crate::middleware::CurrentUser;
use crate::services::notification::{Notification, UpdateNotificationInput};
use crate::services::NotificationService;
use crate::AppState;

/// Unread notification counter response
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

/// List all notifications
pub async fn list_notifications(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Notification>>>> {
    let service = NotificationService::new(state.db);
    let notifications = service.list_notifications().await?;
    Ok(Json(ApiResponse::new(notifications)))
}

/// Count notifications not yet marked as read
pub async fn get_unread_count(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<UnreadCountResponse>>> {
    let service = NotificationService::new(state.db);
    let unread = service.unread_count().await?;
    Ok(Json(ApiResponse::new(UnreadCountResponse { unread })))
}

/// Get a specific notification
pub async fn get_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Notification>>> {
    let service = NotificationService::new(state.db);
    let notification = service.get_notification(notification_id).await?;
    Ok(Json(ApiResponse::new(notification)))
}

/// Update a notification's read flag
pub async fn update_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
    Json(input): Json<UpdateNotificationInput>,
) -> AppResult<Json<ApiResponse<Notification>>> {
    let service = NotificationService::new(state.db);
    let notification = service.update_notification(notification_id, input).await?;
    Ok(Json(ApiResponse::new(notification)))
}

/// Delete a notification
pub async fn delete_notification(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(notification_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = NotificationService::new(state.db);
    service.delete_notification(notification_id).await?;

    tracing::info!(
        "Notification {} deleted by user {}",
        notification_id,
        current_user.0.user_id
    );

    Ok(StatusCode::NO_CONTENT)
}
