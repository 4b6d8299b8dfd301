//! Notification service for stock alerts
//!
//! Notifications are produced by the stock mutation core when a movement
//! leaves a product out of stock, below its alert threshold, or freshly
//! replenished while still below it. This service only reads and manages
//! the persisted rows; creation happens inside the document transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::stock::AlertSeverity;

use crate::error::{AppError, AppResult};

/// Severity of a persisted notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_severity", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationSeverity {
    Info,
    Warning,
    Danger,
}

impl NotificationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationSeverity::Info => "info",
            NotificationSeverity::Warning => "warning",
            NotificationSeverity::Danger => "danger",
        }
    }
}

impl From<AlertSeverity> for NotificationSeverity {
    fn from(severity: AlertSeverity) -> Self {
        match severity {
            AlertSeverity::Info => NotificationSeverity::Info,
            AlertSeverity::Warning => NotificationSeverity::Warning,
            AlertSeverity::Danger => NotificationSeverity::Danger,
        }
    }
}

/// A stored stock notification
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: NotificationSeverity,
    pub status_text: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for updating a notification
#[derive(Debug, Deserialize)]
pub struct UpdateNotificationInput {
    pub read: Option<bool>,
}

/// Notification service
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all notifications, newest first
    pub async fn list_notifications(&self) -> AppResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, message, severity, status_text, read, created_at, updated_at
            FROM notifications
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(notifications)
    }

    /// Get a single notification
    pub async fn get_notification(&self, notification_id: Uuid) -> AppResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, message, severity, status_text, read, created_at, updated_at
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(notification_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification".to_string()))?;

        Ok(notification)
    }

    /// Count notifications not yet marked as read
    pub async fn unread_count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE read = FALSE",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    /// Update a notification's read flag
    pub async fn update_notification(
        &self,
        notification_id: Uuid,
        input: UpdateNotificationInput,
    ) -> AppResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications
            SET read = COALESCE($2, read), updated_at = NOW()
            WHERE id = $1
            RETURNING id, message, severity, status_text, read, created_at, updated_at
            "#,
        )
        .bind(notification_id)
        .bind(input.read)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification".to_string()))?;

        Ok(notification)
    }

    /// Delete a notification
    pub async fn delete_notification(&self, notification_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(notification_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Notification".to_string()));
        }

        Ok(())
    }
}
