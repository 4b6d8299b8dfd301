//! Stock mutation core shared by the document workflows
//!
//! Every stock movement in the platform goes through `apply_stock_delta`:
//! one atomic field-level increment against the product's authoritative
//! `stock_quantity`. The alert helpers evaluate the post-mutation count
//! (pure logic in the `shared` crate) and persist any notification inside
//! the caller's transaction, so a document and its alerts commit together.

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use shared::stock::{depletion_alert, replenishment_alert, StockAlert};

use super::notification::{Notification, NotificationSeverity};
use crate::error::{AppError, AppResult};
use crate::external::AlertWebhookClient;

/// Product fields returned by a stock mutation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductStock {
    pub id: Uuid,
    pub name: String,
    pub stock_quantity: i32,
    pub alert_quantity: i32,
}

/// Apply a signed quantity delta to a product's stock count.
///
/// Positive deltas are receipts and addition adjustments, negative deltas
/// are sale issuance and subtraction adjustments. The increment is a single
/// UPDATE so concurrent line items never lose updates. A missing product
/// fails the caller's whole transaction.
pub async fn apply_stock_delta(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    delta: i32,
) -> AppResult<ProductStock> {
    sqlx::query_as::<_, ProductStock>(
        r#"
        UPDATE products
        SET stock_quantity = stock_quantity + $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, name, stock_quantity, alert_quantity
        "#,
    )
    .bind(delta)
    .bind(product_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(AppError::StockMutationFailed(product_id))
}

/// Evaluate a depleting movement and persist the resulting notification,
/// if any, in the same transaction.
pub async fn record_depletion_alert(
    tx: &mut Transaction<'_, Postgres>,
    product: &ProductStock,
) -> AppResult<Option<Notification>> {
    match depletion_alert(&product.name, product.stock_quantity, product.alert_quantity) {
        Some(alert) => Ok(Some(insert_notification(tx, &alert).await?)),
        None => Ok(None),
    }
}

/// Evaluate a replenishing movement (purchase-order receipt) and persist
/// the resulting notification, if any, in the same transaction.
pub async fn record_replenishment_alert(
    tx: &mut Transaction<'_, Postgres>,
    product: &ProductStock,
) -> AppResult<Option<Notification>> {
    match replenishment_alert(&product.name, product.stock_quantity, product.alert_quantity) {
        Some(alert) => Ok(Some(insert_notification(tx, &alert).await?)),
        None => Ok(None),
    }
}

/// Insert a stock alert as a notification row
async fn insert_notification(
    tx: &mut Transaction<'_, Postgres>,
    alert: &StockAlert,
) -> AppResult<Notification> {
    let notification = sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (message, severity, status_text)
        VALUES ($1, $2, $3)
        RETURNING id, message, severity, status_text, read, created_at, updated_at
        "#,
    )
    .bind(&alert.message)
    .bind(NotificationSeverity::from(alert.severity))
    .bind(&alert.status_text)
    .fetch_one(&mut **tx)
    .await?;

    Ok(notification)
}

/// Forward committed stock notifications to the external alert webhook.
///
/// Runs after the document transaction has committed. Relay failures are
/// logged and swallowed: the document is already durable and an unreachable
/// webhook must not fail the request.
pub async fn dispatch_alerts(relay: &Option<AlertWebhookClient>, notifications: &[Notification]) {
    let client = match relay {
        Some(client) => client,
        None => return,
    };

    for notification in notifications {
        if let Err(e) = client
            .send_stock_alert(
                &notification.message,
                notification.severity.as_str(),
                &notification.status_text,
            )
            .await
        {
            tracing::warn!("Failed to relay stock alert {}: {}", notification.id, e);
        }
    }
}
