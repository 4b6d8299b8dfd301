//! Stock adjustment service
//!
//! Adjustments are manual corrections: stock takes, damage write-offs,
//! found stock. Each line item moves one product up (Addition) or down
//! (Subtraction) and the whole document commits atomically with its
//! stock movements and notifications, like a sale or purchase order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use shared::reference::generate_ref;
use shared::validation::{validate_quantity, validate_required};

use super::stock;
use crate::error::{AppError, AppResult};
use crate::external::AlertWebhookClient;

/// Direction of an adjustment line item.
///
/// The enum labels are stored and serialized capitalized, matching the
/// document forms the platform prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "adjustment_kind")]
pub enum AdjustmentKind {
    Addition,
    Subtraction,
}

impl AdjustmentKind {
    /// Signed stock delta for a quantity moved under this kind
    pub fn signed_delta(&self, quantity: i32) -> i32 {
        match self {
            AdjustmentKind::Addition => quantity,
            AdjustmentKind::Subtraction => -quantity,
        }
    }
}

/// A stock adjustment header row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Adjustment {
    pub id: Uuid,
    pub ref_no: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An applied adjustment line item
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdjustmentItem {
    pub id: Uuid,
    pub adjustment_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub kind: AdjustmentKind,
    pub quantity: i32,
    pub current_stock: i32,
    pub created_at: DateTime<Utc>,
}

/// An adjustment with its line items
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentWithItems {
    #[serde(flatten)]
    pub adjustment: Adjustment,
    pub items: Vec<AdjustmentItem>,
}

/// Input for creating a stock adjustment
#[derive(Debug, Deserialize)]
pub struct CreateAdjustmentInput {
    pub reason: String,
    pub items: Vec<AdjustmentItemInput>,
}

/// One line item of an adjustment being applied
#[derive(Debug, Deserialize)]
pub struct AdjustmentItemInput {
    pub product_id: Uuid,
    pub product_name: String,
    pub kind: AdjustmentKind,
    pub quantity: i32,
}

/// Input for updating an adjustment header
#[derive(Debug, Deserialize)]
pub struct UpdateAdjustmentInput {
    pub reason: Option<String>,
}

/// Adjustment service
#[derive(Clone)]
pub struct AdjustmentService {
    db: PgPool,
    alert_relay: Option<AlertWebhookClient>,
}

impl AdjustmentService {
    /// Create a new AdjustmentService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            alert_relay: AlertWebhookClient::from_env(),
        }
    }

    /// Apply a stock adjustment, moving stock for every line item in one
    /// transaction
    pub async fn create_adjustment(
        &self,
        input: CreateAdjustmentInput,
    ) -> AppResult<AdjustmentWithItems> {
        validate_required(&input.reason).map_err(|msg| AppError::Validation {
            field: "reason".to_string(),
            message: msg.to_string(),
        })?;
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "At least one line item is required".to_string(),
            });
        }
        for item in &input.items {
            validate_quantity(item.quantity).map_err(|msg| AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
            })?;
        }

        let mut tx = self.db.begin().await?;

        let ref_no = generate_ref();
        let adjustment_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO adjustments (ref_no, reason) VALUES ($1, $2) RETURNING id",
        )
        .bind(&ref_no)
        .bind(&input.reason)
        .fetch_one(&mut *tx)
        .await?;

        let mut alerts = Vec::new();
        for item in &input.items {
            let delta = item.kind.signed_delta(item.quantity);
            let product = stock::apply_stock_delta(&mut tx, item.product_id, delta).await?;

            // Both kinds use the depletion evaluation: an addition that
            // still leaves the product below threshold stays a warning.
            if let Some(notification) = stock::record_depletion_alert(&mut tx, &product).await? {
                alerts.push(notification);
            }

            // current_stock snapshots the count before this adjustment
            sqlx::query(
                r#"
                INSERT INTO adjustment_items (
                    adjustment_id, product_id, product_name, kind, quantity, current_stock
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(adjustment_id)
            .bind(product.id)
            .bind(&item.product_name)
            .bind(item.kind)
            .bind(item.quantity)
            .bind(product.stock_quantity - delta)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        stock::dispatch_alerts(&self.alert_relay, &alerts).await;

        self.get_adjustment(adjustment_id).await
    }

    /// List adjustments with their line items, newest first
    pub async fn list_adjustments(&self) -> AppResult<Vec<AdjustmentWithItems>> {
        let adjustments = sqlx::query_as::<_, Adjustment>(
            r#"
            SELECT id, ref_no, reason, created_at, updated_at
            FROM adjustments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let adjustment_ids: Vec<Uuid> = adjustments.iter().map(|a| a.id).collect();
        let items = sqlx::query_as::<_, AdjustmentItem>(
            r#"
            SELECT id, adjustment_id, product_id, product_name,
                   kind, quantity, current_stock, created_at
            FROM adjustment_items
            WHERE adjustment_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(&adjustment_ids)
        .fetch_all(&self.db)
        .await?;

        let mut items_by_adjustment: HashMap<Uuid, Vec<AdjustmentItem>> = HashMap::new();
        for item in items {
            items_by_adjustment
                .entry(item.adjustment_id)
                .or_default()
                .push(item);
        }

        Ok(adjustments
            .into_iter()
            .map(|adjustment| {
                let items = items_by_adjustment
                    .remove(&adjustment.id)
                    .unwrap_or_default();
                AdjustmentWithItems { adjustment, items }
            })
            .collect())
    }

    /// Get an adjustment with its line items
    pub async fn get_adjustment(&self, adjustment_id: Uuid) -> AppResult<AdjustmentWithItems> {
        let adjustment = sqlx::query_as::<_, Adjustment>(
            r#"
            SELECT id, ref_no, reason, created_at, updated_at
            FROM adjustments
            WHERE id = $1
            "#,
        )
        .bind(adjustment_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Adjustment".to_string()))?;

        let items = sqlx::query_as::<_, AdjustmentItem>(
            r#"
            SELECT id, adjustment_id, product_id, product_name,
                   kind, quantity, current_stock, created_at
            FROM adjustment_items
            WHERE adjustment_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(adjustment_id)
        .fetch_all(&self.db)
        .await?;

        Ok(AdjustmentWithItems { adjustment, items })
    }

    /// Update an adjustment's reason. Applied stock movements are immutable;
    /// a wrong adjustment is corrected by a new one in the other direction.
    pub async fn update_adjustment(
        &self,
        adjustment_id: Uuid,
        input: UpdateAdjustmentInput,
    ) -> AppResult<AdjustmentWithItems> {
        if let Some(reason) = &input.reason {
            validate_required(reason).map_err(|msg| AppError::Validation {
                field: "reason".to_string(),
                message: msg.to_string(),
            })?;
        }

        let result = sqlx::query(
            r#"
            UPDATE adjustments
            SET reason = COALESCE($2, reason), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(adjustment_id)
        .bind(&input.reason)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Adjustment".to_string()));
        }

        self.get_adjustment(adjustment_id).await
    }

    /// Delete an adjustment. Its stock movements stay applied; the record
    /// alone is removed.
    pub async fn delete_adjustment(&self, adjustment_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM adjustments WHERE id = $1")
            .bind(adjustment_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Adjustment".to_string()));
        }

        Ok(())
    }
}
