//! Purchase order service with transactional stock receipt
//!
//! Receiving a purchase order increments stock for every line item and
//! records replenishment notifications for products still sitting below
//! their alert threshold, all in the same transaction as the order itself.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

use shared::reference::generate_ref;
use shared::validation::{validate_amount, validate_quantity};

use super::stock;
use crate::error::{AppError, AppResult};
use crate::external::AlertWebhookClient;

/// Settlement status of a purchase order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "purchase_order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Paid,
    Unpaid,
    Partial,
}

/// A purchase order header row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub ref_no: String,
    pub supplier_id: Uuid,
    pub status: PurchaseOrderStatus,
    pub discount: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub shipping_cost: Option<Decimal>,
    pub balance_amount: Decimal,
    pub total_amount: Decimal,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A received purchase order line item
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PurchaseOrderItem {
    pub id: Uuid,
    pub purchase_order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub sub_total: Decimal,
    pub current_stock: i32,
    pub created_at: DateTime<Utc>,
}

/// A purchase order with its line items
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderWithItems {
    #[serde(flatten)]
    pub purchase_order: PurchaseOrder,
    pub items: Vec<PurchaseOrderItem>,
}

/// Input for creating a purchase order
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderInput {
    pub supplier_id: Uuid,
    pub status: PurchaseOrderStatus,
    pub discount: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub shipping_cost: Option<Decimal>,
    #[serde(default)]
    pub balance_amount: Decimal,
    pub total_amount: Decimal,
    pub note: Option<String>,
    pub items: Vec<PurchaseOrderItemInput>,
}

/// One line item of a purchase order being received
#[derive(Debug, Deserialize)]
pub struct PurchaseOrderItemInput {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_cost: Decimal,
    pub sub_total: Decimal,
}

/// Input for updating a purchase order header
#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseOrderInput {
    pub status: Option<PurchaseOrderStatus>,
    pub discount: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub shipping_cost: Option<Decimal>,
    pub balance_amount: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub note: Option<String>,
}

/// Purchase order service
#[derive(Clone)]
pub struct PurchaseOrderService {
    db: PgPool,
    alert_relay: Option<AlertWebhookClient>,
}

impl PurchaseOrderService {
    /// Create a new PurchaseOrderService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            alert_relay: AlertWebhookClient::from_env(),
        }
    }

    /// Create a purchase order, receiving stock for every line item in one
    /// transaction
    pub async fn create_purchase_order(
        &self,
        input: CreatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrderWithItems> {
        validate_amount(input.total_amount).map_err(|msg| AppError::Validation {
            field: "total_amount".to_string(),
            message: msg.to_string(),
        })?;
        validate_amount(input.balance_amount).map_err(|msg| AppError::Validation {
            field: "balance_amount".to_string(),
            message: msg.to_string(),
        })?;
        if let Some(discount) = input.discount {
            validate_amount(discount).map_err(|msg| AppError::Validation {
                field: "discount".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(tax) = input.tax {
            validate_amount(tax).map_err(|msg| AppError::Validation {
                field: "tax".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(shipping_cost) = input.shipping_cost {
            validate_amount(shipping_cost).map_err(|msg| AppError::Validation {
                field: "shipping_cost".to_string(),
                message: msg.to_string(),
            })?;
        }
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
            validate_amount(item.unit_cost).map_err(|msg| AppError::Validation {
                field: "unit_cost".to_string(),
                message: msg.to_string(),
            })?;
            validate_amount(item.sub_total).map_err(|msg| AppError::Validation {
                field: "sub_total".to_string(),
                message: msg.to_string(),
            })?;
        }

        let mut tx = self.db.begin().await?;

        let ref_no = generate_ref();
        let purchase_order_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO purchase_orders (
                ref_no, supplier_id, status, discount, tax, shipping_cost,
                balance_amount, total_amount, note
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&ref_no)
        .bind(input.supplier_id)
        .bind(input.status)
        .bind(input.discount)
        .bind(input.tax)
        .bind(input.shipping_cost)
        .bind(input.balance_amount)
        .bind(input.total_amount)
        .bind(&input.note)
        .fetch_one(&mut *tx)
        .await?;

        let mut alerts = Vec::new();
        for item in &input.items {
            let product =
                stock::apply_stock_delta(&mut tx, item.product_id, item.quantity).await?;
            if let Some(notification) =
                stock::record_replenishment_alert(&mut tx, &product).await?
            {
                alerts.push(notification);
            }

            // current_stock snapshots the count before this receipt
            sqlx::query(
                r#"
                INSERT INTO purchase_order_items (
                    purchase_order_id, product_id, product_name,
                    quantity, unit_cost, sub_total, current_stock
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(purchase_order_id)
            .bind(product.id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit_cost)
            .bind(item.sub_total)
            .bind(product.stock_quantity - item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        stock::dispatch_alerts(&self.alert_relay, &alerts).await;

        self.get_purchase_order(purchase_order_id).await
    }

    /// List purchase orders with their line items, newest first
    pub async fn list_purchase_orders(&self) -> AppResult<Vec<PurchaseOrderWithItems>> {
        let orders = sqlx::query_as::<_, PurchaseOrder>(
            r#"
            SELECT id, ref_no, supplier_id, status, discount, tax, shipping_cost,
                   balance_amount, total_amount, note, created_at, updated_at
            FROM purchase_orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let order_ids: Vec<Uuid> = orders.iter().map(|order| order.id).collect();
        let items = sqlx::query_as::<_, PurchaseOrderItem>(
            r#"
            SELECT id, purchase_order_id, product_id, product_name,
                   quantity, unit_cost, sub_total, current_stock, created_at
            FROM purchase_order_items
            WHERE purchase_order_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(&order_ids)
        .fetch_all(&self.db)
        .await?;

        let mut items_by_order: HashMap<Uuid, Vec<PurchaseOrderItem>> = HashMap::new();
        for item in items {
            items_by_order
                .entry(item.purchase_order_id)
                .or_default()
                .push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                PurchaseOrderWithItems {
                    purchase_order: order,
                    items,
                }
            })
            .collect())
    }

    /// Get a purchase order with its line items
    pub async fn get_purchase_order(
        &self,
        purchase_order_id: Uuid,
    ) -> AppResult<PurchaseOrderWithItems> {
        let purchase_order = sqlx::query_as::<_, PurchaseOrder>(
            r#"
            SELECT id, ref_no, supplier_id, status, discount, tax, shipping_cost,
                   balance_amount, total_amount, note, created_at, updated_at
            FROM purchase_orders
            WHERE id = $1
            "#,
        )
        .bind(purchase_order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        let items = sqlx::query_as::<_, PurchaseOrderItem>(
            r#"
            SELECT id, purchase_order_id, product_id, product_name,
                   quantity, unit_cost, sub_total, current_stock, created_at
            FROM purchase_order_items
            WHERE purchase_order_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(purchase_order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(PurchaseOrderWithItems {
            purchase_order,
            items,
        })
    }

    /// Update a purchase order header. Line items and received stock are
    /// immutable; corrections go through stock adjustments.
    pub async fn update_purchase_order(
        &self,
        purchase_order_id: Uuid,
        input: UpdatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrderWithItems> {
        if let Some(balance_amount) = input.balance_amount {
            validate_amount(balance_amount).map_err(|msg| AppError::Validation {
                field: "balance_amount".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(total_amount) = input.total_amount {
            validate_amount(total_amount).map_err(|msg| AppError::Validation {
                field: "total_amount".to_string(),
                message: msg.to_string(),
            })?;
        }

        let result = sqlx::query(
            r#"
            UPDATE purchase_orders SET
                status = COALESCE($2, status),
                discount = COALESCE($3, discount),
                tax = COALESCE($4, tax),
                shipping_cost = COALESCE($5, shipping_cost),
                balance_amount = COALESCE($6, balance_amount),
                total_amount = COALESCE($7, total_amount),
                note = COALESCE($8, note),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(purchase_order_id)
        .bind(input.status)
        .bind(input.discount)
        .bind(input.tax)
        .bind(input.shipping_cost)
        .bind(input.balance_amount)
        .bind(input.total_amount)
        .bind(&input.note)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Purchase order".to_string()));
        }

        self.get_purchase_order(purchase_order_id).await
    }

    /// Delete a purchase order. Stock received through the order stays on
    /// hand; use a stock adjustment to remove quantities.
    pub async fn delete_purchase_order(&self, purchase_order_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM purchase_orders WHERE id = $1")
            .bind(purchase_order_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Purchase order".to_string()));
        }

        Ok(())
    }
}
