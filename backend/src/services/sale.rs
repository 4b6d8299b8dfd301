//! Sale service with transactional stock issuance
//!
//! Creating a sale is the busiest write path in the platform: the header,
//! its line items, every stock decrement and any low-stock notifications
//! all commit in a single transaction. Credit sales additionally move the
//! outstanding balance onto the customer's account, guarded so the credit
//! limit cannot be overrun by concurrent requests.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use shared::reference::generate_ref;
use shared::validation::{validate_amount, validate_quantity, validate_required};

use super::stock;
use crate::error::{AppError, AppResult};
use crate::external::AlertWebhookClient;

/// Sale lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sale_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Pending,
    Completed,
    Cancelled,
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Pending
    }
}

/// Whether the sale was settled up front or taken on credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "sale_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SaleType {
    Paid,
    Credit,
}

impl Default for SaleType {
    fn default() -> Self {
        SaleType::Paid
    }
}

/// Payment method enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    MobileMoney,
    BankTransfer,
    CreditCard,
    Other,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

/// A sale header row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Sale {
    pub id: Uuid,
    pub sale_number: String,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub sale_amount: Decimal,
    pub balance_amount: Decimal,
    pub paid_amount: Decimal,
    pub status: SaleStatus,
    pub sale_type: SaleType,
    pub payment_method: PaymentMethod,
    pub transaction_code: Option<String>,
    pub shop_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sale line item with its product snapshot
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_image: Option<String>,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// A sale with its line items
#[derive(Debug, Clone, Serialize)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: Sale,
    pub sale_items: Vec<SaleItem>,
}

/// Input for creating a sale
#[derive(Debug, Deserialize)]
pub struct CreateSaleInput {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub sale_amount: Decimal,
    #[serde(default)]
    pub balance_amount: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    #[serde(default)]
    pub status: SaleStatus,
    #[serde(default)]
    pub sale_type: SaleType,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub transaction_code: Option<String>,
    pub shop_id: Option<Uuid>,
    pub sale_items: Vec<SaleItemInput>,
}

/// One line item of a sale being created
#[derive(Debug, Deserialize)]
pub struct SaleItemInput {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_price: Decimal,
    pub product_image: Option<String>,
    pub quantity: i32,
}

/// Input for updating a sale header
#[derive(Debug, Deserialize)]
pub struct UpdateSaleInput {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub status: Option<SaleStatus>,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_code: Option<String>,
}

/// Sale service
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
    alert_relay: Option<AlertWebhookClient>,
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            alert_relay: AlertWebhookClient::from_env(),
        }
    }

    /// Create a sale, issuing stock for every line item in one transaction
    pub async fn create_sale(&self, input: CreateSaleInput) -> AppResult<SaleWithItems> {
        validate_required(&input.customer_name).map_err(|msg| AppError::Validation {
            field: "customer_name".to_string(),
            message: msg.to_string(),
        })?;
        validate_amount(input.sale_amount).map_err(|msg| AppError::Validation {
            field: "sale_amount".to_string(),
            message: msg.to_string(),
        })?;
        validate_amount(input.balance_amount).map_err(|msg| AppError::Validation {
            field: "balance_amount".to_string(),
            message: msg.to_string(),
        })?;
        validate_amount(input.paid_amount).map_err(|msg| AppError::Validation {
            field: "paid_amount".to_string(),
            message: msg.to_string(),
        })?;
        if input.sale_items.is_empty() {
            return Err(AppError::Validation {
                field: "sale_items".to_string(),
                message: "At least one line item is required".to_string(),
            });
        }
        for item in &input.sale_items {
            validate_quantity(item.quantity).map_err(|msg| AppError::Validation {
                field: "quantity".to_string(),
                message: msg.to_string(),
            })?;
            validate_amount(item.product_price).map_err(|msg| AppError::Validation {
                field: "product_price".to_string(),
                message: msg.to_string(),
            })?;
        }

        let mut tx = self.db.begin().await?;

        // A sale leaving a balance goes onto the customer's credit account
        if input.balance_amount > Decimal::ZERO {
            extend_customer_credit(&mut tx, input.customer_id, input.balance_amount).await?;
        }

        let sale_number = generate_ref();
        let sale_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO sales (
                sale_number, customer_id, customer_name, customer_email,
                sale_amount, balance_amount, paid_amount,
                status, sale_type, payment_method, transaction_code, shop_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(&sale_number)
        .bind(input.customer_id)
        .bind(&input.customer_name)
        .bind(&input.customer_email)
        .bind(input.sale_amount)
        .bind(input.balance_amount)
        .bind(input.paid_amount)
        .bind(input.status)
        .bind(input.sale_type)
        .bind(input.payment_method)
        .bind(&input.transaction_code)
        .bind(input.shop_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut alerts = Vec::new();
        for item in &input.sale_items {
            // Issue stock first so a vanished product aborts the whole sale
            let product =
                stock::apply_stock_delta(&mut tx, item.product_id, -item.quantity).await?;
            if let Some(notification) = stock::record_depletion_alert(&mut tx, &product).await? {
                alerts.push(notification);
            }

            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    sale_id, product_id, product_name, product_price, product_image, quantity
                )
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(sale_id)
            .bind(product.id)
            .bind(&item.product_name)
            .bind(item.product_price)
            .bind(&item.product_image)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        stock::dispatch_alerts(&self.alert_relay, &alerts).await;

        self.get_sale(sale_id).await
    }

    /// List sale headers, newest first
    pub async fn list_sales(&self) -> AppResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, sale_number, customer_id, customer_name, customer_email,
                   sale_amount, balance_amount, paid_amount,
                   status, sale_type, payment_method, transaction_code, shop_id,
                   created_at, updated_at
            FROM sales
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// List sale headers for one shop, newest first
    pub async fn list_sales_by_shop(&self, shop_id: Uuid) -> AppResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, sale_number, customer_id, customer_name, customer_email,
                   sale_amount, balance_amount, paid_amount,
                   status, sale_type, payment_method, transaction_code, shop_id,
                   created_at, updated_at
            FROM sales
            WHERE shop_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sales)
    }

    /// Get a sale with its line items
    pub async fn get_sale(&self, sale_id: Uuid) -> AppResult<SaleWithItems> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, sale_number, customer_id, customer_name, customer_email,
                   sale_amount, balance_amount, paid_amount,
                   status, sale_type, payment_method, transaction_code, shop_id,
                   created_at, updated_at
            FROM sales
            WHERE id = $1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale".to_string()))?;

        let sale_items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, product_name, product_price,
                   product_image, quantity, created_at
            FROM sale_items
            WHERE sale_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.db)
        .await?;

        Ok(SaleWithItems { sale, sale_items })
    }

    /// Update a sale header. Line items and amounts are immutable once the
    /// sale is recorded; corrections go through stock adjustments.
    pub async fn update_sale(
        &self,
        sale_id: Uuid,
        input: UpdateSaleInput,
    ) -> AppResult<SaleWithItems> {
        let result = sqlx::query(
            r#"
            UPDATE sales SET
                customer_name = COALESCE($2, customer_name),
                customer_email = COALESCE($3, customer_email),
                status = COALESCE($4, status),
                payment_method = COALESCE($5, payment_method),
                transaction_code = COALESCE($6, transaction_code),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(sale_id)
        .bind(&input.customer_name)
        .bind(&input.customer_email)
        .bind(input.status)
        .bind(input.payment_method)
        .bind(&input.transaction_code)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Sale".to_string()));
        }

        self.get_sale(sale_id).await
    }

    /// Delete a sale. Stock issued by the sale is not returned; use a stock
    /// adjustment to put quantities back.
    pub async fn delete_sale(&self, sale_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(sale_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Sale".to_string()));
        }

        Ok(())
    }
}

/// Move a credit balance onto the customer's account.
///
/// The UPDATE re-checks the limit in its WHERE clause, so two concurrent
/// credit sales cannot both pass a read-then-write check and overrun the
/// customer's remaining credit.
async fn extend_customer_credit(
    tx: &mut Transaction<'_, Postgres>,
    customer_id: Uuid,
    balance_amount: Decimal,
) -> AppResult<()> {
    let available = sqlx::query_scalar::<_, Decimal>(
        "SELECT max_credit_limit FROM customers WHERE id = $1",
    )
    .bind(customer_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

    if balance_amount > available {
        return Err(AppError::CreditLimitExceeded {
            requested: balance_amount,
            available,
        });
    }

    let result = sqlx::query(
        r#"
        UPDATE customers
        SET unpaid_credit_amount = unpaid_credit_amount + $1,
            max_credit_limit = max_credit_limit - $1,
            updated_at = NOW()
        WHERE id = $2 AND max_credit_limit >= $1
        "#,
    )
    .bind(balance_amount)
    .bind(customer_id)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::CreditLimitExceeded {
            requested: balance_amount,
            available,
        });
    }

    Ok(())
}
