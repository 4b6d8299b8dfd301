//! Customer service
//!
//! Customers carry the credit account used by credit sales: the remaining
//! `max_credit_limit` and the running `unpaid_credit_amount`. Both move
//! together inside the sale transaction; this service never touches them
//! directly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::validation::{validate_amount, validate_email, validate_phone, validate_required};

use crate::error::{AppError, AppResult};

/// Customer segment enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "customer_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    Retail,
    Wholesale,
    Distributor,
    Other,
}

/// A customer row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub customer_type: CustomerType,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub tax_pin: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub max_credit_limit: Decimal,
    pub max_credit_days: Option<i32>,
    pub unpaid_credit_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a customer
#[derive(Debug, Deserialize)]
pub struct CreateCustomerInput {
    pub customer_type: CustomerType,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub tax_pin: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub max_credit_limit: Decimal,
    pub max_credit_days: Option<i32>,
}

/// Input for updating a customer
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerInput {
    pub customer_type: Option<CustomerType>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub tax_pin: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub max_credit_limit: Option<Decimal>,
    pub max_credit_days: Option<i32>,
}

/// Customer service
#[derive(Clone)]
pub struct CustomerService {
    db: PgPool,
}

impl CustomerService {
    /// Create a new CustomerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a customer
    pub async fn create_customer(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        validate_required(&input.first_name).map_err(|msg| AppError::Validation {
            field: "first_name".to_string(),
            message: msg.to_string(),
        })?;
        validate_required(&input.last_name).map_err(|msg| AppError::Validation {
            field: "last_name".to_string(),
            message: msg.to_string(),
        })?;
        validate_phone(&input.phone).map_err(|msg| AppError::Validation {
            field: "phone".to_string(),
            message: msg.to_string(),
        })?;
        if let Some(email) = &input.email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            })?;
        }
        validate_amount(input.max_credit_limit).map_err(|msg| AppError::Validation {
            field: "max_credit_limit".to_string(),
            message: msg.to_string(),
        })?;

        if let Some(email) = &input.email {
            self.check_duplicate_email(email, None).await?;
        }

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (
                customer_type, first_name, last_name, phone, email,
                national_id, tax_pin, country, location,
                max_credit_limit, max_credit_days
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, customer_type, first_name, last_name, phone, email,
                      national_id, tax_pin, country, location,
                      max_credit_limit, max_credit_days, unpaid_credit_amount,
                      created_at, updated_at
            "#,
        )
        .bind(input.customer_type)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.national_id)
        .bind(&input.tax_pin)
        .bind(&input.country)
        .bind(&input.location)
        .bind(input.max_credit_limit)
        .bind(input.max_credit_days)
        .fetch_one(&self.db)
        .await?;

        Ok(customer)
    }

    /// List customers, newest first
    pub async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, customer_type, first_name, last_name, phone, email,
                   national_id, tax_pin, country, location,
                   max_credit_limit, max_credit_days, unpaid_credit_amount,
                   created_at, updated_at
            FROM customers
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(customers)
    }

    /// Get a single customer
    pub async fn get_customer(&self, customer_id: Uuid) -> AppResult<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, customer_type, first_name, last_name, phone, email,
                   national_id, tax_pin, country, location,
                   max_credit_limit, max_credit_days, unpaid_credit_amount,
                   created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

        Ok(customer)
    }

    /// Update a customer. The unpaid credit balance is not patchable; it
    /// moves only through credit sales.
    pub async fn update_customer(
        &self,
        customer_id: Uuid,
        input: UpdateCustomerInput,
    ) -> AppResult<Customer> {
        if let Some(first_name) = &input.first_name {
            validate_required(first_name).map_err(|msg| AppError::Validation {
                field: "first_name".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(last_name) = &input.last_name {
            validate_required(last_name).map_err(|msg| AppError::Validation {
                field: "last_name".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(phone) = &input.phone {
            validate_phone(phone).map_err(|msg| AppError::Validation {
                field: "phone".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(email) = &input.email {
            validate_email(email).map_err(|msg| AppError::Validation {
                field: "email".to_string(),
                message: msg.to_string(),
            })?;
            self.check_duplicate_email(email, Some(customer_id)).await?;
        }
        if let Some(max_credit_limit) = input.max_credit_limit {
            validate_amount(max_credit_limit).map_err(|msg| AppError::Validation {
                field: "max_credit_limit".to_string(),
                message: msg.to_string(),
            })?;
        }

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers SET
                customer_type = COALESCE($2, customer_type),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                national_id = COALESCE($7, national_id),
                tax_pin = COALESCE($8, tax_pin),
                country = COALESCE($9, country),
                location = COALESCE($10, location),
                max_credit_limit = COALESCE($11, max_credit_limit),
                max_credit_days = COALESCE($12, max_credit_days),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, customer_type, first_name, last_name, phone, email,
                      national_id, tax_pin, country, location,
                      max_credit_limit, max_credit_days, unpaid_credit_amount,
                      created_at, updated_at
            "#,
        )
        .bind(customer_id)
        .bind(input.customer_type)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.national_id)
        .bind(&input.tax_pin)
        .bind(&input.country)
        .bind(&input.location)
        .bind(input.max_credit_limit)
        .bind(input.max_credit_days)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer".to_string()))?;

        Ok(customer)
    }

    /// Delete a customer
    pub async fn delete_customer(&self, customer_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(customer_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Customer".to_string()));
        }

        Ok(())
    }

    /// Probe for another customer already holding this email
    async fn check_duplicate_email(
        &self,
        email: &str,
        exclude_id: Option<Uuid>,
    ) -> AppResult<()> {
        let existing = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM customers
            WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_optional(&self.db)
        .await?;

        if existing.is_some() {
            return Err(AppError::DuplicateEntry {
                field: "email".to_string(),
                value: email.to_string(),
            });
        }

        Ok(())
    }
}
