//! Product catalog service
//!
//! Products carry the authoritative `stock_quantity` that the document
//! workflows mutate. Four of their identifiers are unique (slug, SKU,
//! product code and, when present, barcode); creates and updates probe
//! for collisions first so the API can report which field clashed
//! instead of surfacing a bare constraint violation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::validation::{
    validate_alert_quantity, validate_amount, validate_required, validate_slug,
};

use crate::error::{AppError, AppResult};

/// A product row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub product_code: String,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
    pub wholesale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub alert_quantity: i32,
    pub stock_quantity: i32,
    pub unit_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub shop_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub product_code: String,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Decimal,
    pub wholesale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub alert_quantity: i32,
    #[serde(default)]
    pub stock_quantity: i32,
    pub unit_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub shop_id: Option<Uuid>,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub sku: Option<String>,
    pub product_code: Option<String>,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<Decimal>,
    pub wholesale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub tax_rate: Option<Decimal>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub alert_quantity: Option<i32>,
    pub unit_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub shop_id: Option<Uuid>,
}

/// Columns probed for unique-field collisions
#[derive(Debug, sqlx::FromRow)]
struct UniqueFieldsRow {
    slug: String,
    sku: String,
    product_code: String,
}

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        validate_required(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;
        validate_slug(&input.slug).map_err(|msg| AppError::Validation {
            field: "slug".to_string(),
            message: msg.to_string(),
        })?;
        validate_required(&input.sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;
        validate_required(&input.product_code).map_err(|msg| AppError::Validation {
            field: "product_code".to_string(),
            message: msg.to_string(),
        })?;
        validate_amount(input.price).map_err(|msg| AppError::Validation {
            field: "price".to_string(),
            message: msg.to_string(),
        })?;
        validate_alert_quantity(input.alert_quantity).map_err(|msg| AppError::Validation {
            field: "alert_quantity".to_string(),
            message: msg.to_string(),
        })?;
        if input.stock_quantity < 0 {
            return Err(AppError::Validation {
                field: "stock_quantity".to_string(),
                message: "Opening stock cannot be negative".to_string(),
            });
        }

        self.check_unique_fields(
            &input.slug,
            &input.sku,
            &input.product_code,
            input.barcode.as_deref(),
            None,
        )
        .await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (
                name, slug, sku, product_code, barcode, description, image,
                price, wholesale_price, cost_price, tax_rate,
                batch_number, expiry_date, alert_quantity, stock_quantity,
                unit_id, brand_id, category_id, supplier_id, shop_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING id, name, slug, sku, product_code, barcode, description, image,
                      price, wholesale_price, cost_price, tax_rate,
                      batch_number, expiry_date, alert_quantity, stock_quantity,
                      unit_id, brand_id, category_id, supplier_id, shop_id,
                      created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.sku)
        .bind(&input.product_code)
        .bind(&input.barcode)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.price)
        .bind(input.wholesale_price)
        .bind(input.cost_price)
        .bind(input.tax_rate)
        .bind(&input.batch_number)
        .bind(input.expiry_date)
        .bind(input.alert_quantity)
        .bind(input.stock_quantity)
        .bind(input.unit_id)
        .bind(input.brand_id)
        .bind(input.category_id)
        .bind(input.supplier_id)
        .bind(input.shop_id)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// List products, newest first
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, slug, sku, product_code, barcode, description, image,
                   price, wholesale_price, cost_price, tax_rate,
                   batch_number, expiry_date, alert_quantity, stock_quantity,
                   unit_id, brand_id, category_id, supplier_id, shop_id,
                   created_at, updated_at
            FROM products
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(products)
    }

    /// Get a single product
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, slug, sku, product_code, barcode, description, image,
                   price, wholesale_price, cost_price, tax_rate,
                   batch_number, expiry_date, alert_quantity, stock_quantity,
                   unit_id, brand_id, category_id, supplier_id, shop_id,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(product)
    }

    /// Update a product. Stock counts are not patchable here; they move
    /// only through sales, purchase orders and adjustments.
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = self.get_product(product_id).await?;

        if let Some(name) = &input.name {
            validate_required(name).map_err(|msg| AppError::Validation {
                field: "name".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(slug) = &input.slug {
            validate_slug(slug).map_err(|msg| AppError::Validation {
                field: "slug".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(price) = input.price {
            validate_amount(price).map_err(|msg| AppError::Validation {
                field: "price".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(alert_quantity) = input.alert_quantity {
            validate_alert_quantity(alert_quantity).map_err(|msg| AppError::Validation {
                field: "alert_quantity".to_string(),
                message: msg.to_string(),
            })?;
        }

        let slug = input.slug.as_deref().unwrap_or(&existing.slug);
        let sku = input.sku.as_deref().unwrap_or(&existing.sku);
        let product_code = input.product_code.as_deref().unwrap_or(&existing.product_code);
        let barcode = input.barcode.as_deref().or(existing.barcode.as_deref());
        self.check_unique_fields(slug, sku, product_code, barcode, Some(product_id))
            .await?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                sku = COALESCE($4, sku),
                product_code = COALESCE($5, product_code),
                barcode = COALESCE($6, barcode),
                description = COALESCE($7, description),
                image = COALESCE($8, image),
                price = COALESCE($9, price),
                wholesale_price = COALESCE($10, wholesale_price),
                cost_price = COALESCE($11, cost_price),
                tax_rate = COALESCE($12, tax_rate),
                batch_number = COALESCE($13, batch_number),
                expiry_date = COALESCE($14, expiry_date),
                alert_quantity = COALESCE($15, alert_quantity),
                unit_id = COALESCE($16, unit_id),
                brand_id = COALESCE($17, brand_id),
                category_id = COALESCE($18, category_id),
                supplier_id = COALESCE($19, supplier_id),
                shop_id = COALESCE($20, shop_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, sku, product_code, barcode, description, image,
                      price, wholesale_price, cost_price, tax_rate,
                      batch_number, expiry_date, alert_quantity, stock_quantity,
                      unit_id, brand_id, category_id, supplier_id, shop_id,
                      created_at, updated_at
            "#,
        )
        .bind(product_id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.sku)
        .bind(&input.product_code)
        .bind(&input.barcode)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.price)
        .bind(input.wholesale_price)
        .bind(input.cost_price)
        .bind(input.tax_rate)
        .bind(&input.batch_number)
        .bind(input.expiry_date)
        .bind(input.alert_quantity)
        .bind(input.unit_id)
        .bind(input.brand_id)
        .bind(input.category_id)
        .bind(input.supplier_id)
        .bind(input.shop_id)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// Delete a product
    pub async fn delete_product(&self, product_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        Ok(())
    }

    /// Probe the unique identifier columns and report which one collides
    async fn check_unique_fields(
        &self,
        slug: &str,
        sku: &str,
        product_code: &str,
        barcode: Option<&str>,
        exclude_id: Option<Uuid>,
    ) -> AppResult<()> {
        let existing = sqlx::query_as::<_, UniqueFieldsRow>(
            r#"
            SELECT slug, sku, product_code
            FROM products
            WHERE (slug = $1 OR sku = $2 OR product_code = $3
                   OR ($4::text IS NOT NULL AND barcode = $4))
              AND ($5::uuid IS NULL OR id <> $5)
            LIMIT 1
            "#,
        )
        .bind(slug)
        .bind(sku)
        .bind(product_code)
        .bind(barcode)
        .bind(exclude_id)
        .fetch_optional(&self.db)
        .await?;

        if let Some(row) = existing {
            let (field, value) = if row.slug == slug {
                ("slug", slug.to_string())
            } else if row.sku == sku {
                ("sku", sku.to_string())
            } else if row.product_code == product_code {
                ("product_code", product_code.to_string())
            } else {
                ("barcode", barcode.unwrap_or("").to_string())
            };

            return Err(AppError::DuplicateEntry {
                field: field.to_string(),
                value,
            });
        }

        Ok(())
    }
}
