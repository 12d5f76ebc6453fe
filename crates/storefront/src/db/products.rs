//! Product repository for database operations.
//!
//! Queries use the runtime `query_as` API rather than the compile-time
//! macros so the workspace builds without a live database.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use loomwear_core::{Category, Product, ProductId};

use super::RepositoryError;

/// Columns selected for every product query, in `ProductRow` order.
const PRODUCT_COLUMNS: &str =
    "id, name, price, description, image, category, subcategory, in_stock, sizes, created_at";

/// Raw product row as stored in the database.
///
/// The category is kept as text here and parsed on conversion; a row with an
/// unknown category is reported as data corruption rather than silently
/// dropped.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
    description: String,
    image: String,
    category: String,
    subcategory: String,
    in_stock: bool,
    sizes: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = Category::from_str(&row.category).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid category in database: {e}"))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
            image: row.image,
            category,
            subcategory: row.subcategory,
            in_stock: row.in_stock,
            sizes: row.sizes,
            created_at: row.created_at,
        })
    }
}

/// A product to be inserted by the seed command.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image: String,
    pub category: Category,
    pub subcategory: String,
    pub in_stock: bool,
    pub sizes: Vec<String>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the full catalog, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored category is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Fetch the distinct categories present in the catalog, sorted by name.
    ///
    /// The synthetic `"All"` entry is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT category FROM product ORDER BY category")
                .fetch_all(self.pool)
                .await?;
        Ok(categories)
    }

    /// Fetch a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored category is invalid.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> =
            sqlx::query_as(&format!("SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        row.map(Product::try_from).transpose()
    }

    /// Insert a product and return its generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, product: &NewProduct) -> Result<ProductId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO product (name, price, description, image, category, subcategory, in_stock, sizes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image)
        .bind(product.category.as_str())
        .bind(&product.subcategory)
        .bind(product.in_stock)
        .bind(&product.sizes)
        .fetch_one(self.pool)
        .await?;

        Ok(ProductId::new(id))
    }

    /// Delete every product. Used by the seed command before re-seeding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM product").execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}
