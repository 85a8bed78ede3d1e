//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Filters
//! Every query takes an optional [`ProductFilter`]. Each variant maps to one
//! WHERE clause with the same semantics as `ProductFilter::matches`:
//!
//! ```text
//! ById(id)                 → WHERE product_id = ?
//! ByName(name)             → WHERE product_name = ?          (BINARY, case-sensitive)
//! ByCategory(id)           → WHERE category_id = ?
//! ByUnitPrice { min, max } → WHERE unit_price BETWEEN ? AND ? (inclusive)
//! ```

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use catalog_core::{Product, ProductDetail, ProductFilter};

const SELECT_PRODUCTS: &str =
    "SELECT product_id, category_id, product_name, units_in_stock, unit_price FROM products";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// repo.add(&product).await?;
/// let chai = repo.get(&ProductFilter::ById(1)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - product_id already exists
    /// * `Err(DbError::ForeignKeyViolation)` - category doesn't exist
    pub async fn add(&self, product: &Product) -> DbResult<()> {
        debug!(
            product_id = product.product_id,
            name = %product.product_name,
            "Inserting product"
        );

        sqlx::query(
            r#"
            INSERT INTO products (
                product_id, category_id, product_name, units_in_stock, unit_price
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(product.product_id)
        .bind(product.category_id)
        .bind(product.product_name.as_str())
        .bind(product.units_in_stock)
        .bind(product.unit_price)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns the first product matching `filter`, if any.
    pub async fn get(&self, filter: &ProductFilter) -> DbResult<Option<Product>> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_PRODUCTS);
        push_filter(&mut query, filter);
        query.push(" ORDER BY product_id LIMIT 1");

        let product = query
            .build_query_as::<Product>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Returns every product matching `filter`, or all products for `None`.
    ///
    /// Ordered by product_id.
    pub async fn get_all(&self, filter: Option<&ProductFilter>) -> DbResult<Vec<Product>> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_PRODUCTS);
        if let Some(filter) = filter {
            push_filter(&mut query, filter);
        }
        query.push(" ORDER BY product_id");

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(?filter, count = products.len(), "Loaded products");
        Ok(products)
    }

    /// Products joined with their category names.
    ///
    /// Products whose category row is missing are left out (inner join).
    pub async fn get_product_details(&self) -> DbResult<Vec<ProductDetail>> {
        let details = sqlx::query_as::<_, ProductDetail>(
            r#"
            SELECT
                p.product_id,
                p.product_name,
                c.category_name,
                p.units_in_stock
            FROM products p
            INNER JOIN categories c ON c.category_id = p.category_id
            ORDER BY p.product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Sqlite>, filter: &ProductFilter) {
    match filter {
        ProductFilter::ById(id) => {
            query.push(" WHERE product_id = ").push_bind(*id);
        }
        ProductFilter::ByName(name) => {
            query.push(" WHERE product_name = ").push_bind(name.clone());
        }
        ProductFilter::ByCategory(id) => {
            query.push(" WHERE category_id = ").push_bind(*id);
        }
        ProductFilter::ByUnitPrice { min, max } => {
            query
                .push(" WHERE unit_price BETWEEN ")
                .push_bind(min.cents())
                .push(" AND ")
                .push_bind(max.cents());
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
