//! # Domain Types
//!
//! Core domain types used throughout the catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐        ┌──────────────────┐                      │
//! │  │    Product       │  N : 1 │    Category      │                      │
//! │  │  ──────────────  │───────►│  ──────────────  │                      │
//! │  │  product_id      │        │  category_id     │                      │
//! │  │  category_id     │        │  category_name   │                      │
//! │  │  product_name    │        └──────────────────┘                      │
//! │  │  units_in_stock  │                                                   │
//! │  │  unit_price      │        ┌──────────────────┐                      │
//! │  └──────────────────┘        │  ProductDetail   │  (joined projection) │
//! │                              │  product + name  │                      │
//! │                              │  of its category │                      │
//! │                              └──────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are integers assigned by whoever creates the entity; the
//! catalog never generates them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Product identifier.
pub type ProductId = i64;

/// Category identifier.
pub type CategoryId = i64;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Unique identifier, assigned externally.
    pub product_id: ProductId,

    /// Category this product belongs to.
    pub category_id: CategoryId,

    /// Display name. Unique across the catalog at insert time.
    pub product_name: String,

    /// Units currently in stock.
    pub units_in_stock: i32,

    /// Price per unit.
    pub unit_price: Money,
}

impl Product {
    pub fn new(
        product_id: ProductId,
        category_id: CategoryId,
        product_name: impl Into<String>,
        unit_price: Money,
    ) -> Self {
        Product {
            product_id,
            category_id,
            product_name: product_name.into(),
            units_in_stock: 0,
            unit_price,
        }
    }

    pub fn with_units_in_stock(mut self, units: i32) -> Self {
        self.units_in_stock = units;
        self
    }
}

// =============================================================================
// Category
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub category_id: CategoryId,
    pub category_name: String,
}

impl Category {
    pub fn new(category_id: CategoryId, category_name: impl Into<String>) -> Self {
        Category {
            category_id,
            category_name: category_name.into(),
        }
    }
}

// =============================================================================
// Product Detail
// =============================================================================

/// Product joined with the name of its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ProductDetail {
    pub product_id: ProductId,
    pub product_name: String,
    pub category_name: String,
    pub units_in_stock: i32,
}

// =============================================================================
// Product Filter
// =============================================================================

/// Selection criteria understood by every product store.
///
/// SQL stores translate each variant to a WHERE clause; in-memory stores call
/// [`ProductFilter::matches`]. Both must agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    ById(ProductId),
    /// Exact, case-sensitive name match.
    ByName(String),
    ByCategory(CategoryId),
    /// Inclusive on both ends: `min <= unit_price <= max`.
    ByUnitPrice { min: Money, max: Money },
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::ById(id) => product.product_id == *id,
            ProductFilter::ByName(name) => product.product_name == *name,
            ProductFilter::ByCategory(id) => product.category_id == *id,
            ProductFilter::ByUnitPrice { min, max } => {
                *min <= product.unit_price && product.unit_price <= *max
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chai() -> Product {
        Product::new(1, 1, "Chai", Money::from_cents(1500)).with_units_in_stock(39)
    }

    #[test]
    fn test_product_builder() {
        let product = chai();
        assert_eq!(product.units_in_stock, 39);
        assert_eq!(product.unit_price.cents(), 1500);
    }

    #[test]
    fn test_name_filter_is_exact() {
        let product = chai();
        assert!(ProductFilter::ByName("Chai".into()).matches(&product));
        assert!(!ProductFilter::ByName("chai".into()).matches(&product));
        assert!(!ProductFilter::ByName("Chai ".into()).matches(&product));
    }

    #[test]
    fn test_price_filter_is_inclusive_between() {
        let product = chai();
        let between = |min, max| ProductFilter::ByUnitPrice {
            min: Money::from_cents(min),
            max: Money::from_cents(max),
        };

        assert!(between(1000, 2000).matches(&product));
        assert!(between(1500, 1500).matches(&product));
        assert!(!between(500, 1000).matches(&product));
        assert!(!between(1600, 2000).matches(&product));
        // Inverted bounds select nothing
        assert!(!between(2000, 1000).matches(&product));
    }

    #[test]
    fn test_category_and_id_filters() {
        let product = chai();
        assert!(ProductFilter::ById(1).matches(&product));
        assert!(!ProductFilter::ById(2).matches(&product));
        assert!(ProductFilter::ByCategory(1).matches(&product));
        assert!(!ProductFilter::ByCategory(2).matches(&product));
    }
}
