//! # Validation Module
//!
//! Input validation for products.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (shape of the input)                             │
//! │  ├── name present, 2..=200 characters                                  │
//! │  └── price positive, category-specific minimum                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Business rules (state of the catalog)                        │
//! │  ├── name not already taken                                            │
//! │  └── category and catalog size limits                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  ├── PRIMARY KEY on product_id                                         │
//! │  └── Foreign key to categories                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::money::Money;
//! use catalog_core::types::Product;
//! use catalog_core::validation::ProductValidator;
//!
//! let product = Product::new(1, 2, "Chang", Money::from_cents(1900));
//! assert!(ProductValidator::validate(&product).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CategoryId, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Category whose products must cost at least [`MIN_PRICE_IN_RESTRICTED_CATEGORY`].
pub const RESTRICTED_PRICE_CATEGORY: CategoryId = 1;

/// Minimum unit price for products in [`RESTRICTED_PRICE_CATEGORY`].
pub const MIN_PRICE_IN_RESTRICTED_CATEGORY: Money = Money::from_cents(1000);

pub const PRODUCT_NAME_MIN_LEN: usize = 2;
pub const PRODUCT_NAME_MAX_LEN: usize = 200;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - Between 2 and 200 characters after trimming
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    let field = || "product_name".to_string();

    if name.is_empty() {
        return Err(ValidationError::Required { field: field() });
    }

    let len = name.chars().count();
    if len < PRODUCT_NAME_MIN_LEN {
        return Err(ValidationError::TooShort {
            field: field(),
            min: PRODUCT_NAME_MIN_LEN,
        });
    }
    if len > PRODUCT_NAME_MAX_LEN {
        return Err(ValidationError::TooLong {
            field: field(),
            max: PRODUCT_NAME_MAX_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price for a product in `category_id`.
///
/// ## Rules
/// - Must be positive (> 0)
/// - At least 10.00 in category 1
pub fn validate_unit_price(price: Money, category_id: CategoryId) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit_price".to_string(),
        });
    }

    if category_id == RESTRICTED_PRICE_CATEGORY && price < MIN_PRICE_IN_RESTRICTED_CATEGORY {
        return Err(ValidationError::BelowMinimum {
            field: "unit_price".to_string(),
            min: MIN_PRICE_IN_RESTRICTED_CATEGORY.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Product Validator
// =============================================================================

/// Validates a whole product before it reaches the business rules.
pub struct ProductValidator;

impl ProductValidator {
    /// Returns the first violated rule, checking name before price.
    pub fn validate(product: &Product) -> ValidationResult<()> {
        validate_product_name(&product.product_name)?;
        validate_unit_price(product.unit_price, product.category_id)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
