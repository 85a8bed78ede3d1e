//! # catalog-core: Pure Business Logic for the Product Catalog
//!
//! This crate holds the parts of the catalog that need no I/O: the result
//! model every operation returns, the business-rule evaluator, the threshold
//! predicates behind each product rule, the domain types and input validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  catalog-service                                │   │
//! │  │   Secured ─► Validated ─► Cached ─► ProductManager              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  result   │  │   rules   │  │   types   │  │ validation│  │   │
//! │  │   │ OpResult  │  │ Business- │  │  Product  │  │  Product- │  │   │
//! │  │   │DataResult │  │   Rules   │  │ Category  │  │ Validator │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  catalog-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`result`] - `OpResult` / `DataResult<T>` success-or-failure values
//! - [`rules`] - `BusinessRules` evaluator and the product rule predicates
//! - [`types`] - Domain types (Product, Category, ProductDetail, ProductFilter)
//! - [`money`] - Money type stored as integer cents (no floating point!)
//! - [`messages`] - User-facing messages carried by failure results
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for products
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::result::OpResult;
//! use catalog_core::rules::BusinessRules;
//!
//! let outcome = BusinessRules::run([
//!     OpResult::success(),
//!     OpResult::failure("name taken"),
//!     OpResult::failure("category full"),
//! ]);
//!
//! // The first failure wins
//! assert_eq!(outcome.unwrap().message(), Some("name taken"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod messages;
pub mod money;
pub mod result;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use result::{DataResult, OpResult};
pub use rules::{BusinessRules, RuleLimits};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum products a category may already hold when a new product is added.
pub const MAX_PRODUCTS_PER_CATEGORY: usize = 15;

/// Maximum number of categories before new products are refused.
pub const MAX_CATEGORIES: usize = 15;

/// Category product count at which the update pre-check refuses.
///
/// Lower than [`MAX_PRODUCTS_PER_CATEGORY`]. Both are configurable through
/// [`RuleLimits`].
pub const UPDATE_CATEGORY_THRESHOLD: usize = 10;
