//! # Business Rules
//!
//! The rule evaluator and the pure predicates behind each product rule.
//!
//! ## How a Mutation Is Guarded
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(product)                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rule 1: name unique?          ── fail ──► return failure (stop)       │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  rule 2: category not full?    ── fail ──► return failure (stop)       │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  rule 3: category count ok?    ── fail ──► return failure (stop)       │
//! │       │ ok                                                              │
//! │       ▼                                                                 │
//! │  None ──► caller mutates storage                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service layer does the querying; the functions here only compare the
//! numbers it found against [`RuleLimits`].

use serde::{Deserialize, Serialize};

use crate::messages;
use crate::result::OpResult;
use crate::{MAX_CATEGORIES, MAX_PRODUCTS_PER_CATEGORY, UPDATE_CATEGORY_THRESHOLD};

// =============================================================================
// Evaluator
// =============================================================================

/// Reduces several rule outcomes to the first failure.
///
/// `None` means every rule passed.
pub struct BusinessRules;

impl BusinessRules {
    /// Scans already-evaluated outcomes in order and returns the first failure.
    ///
    /// Every outcome in `results` has been computed before this is called, so
    /// all rule queries have run even when an early one failed. Prefer
    /// [`BusinessRules::run_lazy`] when rules have side effects or cost.
    pub fn run<I>(results: I) -> Option<OpResult>
    where
        I: IntoIterator<Item = OpResult>,
    {
        results.into_iter().find(OpResult::is_failure)
    }

    /// Invokes rules one at a time and stops at the first failure.
    ///
    /// Rules after the failing one are never called.
    pub fn run_lazy<I, F>(rules: I) -> Option<OpResult>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> OpResult,
    {
        for rule in rules {
            let outcome = rule();
            if outcome.is_failure() {
                return Some(outcome);
            }
        }
        None
    }
}

// =============================================================================
// Limits
// =============================================================================

/// Numeric thresholds used by the product rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleLimits {
    /// Add fails when the category already holds this many products.
    #[serde(default = "default_max_products_per_category")]
    pub max_products_per_category: usize,

    /// Add fails when more than this many categories exist.
    #[serde(default = "default_max_categories")]
    pub max_categories: usize,

    /// Update fails when the category already holds this many products.
    #[serde(default = "default_update_category_threshold")]
    pub update_category_threshold: usize,
}

fn default_max_products_per_category() -> usize {
    MAX_PRODUCTS_PER_CATEGORY
}

fn default_max_categories() -> usize {
    MAX_CATEGORIES
}

fn default_update_category_threshold() -> usize {
    UPDATE_CATEGORY_THRESHOLD
}

impl Default for RuleLimits {
    fn default() -> Self {
        RuleLimits {
            max_products_per_category: MAX_PRODUCTS_PER_CATEGORY,
            max_categories: MAX_CATEGORIES,
            update_category_threshold: UPDATE_CATEGORY_THRESHOLD,
        }
    }
}

// =============================================================================
// Product Rule Predicates
// =============================================================================

/// Fails when another product already uses the name.
pub fn product_name_available(name_taken: bool) -> OpResult {
    if name_taken {
        return OpResult::failure(messages::PRODUCT_NAME_ALREADY_EXISTS);
    }
    OpResult::success()
}

/// Fails when the category already holds `max_products_per_category` products.
///
/// Counts what is stored now; the product about to be added is not included.
pub fn category_has_room(products_in_category: usize, limits: &RuleLimits) -> OpResult {
    if products_in_category >= limits.max_products_per_category {
        return OpResult::failure(messages::PRODUCT_COUNT_OF_CATEGORY_ERROR);
    }
    OpResult::success()
}

/// Fails when the total category count is above `max_categories`.
pub fn category_count_within_limit(category_count: usize, limits: &RuleLimits) -> OpResult {
    if category_count > limits.max_categories {
        return OpResult::failure(messages::CATEGORY_LIMIT_EXCEEDED);
    }
    OpResult::success()
}

/// Update-path pre-check on the product's category.
pub fn category_accepts_update(products_in_category: usize, limits: &RuleLimits) -> OpResult {
    if products_in_category >= limits.update_category_threshold {
        return OpResult::failure(messages::PRODUCT_COUNT_OF_CATEGORY_ERROR);
    }
    OpResult::success()
}

// =============================================================================
// Unit Tests
// =============================================================================
