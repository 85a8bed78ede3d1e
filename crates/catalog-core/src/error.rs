//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  catalog-service errors                                                │
//! │  └── ServiceError     - Faults surfaced to callers                     │
//! │                                                                         │
//! │  Flow: ValidationError → ServiceError ← DbError                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Business-rule failures are NOT errors here. They travel as failure
//! [`OpResult`](crate::OpResult) values.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A monetary amount could not be parsed.
    ///
    /// ## When This Occurs
    /// - `"abc"`, `"1.2.3"`, or more than two decimal places
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business rule or storage access runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is below a minimum that applies in this context.
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: String, min: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
