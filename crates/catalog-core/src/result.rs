//! # Result Model
//!
//! Uniform return values for catalog operations.
//!
//! ## Two Kinds of "Failure"
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Outcome vs. Fault                                   │
//! │                                                                         │
//! │  Business-rule failure (expected)                                      │
//! │  ├── name already exists, category full, maintenance window           │
//! │  └── Ok(OpResult::failure(..))   ← returned, never raised             │
//! │                                                                         │
//! │  Fault (unexpected)                                                    │
//! │  ├── database down, unimplemented operation                           │
//! │  └── Err(ServiceError::..)       ← propagated with `?`                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both types are immutable: fields are private and values are only built
//! through the factory functions below.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// OpResult
// =============================================================================

/// Success flag plus an optional human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OpResult {
    success: bool,
    message: Option<String>,
}

impl OpResult {
    /// A successful outcome without a message.
    pub fn success() -> Self {
        OpResult {
            success: true,
            message: None,
        }
    }

    /// A successful outcome carrying a confirmation message.
    pub fn success_with_message(message: impl Into<String>) -> Self {
        OpResult {
            success: true,
            message: Some(message.into()),
        }
    }

    /// A failed outcome. Failures always say why.
    pub fn failure(message: impl Into<String>) -> Self {
        OpResult {
            success: false,
            message: Some(message.into()),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

// =============================================================================
// DataResult
// =============================================================================

/// An [`OpResult`] that also carries a payload.
///
/// The payload is normally present only on success. `failure_with_data`
/// exists for the rare case where a partial payload is still useful to the
/// caller; nothing in the model forbids it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DataResult<T> {
    success: bool,
    message: Option<String>,
    data: Option<T>,
}

impl<T> DataResult<T> {
    pub fn success(data: T) -> Self {
        DataResult {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        DataResult {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// A failed outcome with no payload.
    pub fn failure(message: impl Into<String>) -> Self {
        DataResult {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn failure_with_data(data: T, message: impl Into<String>) -> Self {
        DataResult {
            success: false,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.success
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Drops the payload, keeping flag and message.
impl<T> From<DataResult<T>> for OpResult {
    fn from(result: DataResult<T>) -> Self {
        OpResult {
            success: result.success,
            message: result.message,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
