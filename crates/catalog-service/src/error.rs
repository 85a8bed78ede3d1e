//! # Service Error Types
//!
//! Faults raised by the product service and its decorators.
//!
//! ## Outcome vs. Fault
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       What Goes Where                                   │
//! │                                                                         │
//! │  Ok(OpResult::failure(..))          Err(ServiceError::..)              │
//! │  ─────────────────────────          ─────────────────────              │
//! │  • name already exists              • collaborator fault (Db)          │
//! │  • category full                    • invalid input (Validation)       │
//! │  • category limit exceeded          • missing role (AuthorizationDenied)│
//! │  • maintenance window               • update (NotImplemented)          │
//! │                                     • transactional demo abort         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use catalog_core::ValidationError;
use catalog_db::DbError;

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A storage collaborator failed. Passed through unchanged.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Input rejected before any rule or storage access ran.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The caller lacks every role the operation accepts.
    #[error("Authorization denied")]
    AuthorizationDenied,

    /// The operation exists on the interface but has no implementation.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// The transactional demo gave up after its first step.
    ///
    /// Work already done is not rolled back.
    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    /// Cache read, write or (de)serialization failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Cache(err.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for ServiceError {
    fn from(err: toml::de::Error) -> Self {
        ServiceError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ServiceError {
    fn from(err: toml::ser::Error) -> Self {
        ServiceError::Config(err.to_string())
    }
}
