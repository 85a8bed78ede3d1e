//! # catalog-service: Product Service for the Catalog
//!
//! Runs the product business rules against storage collaborators and layers
//! authorization, validation and caching around them as decorators.
//!
//! ## Decorator Stack
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller                                                                 │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  SecuredProductService    add requires "product.add" or "admin"        │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  ValidatedProductService  ProductValidator on add / update             │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  CachedProductService     get_all / get_by_id read-through             │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  ProductManager           business rules, maintenance window           │
//! │    │                                                                    │
//! │    ├──► ProductStore      (SQLite repository or in-memory)             │
//! │    └──► CategoryService   (CategoryManager over a CategoryStore)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every layer implements [`ProductService`], so any subset can be stacked.
//!
//! ## Modules
//!
//! - [`manager`] - `ProductService` trait and `ProductManager`
//! - [`product_rules`] - queries behind each business rule
//! - [`rules`] - short-circuiting async rule evaluation
//! - [`category`] - `CategoryService` and `CategoryManager`
//! - [`store`] - storage collaborator traits and SQLite implementations
//! - [`memory`] - in-memory collaborators
//! - [`security`], [`validated`], [`cache`] - decorators
//! - [`maintenance`] - maintenance window policy
//! - [`config`] - TOML + environment configuration
//! - [`logging`] - tracing subscriber setup

pub mod cache;
pub mod category;
pub mod config;
pub mod error;
pub mod logging;
pub mod maintenance;
pub mod manager;
pub mod memory;
pub mod product_rules;
pub mod rules;
pub mod security;
pub mod store;
pub mod validated;

use std::sync::Arc;

pub use cache::{CacheManager, CachedProductService, MemoryCacheManager};
pub use category::{CategoryManager, CategoryService};
pub use config::CatalogConfig;
pub use error::{ServiceError, ServiceResult};
pub use maintenance::{HourlyMaintenanceWindow, MaintenanceWindow, NoMaintenance};
pub use manager::{ProductManager, ProductService};
pub use security::{SecuredProductService, UserClaims};
pub use store::{CategoryStore, ProductStore};
pub use validated::ValidatedProductService;

/// Wraps `manager` in the full decorator stack for one caller.
pub fn secured_product_service(
    manager: Arc<dyn ProductService>,
    cache: Arc<dyn CacheManager>,
    claims: UserClaims,
) -> SecuredProductService {
    let cached: Arc<dyn ProductService> = Arc::new(CachedProductService::new(manager, cache));
    let validated: Arc<dyn ProductService> = Arc::new(ValidatedProductService::new(cached));
    SecuredProductService::new(validated, claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryCategoryStore, InMemoryProductStore};
    use catalog_core::{messages, Category, Money, Product};

    #[tokio::test]
    async fn test_full_stack_order() {
        let categories = InMemoryCategoryStore::with_categories([Category::new(1, "Beverages")]);
        let store = Arc::new(InMemoryProductStore::new(categories.clone()));
        let manager: Arc<dyn ProductService> = Arc::new(
            ProductManager::new(
                store.clone(),
                Arc::new(CategoryManager::new(Arc::new(categories))),
            )
            .with_maintenance(Arc::new(NoMaintenance)),
        );
        let cache: Arc<dyn CacheManager> = Arc::new(MemoryCacheManager::default());

        // Authorization runs before validation
        let viewer = secured_product_service(
            manager.clone(),
            cache.clone(),
            UserClaims::new("viewer", ["viewer"]),
        );
        let invalid = Product::new(1, 1, "X", Money::zero());
        assert!(matches!(
            viewer.add(&invalid).await,
            Err(ServiceError::AuthorizationDenied)
        ));

        let admin = secured_product_service(manager, cache, UserClaims::new("root", ["admin"]));
        assert!(matches!(
            admin.add(&invalid).await,
            Err(ServiceError::Validation(_))
        ));

        let added = admin
            .add(&Product::new(1, 1, "Chai", Money::from_cents(1800)))
            .await
            .unwrap();
        assert_eq!(added.message(), Some(messages::PRODUCT_ADDED));
        assert_eq!(viewer.get_all().await.unwrap().data().map(Vec::len), Some(1));
        assert_eq!(store.len().await, 1);
    }
}
