//! # Product Manager
//!
//! The [`ProductService`] implementation that runs the business rules.
//!
//! ## Add Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(product)                                                           │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  run_rules([                                                            │
//! │      check_if_product_name_exists(name),                               │
//! │      check_if_product_count_of_category_correct(category_id),          │
//! │      check_if_category_limit_exceeded(),                               │
//! │  ])                                                                     │
//! │     │                                                                   │
//! │     ├── Some(failure) ──► Ok(failure)      storage untouched           │
//! │     │                                                                   │
//! │     └── None ──► store.add(product) ──► Ok(success "Product added")    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check and the insert are separate steps. Two concurrent adds can both
//! pass the rules; nothing here serializes them.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::{debug, info, warn};

use catalog_core::rules::RuleLimits;
use catalog_core::{
    messages, CategoryId, DataResult, Money, OpResult, Product, ProductDetail, ProductFilter,
    ProductId,
};

use crate::category::CategoryService;
use crate::error::{ServiceError, ServiceResult};
use crate::maintenance::{HourlyMaintenanceWindow, MaintenanceWindow};
use crate::product_rules::ProductRules;
use crate::rules::run_rules;
use crate::store::ProductStore;

/// Unit price below which the transactional demo aborts after its first add.
pub const TRANSACTIONAL_TEST_MIN_PRICE: Money = Money::from_cents(1000);

// =============================================================================
// Service Trait
// =============================================================================

/// Product operations, implemented by [`ProductManager`] and by every
/// decorator that wraps it.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn add(&self, product: &Product) -> ServiceResult<OpResult>;

    /// Never succeeds: either the category pre-check fails or
    /// `ServiceError::NotImplemented` is returned.
    async fn update(&self, product: &Product) -> ServiceResult<OpResult>;

    async fn get_all(&self) -> ServiceResult<DataResult<Vec<Product>>>;

    async fn get_product_details(&self) -> ServiceResult<DataResult<Vec<ProductDetail>>>;

    async fn get_all_by_category_id(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<DataResult<Vec<Product>>>;

    /// `data` is `Some(None)` when no product has this id.
    async fn get_by_id(&self, product_id: ProductId) -> ServiceResult<DataResult<Option<Product>>>;

    /// Products with `min <= unit_price <= max`.
    async fn get_by_unit_price(
        &self,
        min: Money,
        max: Money,
    ) -> ServiceResult<DataResult<Vec<Product>>>;

    /// Adds twice, aborting in between when the price is below
    /// [`TRANSACTIONAL_TEST_MIN_PRICE`]. Nothing is rolled back.
    async fn add_transactional_test(&self, product: &Product) -> ServiceResult<OpResult>;
}

// =============================================================================
// Product Manager
// =============================================================================

pub struct ProductManager {
    store: Arc<dyn ProductStore>,
    rules: ProductRules,
    maintenance: Arc<dyn MaintenanceWindow>,
}

impl ProductManager {
    /// Creates a manager with default limits and the 22:00 maintenance window.
    pub fn new(store: Arc<dyn ProductStore>, categories: Arc<dyn CategoryService>) -> Self {
        ProductManager {
            rules: ProductRules::new(store.clone(), categories, RuleLimits::default()),
            store,
            maintenance: Arc::new(HourlyMaintenanceWindow::default()),
        }
    }

    pub fn with_limits(mut self, limits: RuleLimits) -> Self {
        self.rules = self.rules.with_limits(limits);
        self
    }

    pub fn with_maintenance(mut self, maintenance: Arc<dyn MaintenanceWindow>) -> Self {
        self.maintenance = maintenance;
        self
    }

    pub fn limits(&self) -> &RuleLimits {
        self.rules.limits()
    }

    async fn list(&self, filter: Option<&ProductFilter>) -> ServiceResult<Vec<Product>> {
        self.store.get_all(filter).await
    }
}

#[async_trait]
impl ProductService for ProductManager {
    async fn add(&self, product: &Product) -> ServiceResult<OpResult> {
        let failure = run_rules(vec![
            self.rules
                .check_if_product_name_exists(&product.product_name)
                .boxed(),
            self.rules
                .check_if_product_count_of_category_correct(product.category_id)
                .boxed(),
            self.rules.check_if_category_limit_exceeded().boxed(),
        ])
        .await?;

        if let Some(failure) = failure {
            info!(
                product_id = product.product_id,
                reason = failure.message(),
                "Product rejected by business rules"
            );
            return Ok(failure);
        }

        self.store.add(product).await?;
        info!(
            product_id = product.product_id,
            name = %product.product_name,
            "Product added"
        );
        Ok(OpResult::success_with_message(messages::PRODUCT_ADDED))
    }

    async fn update(&self, product: &Product) -> ServiceResult<OpResult> {
        let failure = run_rules(vec![self
            .rules
            .check_if_category_accepts_update(product.category_id)
            .boxed()])
        .await?;

        if let Some(failure) = failure {
            return Ok(failure);
        }

        warn!(product_id = product.product_id, "Product update is not supported");
        Err(ServiceError::NotImplemented("update"))
    }

    async fn get_all(&self) -> ServiceResult<DataResult<Vec<Product>>> {
        if self.maintenance.is_active() {
            debug!("Refusing product listing during maintenance");
            return Ok(DataResult::failure(messages::MAINTENANCE_TIME));
        }

        let products = self.list(None).await?;
        Ok(DataResult::success_with_message(
            products,
            messages::PRODUCTS_LISTED,
        ))
    }

    async fn get_product_details(&self) -> ServiceResult<DataResult<Vec<ProductDetail>>> {
        Ok(DataResult::success(self.store.get_product_details().await?))
    }

    async fn get_all_by_category_id(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<DataResult<Vec<Product>>> {
        let products = self
            .list(Some(&ProductFilter::ByCategory(category_id)))
            .await?;
        Ok(DataResult::success(products))
    }

    async fn get_by_id(&self, product_id: ProductId) -> ServiceResult<DataResult<Option<Product>>> {
        let product = self.store.get(&ProductFilter::ById(product_id)).await?;
        Ok(DataResult::success(product))
    }

    async fn get_by_unit_price(
        &self,
        min: Money,
        max: Money,
    ) -> ServiceResult<DataResult<Vec<Product>>> {
        let products = self
            .list(Some(&ProductFilter::ByUnitPrice { min, max }))
            .await?;
        Ok(DataResult::success(products))
    }

    async fn add_transactional_test(&self, product: &Product) -> ServiceResult<OpResult> {
        let first = self.add(product).await?;
        debug!(
            product_id = product.product_id,
            success = first.is_success(),
            "First transactional add finished"
        );

        if product.unit_price < TRANSACTIONAL_TEST_MIN_PRICE {
            warn!(price = %product.unit_price, "Aborting transactional test, first add kept");
            return Err(ServiceError::TransactionAborted(format!(
                "unit price {} is below {}",
                product.unit_price, TRANSACTIONAL_TEST_MIN_PRICE
            )));
        }

        self.add(product).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryManager;
    use crate::maintenance::NoMaintenance;
    use crate::memory::{InMemoryCategoryStore, InMemoryProductStore};
    use catalog_core::Category;
    use catalog_db::DbError;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Maintenance policy pinned to a fixed instant.
    struct FixedClock {
        window: HourlyMaintenanceWindow,
        hour: u32,
    }

    impl MaintenanceWindow for FixedClock {
        fn is_active(&self) -> bool {
            match Utc.with_ymd_and_hms(2024, 3, 1, self.hour, 15, 0).single() {
                Some(at) => self.window.is_active_at(&at),
                None => false,
            }
        }
    }

    /// Counts `get_all` calls on the category service.
    struct CountingCategories {
        inner: CategoryManager,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CategoryService for CountingCategories {
        async fn get_all(&self) -> ServiceResult<DataResult<Vec<Category>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_all().await
        }

        async fn get_by_id(&self, id: CategoryId) -> ServiceResult<DataResult<Option<Category>>> {
            self.inner.get_by_id(id).await
        }
    }

    /// A store whose every call fails.
    struct BrokenStore;

    #[async_trait]
    impl ProductStore for BrokenStore {
        async fn add(&self, _: &Product) -> ServiceResult<()> {
            Err(DbError::ConnectionFailed("down".into()).into())
        }

        async fn get(&self, _: &ProductFilter) -> ServiceResult<Option<Product>> {
            Err(DbError::ConnectionFailed("down".into()).into())
        }

        async fn get_all(&self, _: Option<&ProductFilter>) -> ServiceResult<Vec<Product>> {
            Err(DbError::ConnectionFailed("down".into()).into())
        }

        async fn get_product_details(&self) -> ServiceResult<Vec<ProductDetail>> {
            Err(DbError::ConnectionFailed("down".into()).into())
        }
    }

    struct Fixture {
        store: Arc<InMemoryProductStore>,
        category_calls: Arc<AtomicUsize>,
        manager: ProductManager,
    }

    fn fixture(category_count: i64) -> Fixture {
        let categories = InMemoryCategoryStore::with_categories(
            (1..=category_count).map(|id| Category::new(id, format!("Category {id}"))),
        );
        let store = Arc::new(InMemoryProductStore::new(categories.clone()));
        let category_calls = Arc::new(AtomicUsize::new(0));
        let category_service = Arc::new(CountingCategories {
            inner: CategoryManager::new(Arc::new(categories)),
            calls: category_calls.clone(),
        });

        let manager = ProductManager::new(store.clone(), category_service)
            .with_maintenance(Arc::new(NoMaintenance));

        Fixture {
            store,
            category_calls,
            manager,
        }
    }

    fn product(id: ProductId, category_id: CategoryId, name: &str, cents: i64) -> Product {
        Product::new(id, category_id, name, Money::from_cents(cents))
    }

    async fn fill_category(f: &Fixture, category_id: CategoryId, count: i64) {
        for i in 0..count {
            let id = category_id * 100 + i;
            f.store
                .add(&product(id, category_id, &format!("Filler {id}"), 1500))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_add_into_empty_catalog() {
        let f = fixture(1);
        let result = f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.message(), Some(messages::PRODUCT_ADDED));
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_without_further_queries() {
        let f = fixture(1);
        f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();
        let calls_before = f.category_calls.load(Ordering::SeqCst);

        let result = f.manager.add(&product(2, 1, "Chai", 1900)).await.unwrap();

        assert_eq!(result.message(), Some(messages::PRODUCT_NAME_ALREADY_EXISTS));
        assert_eq!(f.store.len().await, 1);
        assert_eq!(f.category_calls.load(Ordering::SeqCst), calls_before);
    }

    #[tokio::test]
    async fn test_full_category_rejected() {
        let f = fixture(2);
        fill_category(&f, 1, 15).await;

        let result = f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();
        assert_eq!(
            result.message(),
            Some(messages::PRODUCT_COUNT_OF_CATEGORY_ERROR)
        );
        assert_eq!(f.store.len().await, 15);
        assert_eq!(f.category_calls.load(Ordering::SeqCst), 0);

        // A different category still accepts products
        let other = f.manager.add(&product(1, 2, "Chai", 1800)).await.unwrap();
        assert!(other.is_success());
    }

    #[tokio::test]
    async fn test_full_category_wins_over_category_limit() {
        let f = fixture(16);
        fill_category(&f, 1, 15).await;

        let result = f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();
        assert_eq!(
            result.message(),
            Some(messages::PRODUCT_COUNT_OF_CATEGORY_ERROR)
        );
        assert_eq!(f.category_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_duplicate_name_wins_over_every_other_rule() {
        let f = fixture(16);
        fill_category(&f, 1, 15).await;

        let result = f.manager.add(&product(1, 1, "Filler 100", 1800)).await.unwrap();
        assert_eq!(
            result.message(),
            Some(messages::PRODUCT_NAME_ALREADY_EXISTS)
        );
        assert_eq!(f.store.len().await, 15);
    }

    #[tokio::test]
    async fn test_fourteen_products_still_has_room() {
        let f = fixture(1);
        fill_category(&f, 1, 14).await;

        let result = f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();
        assert!(result.is_success());
        assert_eq!(f.store.len().await, 15);
    }

    #[tokio::test]
    async fn test_category_limit_exceeded() {
        let f = fixture(16);
        let result = f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();

        assert_eq!(result.message(), Some(messages::CATEGORY_LIMIT_EXCEEDED));
        assert!(f.store.is_empty().await);

        let f = fixture(15);
        assert!(f
            .manager
            .add(&product(1, 1, "Chai", 1800))
            .await
            .unwrap()
            .is_success());
    }

    #[tokio::test]
    async fn test_configured_limits() {
        let f = fixture(1);
        let manager = ProductManager::new(
            f.store.clone(),
            Arc::new(CategoryManager::new(Arc::new(
                InMemoryCategoryStore::with_categories([Category::new(1, "Beverages")]),
            ))),
        )
        .with_maintenance(Arc::new(NoMaintenance))
        .with_limits(RuleLimits {
            max_products_per_category: 1,
            ..RuleLimits::default()
        });

        assert!(manager.add(&product(1, 1, "Chai", 1800)).await.unwrap().is_success());
        assert!(manager.add(&product(2, 1, "Chang", 1900)).await.unwrap().is_failure());
        assert_eq!(manager.limits().max_products_per_category, 1);
    }

    #[tokio::test]
    async fn test_get_all_outside_maintenance() {
        let f = fixture(1);
        f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();

        let manager = f.manager.with_maintenance(Arc::new(FixedClock {
            window: HourlyMaintenanceWindow::new(22),
            hour: 10,
        }));
        let result = manager.get_all().await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.message(), Some(messages::PRODUCTS_LISTED));
        assert_eq!(result.data().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_get_all_during_maintenance() {
        let f = fixture(1);
        f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();

        let manager = f.manager.with_maintenance(Arc::new(FixedClock {
            window: HourlyMaintenanceWindow::new(22),
            hour: 22,
        }));
        let result = manager.get_all().await.unwrap();

        assert!(result.is_failure());
        assert_eq!(result.message(), Some(messages::MAINTENANCE_TIME));
        assert!(result.data().is_none());
    }

    #[tokio::test]
    async fn test_reads_are_idempotent() {
        let f = fixture(1);
        f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();
        f.manager.add(&product(2, 1, "Chang", 1900)).await.unwrap();

        let first = f.manager.get_all().await.unwrap();
        let second = f.manager.get_all().await.unwrap();
        assert_eq!(first, second);

        assert_eq!(
            f.manager.get_by_id(2).await.unwrap(),
            f.manager.get_by_id(2).await.unwrap()
        );
        assert_eq!(
            f.manager.get_product_details().await.unwrap(),
            f.manager.get_product_details().await.unwrap()
        );
        assert_eq!(
            f.manager.get_all_by_category_id(1).await.unwrap(),
            f.manager.get_all_by_category_id(1).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_success_without_product() {
        let f = fixture(1);
        let result = f.manager.get_by_id(42).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.into_data(), Some(None));
    }

    #[tokio::test]
    async fn test_get_by_unit_price_inclusive() {
        let f = fixture(1);
        f.manager.add(&product(1, 1, "Chai", 1500)).await.unwrap();
        f.manager.add(&product(2, 1, "Chang", 1000)).await.unwrap();
        f.manager.add(&product(3, 1, "Ipoh", 2500)).await.unwrap();

        let result = f
            .manager
            .get_by_unit_price(Money::from_cents(1000), Money::from_cents(2000))
            .await
            .unwrap();
        let ids: Vec<_> = result.data().unwrap().iter().map(|p| p.product_id).collect();
        assert_eq!(ids, [1, 2]);

        let inverted = f
            .manager
            .get_by_unit_price(Money::from_cents(2000), Money::from_cents(1000))
            .await
            .unwrap();
        assert!(inverted.data().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_by_category_and_details() {
        let f = fixture(2);
        f.manager.add(&product(1, 1, "Chai", 1800)).await.unwrap();
        f.manager.add(&product(2, 2, "Aniseed Syrup", 1000)).await.unwrap();

        let beverages = f.manager.get_all_by_category_id(1).await.unwrap();
        assert_eq!(beverages.data().map(Vec::len), Some(1));

        let details = f.manager.get_product_details().await.unwrap();
        let details = details.into_data().unwrap();
        assert_eq!(details[1].category_name, "Category 2");
    }

    #[tokio::test]
    async fn test_update_never_succeeds() {
        let f = fixture(1);
        let err = f
            .manager
            .update(&product(1, 1, "Chai", 1800))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotImplemented("update")));

        fill_category(&f, 1, 10).await;
        let result = f.manager.update(&product(1, 1, "Chai", 1800)).await.unwrap();
        assert_eq!(
            result.message(),
            Some(messages::PRODUCT_COUNT_OF_CATEGORY_ERROR)
        );
    }

    #[tokio::test]
    async fn test_transactional_test_aborts_cheap_product() {
        let f = fixture(1);
        let err = f
            .manager
            .add_transactional_test(&product(1, 1, "Konbu", 600))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::TransactionAborted(_)));
        // The first add is not rolled back
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_transactional_test_second_add_hits_name_rule() {
        let f = fixture(1);
        let result = f
            .manager
            .add_transactional_test(&product(1, 1, "Chai", 1800))
            .await
            .unwrap();

        assert_eq!(result.message(), Some(messages::PRODUCT_NAME_ALREADY_EXISTS));
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_collaborator_fault_propagates() {
        let categories = Arc::new(CategoryManager::new(Arc::new(InMemoryCategoryStore::new())));
        let manager = ProductManager::new(Arc::new(BrokenStore), categories)
            .with_maintenance(Arc::new(NoMaintenance));

        let err = manager.add(&product(1, 1, "Chai", 1800)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(DbError::ConnectionFailed(_))));

        assert!(manager.get_all().await.is_err());
        assert!(manager.get_by_id(1).await.is_err());
    }
}
