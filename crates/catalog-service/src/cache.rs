//! # Caching
//!
//! A string cache behind an async trait, an in-process implementation, and
//! the read-through decorator for product queries.
//!
//! ## Keys
//! ```text
//! ProductService.get_all()          ← get_all
//! ProductService.get_by_id(<id>)    ← get_by_id
//! ```
//!
//! A successful `add` or `update` removes every key starting with
//! `ProductService.get`. Failed results are never cached.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use catalog_core::{CategoryId, DataResult, Money, OpResult, Product, ProductDetail, ProductId};

use crate::error::ServiceResult;
use crate::manager::ProductService;

/// Prefix shared by every cached product query.
pub const PRODUCT_QUERY_PREFIX: &str = "ProductService.get";

/// Default time-to-live for cached entries.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

// =============================================================================
// Cache Manager
// =============================================================================

#[async_trait]
pub trait CacheManager: Send + Sync {
    async fn get(&self, key: &str) -> ServiceResult<Option<String>>;

    /// Stores `value`; `ttl` of `None` uses the cache's default.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> ServiceResult<()>;

    /// Removes every key that starts with `prefix`.
    async fn remove_by_pattern(&self, prefix: &str) -> ServiceResult<()>;
}

/// Reads and decodes a JSON entry.
pub async fn get_json<T: DeserializeOwned>(
    cache: &dyn CacheManager,
    key: &str,
) -> ServiceResult<Option<T>> {
    match cache.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it with the default TTL.
pub async fn set_json<T: Serialize + Sync>(
    cache: &dyn CacheManager,
    key: &str,
    value: &T,
) -> ServiceResult<()> {
    cache.set(key, serde_json::to_string(value)?, None).await
}

struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Process-local cache. Expired entries are dropped when read.
pub struct MemoryCacheManager {
    entries: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl MemoryCacheManager {
    pub fn new(default_ttl: Duration) -> Self {
        MemoryCacheManager {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for MemoryCacheManager {
    fn default() -> Self {
        MemoryCacheManager::new(DEFAULT_CACHE_TTL)
    }
}

#[async_trait]
impl CacheManager for MemoryCacheManager {
    async fn get(&self, key: &str) -> ServiceResult<Option<String>> {
        let mut entries = self.entries.write().await;
        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return Ok(Some(entry.value.clone()))
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(key);
            debug!(key, "Cache entry expired");
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> ServiceResult<()> {
        let expires_at = Instant::now() + ttl.unwrap_or(self.default_ttl);
        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(())
    }

    async fn remove_by_pattern(&self, prefix: &str) -> ServiceResult<()> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        debug!(prefix, removed = before - entries.len(), "Invalidated cache entries");
        Ok(())
    }
}

// =============================================================================
// Cached Product Service
// =============================================================================

/// Stored form of a successful `get_by_id`.
///
/// `DataResult<Option<Product>>` writes "not found" as `"data": null`, which
/// reads back as no payload at all. Keeping the lookup in its own field
/// preserves the difference.
#[derive(Serialize, Deserialize)]
struct CachedLookup {
    message: Option<String>,
    product: Option<Product>,
}

impl CachedLookup {
    fn from_result(result: &DataResult<Option<Product>>) -> Option<Self> {
        let product = result.data()?.clone();
        Some(CachedLookup {
            message: result.message().map(str::to_string),
            product,
        })
    }

    fn into_result(self) -> DataResult<Option<Product>> {
        match self.message {
            Some(message) => DataResult::success_with_message(self.product, message),
            None => DataResult::success(self.product),
        }
    }
}

/// Read-through cache for `get_all` and `get_by_id`.
pub struct CachedProductService {
    inner: Arc<dyn ProductService>,
    cache: Arc<dyn CacheManager>,
}

impl CachedProductService {
    pub fn new(inner: Arc<dyn ProductService>, cache: Arc<dyn CacheManager>) -> Self {
        CachedProductService { inner, cache }
    }

    pub fn get_all_key() -> String {
        format!("{PRODUCT_QUERY_PREFIX}_all()")
    }

    pub fn get_by_id_key(product_id: ProductId) -> String {
        format!("{PRODUCT_QUERY_PREFIX}_by_id({product_id})")
    }

    async fn invalidate_after(&self, result: &OpResult) -> ServiceResult<()> {
        if result.is_success() {
            self.cache.remove_by_pattern(PRODUCT_QUERY_PREFIX).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ProductService for CachedProductService {
    async fn add(&self, product: &Product) -> ServiceResult<OpResult> {
        let result = self.inner.add(product).await?;
        self.invalidate_after(&result).await?;
        Ok(result)
    }

    async fn update(&self, product: &Product) -> ServiceResult<OpResult> {
        let result = self.inner.update(product).await?;
        self.invalidate_after(&result).await?;
        Ok(result)
    }

    async fn get_all(&self) -> ServiceResult<DataResult<Vec<Product>>> {
        let key = Self::get_all_key();
        if let Some(hit) = get_json(self.cache.as_ref(), &key).await? {
            debug!(key = %key, "Cache hit");
            return Ok(hit);
        }

        let result = self.inner.get_all().await?;
        if result.is_success() {
            set_json(self.cache.as_ref(), &key, &result).await?;
        }
        Ok(result)
    }

    async fn get_product_details(&self) -> ServiceResult<DataResult<Vec<ProductDetail>>> {
        self.inner.get_product_details().await
    }

    async fn get_all_by_category_id(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<DataResult<Vec<Product>>> {
        self.inner.get_all_by_category_id(category_id).await
    }

    async fn get_by_id(&self, product_id: ProductId) -> ServiceResult<DataResult<Option<Product>>> {
        let key = Self::get_by_id_key(product_id);
        if let Some(hit) = get_json::<CachedLookup>(self.cache.as_ref(), &key).await? {
            debug!(key = %key, "Cache hit");
            return Ok(hit.into_result());
        }

        let result = self.inner.get_by_id(product_id).await?;
        if result.is_success() {
            if let Some(entry) = CachedLookup::from_result(&result) {
                set_json(self.cache.as_ref(), &key, &entry).await?;
            }
        }
        Ok(result)
    }

    async fn get_by_unit_price(
        &self,
        min: Money,
        max: Money,
    ) -> ServiceResult<DataResult<Vec<Product>>> {
        self.inner.get_by_unit_price(min, max).await
    }

    async fn add_transactional_test(&self, product: &Product) -> ServiceResult<OpResult> {
        // The first add may have landed even when this returns Err
        let result = self.inner.add_transactional_test(product).await;
        if let Err(e) = self.cache.remove_by_pattern(PRODUCT_QUERY_PREFIX).await {
            warn!(error = %e, "Failed to invalidate product cache");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryManager;
    use crate::maintenance::{MaintenanceWindow, NoMaintenance};
    use crate::manager::ProductManager;
    use crate::memory::{InMemoryCategoryStore, InMemoryProductStore};
    use crate::store::ProductStore;
    use catalog_core::{messages, Category};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Toggle(Arc<AtomicBool>);

    impl MaintenanceWindow for Toggle {
        fn is_active(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn chai() -> Product {
        Product::new(1, 1, "Chai", Money::from_cents(1800))
    }

    fn stack(
        maintenance: Arc<dyn MaintenanceWindow>,
    ) -> (Arc<InMemoryProductStore>, Arc<MemoryCacheManager>, CachedProductService) {
        let categories = InMemoryCategoryStore::with_categories([Category::new(1, "Beverages")]);
        let store = Arc::new(InMemoryProductStore::new(categories.clone()));
        let manager = ProductManager::new(
            store.clone(),
            Arc::new(CategoryManager::new(Arc::new(categories))),
        )
        .with_maintenance(maintenance);

        let cache = Arc::new(MemoryCacheManager::default());
        let service = CachedProductService::new(Arc::new(manager), cache.clone());
        (store, cache, service)
    }

    #[test]
    fn test_keys() {
        assert_eq!(CachedProductService::get_all_key(), "ProductService.get_all()");
        assert_eq!(
            CachedProductService::get_by_id_key(7),
            "ProductService.get_by_id(7)"
        );
    }

    #[tokio::test]
    async fn test_get_all_served_from_cache_until_add() {
        let (store, cache, service) = stack(Arc::new(NoMaintenance));
        service.add(&chai()).await.unwrap();

        assert_eq!(service.get_all().await.unwrap().data().map(Vec::len), Some(1));
        assert_eq!(cache.len().await, 1);

        // Written behind the decorator's back: the cached listing still wins
        store
            .add(&Product::new(2, 1, "Chang", Money::from_cents(1900)))
            .await
            .unwrap();
        assert_eq!(service.get_all().await.unwrap().data().map(Vec::len), Some(1));

        service
            .add(&Product::new(3, 1, "Ipoh Coffee", Money::from_cents(4600)))
            .await
            .unwrap();
        assert_eq!(cache.len().await, 0);
        assert_eq!(service.get_all().await.unwrap().data().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_failed_results_not_cached() {
        let in_maintenance = Arc::new(AtomicBool::new(true));
        let (_store, cache, service) = stack(Arc::new(Toggle(in_maintenance.clone())));
        service.add(&chai()).await.unwrap();

        let refused = service.get_all().await.unwrap();
        assert_eq!(refused.message(), Some(messages::MAINTENANCE_TIME));
        assert_eq!(cache.len().await, 0);

        in_maintenance.store(false, Ordering::SeqCst);
        assert!(service.get_all().await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_rejected_add_keeps_cache() {
        let (_store, cache, service) = stack(Arc::new(NoMaintenance));
        service.add(&chai()).await.unwrap();
        service.get_by_id(1).await.unwrap();
        assert_eq!(cache.len().await, 1);

        let rejected = service
            .add(&Product::new(2, 1, "Chai", Money::from_cents(1800)))
            .await
            .unwrap();
        assert!(rejected.is_failure());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_product_stays_not_found_when_cached() {
        let (_store, cache, service) = stack(Arc::new(NoMaintenance));

        let first = service.get_by_id(42).await.unwrap();
        assert_eq!(first.data(), Some(&None));
        assert_eq!(cache.len().await, 1);

        let second = service.get_by_id(42).await.unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_found_product_read_back_unchanged() {
        let (_store, cache, service) = stack(Arc::new(NoMaintenance));
        service.add(&chai()).await.unwrap();

        let first = service.get_by_id(1).await.unwrap();
        assert_eq!(first.data(), Some(&Some(chai())));
        assert_eq!(cache.len().await, 1);
        assert_eq!(service.get_by_id(1).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_transactional_add_outcome_survives_failed_invalidation() {
        struct BrokenCache;

        #[async_trait]
        impl CacheManager for BrokenCache {
            async fn get(&self, _key: &str) -> ServiceResult<Option<String>> {
                Ok(None)
            }

            async fn set(
                &self,
                _key: &str,
                _value: String,
                _ttl: Option<Duration>,
            ) -> ServiceResult<()> {
                Ok(())
            }

            async fn remove_by_pattern(&self, _prefix: &str) -> ServiceResult<()> {
                Err(crate::ServiceError::Cache("backend unavailable".into()))
            }
        }

        let categories = InMemoryCategoryStore::with_categories([Category::new(1, "Beverages")]);
        let store = Arc::new(InMemoryProductStore::new(categories.clone()));
        let manager = ProductManager::new(
            store.clone(),
            Arc::new(CategoryManager::new(Arc::new(categories))),
        )
        .with_maintenance(Arc::new(NoMaintenance));
        let service = CachedProductService::new(Arc::new(manager), Arc::new(BrokenCache));

        let outcome = service.add_transactional_test(&chai()).await.unwrap();
        assert_eq!(outcome.message(), Some(messages::PRODUCT_NAME_ALREADY_EXISTS));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_cache_ttl_and_prefix_removal() {
        let cache = MemoryCacheManager::new(Duration::from_secs(60));
        cache.set("ProductService.get_all()", "[]".into(), None).await.unwrap();
        cache.set("Other.key", "1".into(), None).await.unwrap();
        cache
            .set("ProductService.get_by_id(1)", "{}".into(), Some(Duration::ZERO))
            .await
            .unwrap();

        // Zero TTL expires immediately
        assert_eq!(cache.get("ProductService.get_by_id(1)").await.unwrap(), None);

        cache.remove_by_pattern(PRODUCT_QUERY_PREFIX).await.unwrap();
        assert_eq!(cache.get("ProductService.get_all()").await.unwrap(), None);
        assert_eq!(cache.get("Other.key").await.unwrap(), Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_cache_error() {
        let cache = MemoryCacheManager::default();
        cache.set("k", "not json".into(), None).await.unwrap();

        let err = get_json::<Vec<Product>>(&cache, "k").await.unwrap_err();
        assert!(matches!(err, crate::ServiceError::Cache(_)));
    }
}
