//! # Category Service
//!
//! Read access to categories. The product rules only ask it for the full
//! list and count the entries.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use catalog_core::{Category, CategoryId, DataResult};

use crate::error::ServiceResult;
use crate::store::CategoryStore;

#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn get_all(&self) -> ServiceResult<DataResult<Vec<Category>>>;

    /// `data` is `None` when no category has this id.
    async fn get_by_id(&self, id: CategoryId) -> ServiceResult<DataResult<Option<Category>>>;
}

pub struct CategoryManager {
    store: Arc<dyn CategoryStore>,
}

impl CategoryManager {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        CategoryManager { store }
    }
}

#[async_trait]
impl CategoryService for CategoryManager {
    async fn get_all(&self) -> ServiceResult<DataResult<Vec<Category>>> {
        let categories = self.store.get_all().await?;
        debug!(count = categories.len(), "Listed categories");
        Ok(DataResult::success(categories))
    }

    async fn get_by_id(&self, id: CategoryId) -> ServiceResult<DataResult<Option<Category>>> {
        Ok(DataResult::success(self.store.get_by_id(id).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCategoryStore;

    #[tokio::test]
    async fn test_get_all_and_by_id() {
        let store = InMemoryCategoryStore::with_categories([
            Category::new(1, "Beverages"),
            Category::new(2, "Condiments"),
        ]);
        let manager = CategoryManager::new(Arc::new(store));

        let all = manager.get_all().await.unwrap();
        assert!(all.is_success());
        assert_eq!(all.data().map(Vec::len), Some(2));

        let missing = manager.get_by_id(9).await.unwrap();
        assert!(missing.is_success());
        assert_eq!(missing.into_data(), Some(None));
    }
}
