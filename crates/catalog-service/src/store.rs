//! # Storage Collaborators
//!
//! The traits the product service talks to, and their SQLite implementations.
//!
//! ```text
//! ProductManager ──► Arc<dyn ProductStore>  ──► ProductRepository (SQLite)
//!                                            └─► InMemoryProductStore
//!
//! CategoryManager ─► Arc<dyn CategoryStore> ──► CategoryRepository (SQLite)
//!                                            └─► InMemoryCategoryStore
//! ```
//!
//! Faults come back as `Err(ServiceError::Db(..))` and are never turned into
//! business-rule failures.

use async_trait::async_trait;

use catalog_core::{Category, CategoryId, Product, ProductDetail, ProductFilter};
use catalog_db::{CategoryRepository, ProductRepository};

use crate::error::ServiceResult;

/// Product persistence.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn add(&self, product: &Product) -> ServiceResult<()>;

    /// First product matching `filter`, or `None`.
    async fn get(&self, filter: &ProductFilter) -> ServiceResult<Option<Product>>;

    /// Every product matching `filter`; `None` selects all.
    async fn get_all(&self, filter: Option<&ProductFilter>) -> ServiceResult<Vec<Product>>;

    /// Products joined with their category names.
    async fn get_product_details(&self) -> ServiceResult<Vec<ProductDetail>>;
}

/// Category persistence.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn get_all(&self) -> ServiceResult<Vec<Category>>;

    async fn get_by_id(&self, id: CategoryId) -> ServiceResult<Option<Category>>;
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn add(&self, product: &Product) -> ServiceResult<()> {
        Ok(ProductRepository::add(self, product).await?)
    }

    async fn get(&self, filter: &ProductFilter) -> ServiceResult<Option<Product>> {
        Ok(ProductRepository::get(self, filter).await?)
    }

    async fn get_all(&self, filter: Option<&ProductFilter>) -> ServiceResult<Vec<Product>> {
        Ok(ProductRepository::get_all(self, filter).await?)
    }

    async fn get_product_details(&self) -> ServiceResult<Vec<ProductDetail>> {
        Ok(ProductRepository::get_product_details(self).await?)
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn get_all(&self) -> ServiceResult<Vec<Category>> {
        Ok(CategoryRepository::get_all(self).await?)
    }

    async fn get_by_id(&self, id: CategoryId) -> ServiceResult<Option<Category>> {
        Ok(CategoryRepository::get_by_id(self, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Money;
    use catalog_db::{Database, DbConfig};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_sqlite_repositories_behind_traits() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.categories()
            .add(&Category::new(1, "Beverages"))
            .await
            .unwrap();

        let products: Arc<dyn ProductStore> = Arc::new(db.products());
        let categories: Arc<dyn CategoryStore> = Arc::new(db.categories());

        products
            .add(&Product::new(1, 1, "Chai", Money::from_cents(1800)))
            .await
            .unwrap();

        let chai = products.get(&ProductFilter::ByName("Chai".into())).await.unwrap();
        assert_eq!(chai.map(|p| p.product_id), Some(1));
        assert_eq!(products.get_all(None).await.unwrap().len(), 1);
        assert_eq!(
            products.get_product_details().await.unwrap()[0].category_name,
            "Beverages"
        );
        assert_eq!(categories.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fault_surfaces_as_db_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let products: Arc<dyn ProductStore> = Arc::new(db.products());

        let err = products
            .add(&Product::new(1, 99, "Orphan", Money::from_cents(100)))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::ServiceError::Db(_)));
    }
}
