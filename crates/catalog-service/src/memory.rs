//! # In-Memory Collaborators
//!
//! `Vec`-backed stores for tests and demos. They follow the SQLite
//! repositories: same filter semantics, same ordering by id, same
//! `UniqueViolation` on a duplicate id.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use catalog_core::{Category, CategoryId, Product, ProductDetail, ProductFilter};
use catalog_db::DbError;

use crate::error::ServiceResult;
use crate::store::{CategoryStore, ProductStore};

// =============================================================================
// Categories
// =============================================================================

/// Category list shared between clones.
///
/// [`InMemoryProductStore`] holds a clone to resolve category names.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCategoryStore {
    categories: Arc<RwLock<Vec<Category>>>,
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut categories: Vec<Category> = categories.into_iter().collect();
        categories.sort_by_key(|c| c.category_id);
        InMemoryCategoryStore {
            categories: Arc::new(RwLock::new(categories)),
        }
    }

    pub async fn add(&self, category: Category) -> ServiceResult<()> {
        let mut categories = self.categories.write().await;
        if categories
            .iter()
            .any(|c| c.category_id == category.category_id)
        {
            return Err(DbError::UniqueViolation {
                field: "categories.category_id".to_string(),
                value: category.category_id.to_string(),
            }
            .into());
        }
        categories.push(category);
        categories.sort_by_key(|c| c.category_id);
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn get_all(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.categories.read().await.clone())
    }

    async fn get_by_id(&self, id: CategoryId) -> ServiceResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.category_id == id).cloned())
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
    categories: InMemoryCategoryStore,
}

impl InMemoryProductStore {
    /// Creates an empty store that resolves category names through `categories`.
    pub fn new(categories: InMemoryCategoryStore) -> Self {
        InMemoryProductStore {
            products: RwLock::new(Vec::new()),
            categories,
        }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn add(&self, product: &Product) -> ServiceResult<()> {
        let mut products = self.products.write().await;
        if products.iter().any(|p| p.product_id == product.product_id) {
            return Err(DbError::UniqueViolation {
                field: "products.product_id".to_string(),
                value: product.product_id.to_string(),
            }
            .into());
        }

        debug!(product_id = product.product_id, "Storing product in memory");
        products.push(product.clone());
        products.sort_by_key(|p| p.product_id);
        Ok(())
    }

    async fn get(&self, filter: &ProductFilter) -> ServiceResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| filter.matches(p)).cloned())
    }

    async fn get_all(&self, filter: Option<&ProductFilter>) -> ServiceResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(match filter {
            Some(filter) => products.iter().filter(|p| filter.matches(p)).cloned().collect(),
            None => products.clone(),
        })
    }

    async fn get_product_details(&self) -> ServiceResult<Vec<ProductDetail>> {
        let categories = self.categories.categories.read().await;
        let products = self.products.read().await;

        // Inner join: products without a category row are skipped
        let details = products
            .iter()
            .filter_map(|p| {
                let category = categories.iter().find(|c| c.category_id == p.category_id)?;
                Some(ProductDetail {
                    product_id: p.product_id,
                    product_name: p.product_name.clone(),
                    category_name: category.category_name.clone(),
                    units_in_stock: p.units_in_stock,
                })
            })
            .collect();

        Ok(details)
    }
}
