//! Input validation in front of `add` and `update`.
//!
//! An invalid product is rejected with `ServiceError::Validation` before the
//! wrapped service sees it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use catalog_core::validation::ProductValidator;
use catalog_core::{CategoryId, DataResult, Money, OpResult, Product, ProductDetail, ProductId};

use crate::error::ServiceResult;
use crate::manager::ProductService;

pub struct ValidatedProductService {
    inner: Arc<dyn ProductService>,
}

impl ValidatedProductService {
    pub fn new(inner: Arc<dyn ProductService>) -> Self {
        ValidatedProductService { inner }
    }

    fn validate(product: &Product) -> ServiceResult<()> {
        ProductValidator::validate(product).map_err(|err| {
            debug!(product_id = product.product_id, %err, "Product failed validation");
            err.into()
        })
    }
}

#[async_trait]
impl ProductService for ValidatedProductService {
    async fn add(&self, product: &Product) -> ServiceResult<OpResult> {
        Self::validate(product)?;
        self.inner.add(product).await
    }

    async fn update(&self, product: &Product) -> ServiceResult<OpResult> {
        Self::validate(product)?;
        self.inner.update(product).await
    }

    async fn get_all(&self) -> ServiceResult<DataResult<Vec<Product>>> {
        self.inner.get_all().await
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
        self.inner.get_by_id(product_id).await
    }

    async fn get_by_unit_price(
        &self,
        min: Money,
        max: Money,
    ) -> ServiceResult<DataResult<Vec<Product>>> {
        self.inner.get_by_unit_price(min, max).await
    }

    async fn add_transactional_test(&self, product: &Product) -> ServiceResult<OpResult> {
        Self::validate(product)?;
        self.inner.add_transactional_test(product).await
    }
}
