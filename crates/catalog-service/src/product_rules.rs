//! # Product Rule Set
//!
//! The queries behind each product rule. Every check fetches what it needs
//! from a collaborator and hands the number to a predicate in
//! [`catalog_core::rules`].
//!
//! | Check                                         | Query                        | Fails when          |
//! |-----------------------------------------------|------------------------------|---------------------|
//! | `check_if_product_name_exists`                | products with the same name  | any exist           |
//! | `check_if_product_count_of_category_correct`  | products in the category     | `>= max_products`   |
//! | `check_if_category_limit_exceeded`            | all categories               | `> max_categories`  |
//! | `check_if_category_accepts_update`            | products in the category     | `>= update_threshold` |

use std::sync::Arc;

use tracing::debug;

use catalog_core::rules::{self as predicates, RuleLimits};
use catalog_core::{CategoryId, OpResult, ProductFilter};

use crate::category::CategoryService;
use crate::error::ServiceResult;
use crate::store::ProductStore;

#[derive(Clone)]
pub struct ProductRules {
    products: Arc<dyn ProductStore>,
    categories: Arc<dyn CategoryService>,
    limits: RuleLimits,
}

impl ProductRules {
    pub fn new(
        products: Arc<dyn ProductStore>,
        categories: Arc<dyn CategoryService>,
        limits: RuleLimits,
    ) -> Self {
        ProductRules {
            products,
            categories,
            limits,
        }
    }

    pub fn with_limits(self, limits: RuleLimits) -> Self {
        ProductRules { limits, ..self }
    }

    pub fn limits(&self) -> &RuleLimits {
        &self.limits
    }

    /// Exact, case-sensitive match against every stored name.
    pub async fn check_if_product_name_exists(&self, name: &str) -> ServiceResult<OpResult> {
        let matches = self
            .products
            .get_all(Some(&ProductFilter::ByName(name.to_string())))
            .await?;

        debug!(name, taken = !matches.is_empty(), "Checked product name");
        Ok(predicates::product_name_available(!matches.is_empty()))
    }

    /// Counts the products already stored in `category_id`.
    pub async fn check_if_product_count_of_category_correct(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<OpResult> {
        let count = self.products_in_category(category_id).await?;
        Ok(predicates::category_has_room(count, &self.limits))
    }

    /// Counts all categories.
    ///
    /// A failed listing from the category service is returned as this
    /// rule's failure.
    pub async fn check_if_category_limit_exceeded(&self) -> ServiceResult<OpResult> {
        let listed = self.categories.get_all().await?;
        if listed.is_failure() {
            return Ok(listed.into());
        }

        let count = listed.data().map_or(0, Vec::len);
        debug!(count, max = self.limits.max_categories, "Checked category count");
        Ok(predicates::category_count_within_limit(count, &self.limits))
    }

    /// Update-path pre-check, stricter than the add-path category check.
    pub async fn check_if_category_accepts_update(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<OpResult> {
        let count = self.products_in_category(category_id).await?;
        Ok(predicates::category_accepts_update(count, &self.limits))
    }

    async fn products_in_category(&self, category_id: CategoryId) -> ServiceResult<usize> {
        let products = self
            .products
            .get_all(Some(&ProductFilter::ByCategory(category_id)))
            .await?;

        debug!(category_id, count = products.len(), "Counted products in category");
        Ok(products.len())
    }
}
