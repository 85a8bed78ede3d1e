//! # Authorization
//!
//! Role checks in front of the mutating product operations.
//!
//! `UserClaims` come from whatever authenticated the caller; issuing and
//! verifying tokens happens elsewhere.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use catalog_core::{CategoryId, DataResult, Money, OpResult, Product, ProductDetail, ProductId};

use crate::error::{ServiceError, ServiceResult};
use crate::manager::ProductService;

/// Roles allowed to add products.
pub const PRODUCT_ADD_ROLES: &[&str] = &["product.add", "admin"];

/// The authenticated caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    pub user_id: String,
    pub roles: Vec<String>,
}

impl UserClaims {
    pub fn new(
        user_id: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        UserClaims {
            user_id: user_id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the caller holds at least one of `required`.
    pub fn has_any_role(&self, required: &[&str]) -> bool {
        let held: HashSet<&str> = self.roles.iter().map(String::as_str).collect();
        required.iter().any(|role| held.contains(role))
    }
}

/// Checks `claims` against `required`.
pub fn authorize(claims: &UserClaims, required: &[&str]) -> ServiceResult<()> {
    if claims.has_any_role(required) {
        Ok(())
    } else {
        warn!(user_id = %claims.user_id, ?required, "Authorization denied");
        Err(ServiceError::AuthorizationDenied)
    }
}

/// Requires one of [`PRODUCT_ADD_ROLES`] before anything that adds products.
///
/// Built per caller: the claims are fixed for the lifetime of the wrapper.
pub struct SecuredProductService {
    inner: Arc<dyn ProductService>,
    claims: UserClaims,
}

impl SecuredProductService {
    pub fn new(inner: Arc<dyn ProductService>, claims: UserClaims) -> Self {
        SecuredProductService { inner, claims }
    }
}

#[async_trait]
impl ProductService for SecuredProductService {
    async fn add(&self, product: &Product) -> ServiceResult<OpResult> {
        authorize(&self.claims, PRODUCT_ADD_ROLES)?;
        self.inner.add(product).await
    }

    async fn update(&self, product: &Product) -> ServiceResult<OpResult> {
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
        authorize(&self.claims, PRODUCT_ADD_ROLES)?;
        self.inner.add_transactional_test(product).await
    }
}
