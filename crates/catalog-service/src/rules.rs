//! # Async Rule Evaluation
//!
//! The async counterpart of [`BusinessRules::run_lazy`](catalog_core::BusinessRules::run_lazy).
//!
//! Each rule is a boxed future that has not been polled yet. Futures do
//! nothing until awaited, so a rule after the first failure never issues its
//! query.
//!
//! ```rust,ignore
//! let failure = run_rules(vec![
//!     rules.check_if_product_name_exists(&product.product_name).boxed(),
//!     rules.check_if_category_limit_exceeded().boxed(),
//! ])
//! .await?;
//! ```

use futures_util::future::BoxFuture;

use catalog_core::OpResult;

use crate::error::ServiceResult;

/// A rule waiting to be evaluated.
pub type Rule<'a> = BoxFuture<'a, ServiceResult<OpResult>>;

/// Awaits `rules` in order and returns the first failure.
///
/// `Ok(None)` means every rule passed. A fault from any rule is returned as
/// `Err` immediately and the remaining rules are dropped unpolled.
pub async fn run_rules(rules: Vec<Rule<'_>>) -> ServiceResult<Option<OpResult>> {
    for rule in rules {
        let outcome = rule.await?;
        if outcome.is_failure() {
            return Ok(Some(outcome));
        }
    }
    Ok(None)
}
