//! User-facing messages carried by [`OpResult`](crate::OpResult) and
//! [`DataResult`](crate::DataResult).

pub const PRODUCT_ADDED: &str = "Product added";
pub const PRODUCTS_LISTED: &str = "Products listed";
pub const MAINTENANCE_TIME: &str = "System is under maintenance";

pub const PRODUCT_NAME_ALREADY_EXISTS: &str = "A product with this name already exists";
pub const PRODUCT_COUNT_OF_CATEGORY_ERROR: &str =
    "The category has reached its maximum number of products";
pub const CATEGORY_LIMIT_EXCEEDED: &str =
    "Category limit exceeded, new products cannot be added";

pub const AUTHORIZATION_DENIED: &str = "You are not authorized for this operation";
