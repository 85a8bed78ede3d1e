//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  ProductManager                                                        │
//! │       │                                                                 │
//! │       │  store.get_all(Some(&ProductFilter::ByCategory(3)))            │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── add(&self, product)                                               │
//! │  ├── get(&self, filter)                                                │
//! │  ├── get_all(&self, filter)                                            │
//! │  └── get_product_details(&self)                                        │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product queries and inserts
//! - [`CategoryRepository`](category::CategoryRepository) - Category queries and inserts

pub mod category;
pub mod product;
