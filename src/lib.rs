//! Computer Store - product catalog backend core.
//!
//! This crate implements the business core of a product catalog: category
//! resolution, product rules (validation, category-aware create/update,
//! basket discounts), and bulk import reconciliation, persisted to SQLite.
//! Transport concerns (HTTP routing, request decoding) belong to a consumer
//! of the use-case layer and are not part of this crate.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items for consumers
pub use application::use_cases::{
    CategoryUseCases, ImportOptions, ImportUseCases, ProductUseCases,
};
pub use domain::errors::{CatalogError, CatalogResult};
pub use infrastructure::database_connection::DatabaseConnection;
