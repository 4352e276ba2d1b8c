//! Repository interfaces for the catalog store
//!
//! Contains trait definitions for data access. Concrete SQLite
//! implementations live in the infrastructure layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{Category, NewCategory, NewProduct, Product};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn save(&self, category: &NewCategory) -> Result<Category>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>>;
    async fn find_all(&self) -> Result<Vec<Category>>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert the product and its association rows in one transaction,
    /// returning the stored product with its assigned identifier.
    async fn save(&self, product: &NewProduct) -> Result<Product>;

    /// Overwrite the scalar fields (name, description, price, quantity).
    /// Associations are managed separately via `replace_categories`.
    async fn update(&self, product: &Product) -> Result<()>;

    /// Drop every association row for the product and reinsert the given set.
    async fn replace_categories(&self, product_id: i64, category_ids: &[i64]) -> Result<()>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>>;
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// Remove the product and its associations. Returns false when absent.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Remove every association, product, and category (in that dependency
    /// order) and reset the identifier sequences so the next insert gets 1.
    async fn clear_catalog(&self) -> Result<()>;
}
