//! Domain entities
//!
//! Contains the core catalog entities and the transient shapes used by the
//! discount calculation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product with its category associations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product carries a category with exactly this name.
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }
}

/// Insert shape for a product whose category references are already resolved
/// to persisted category identifiers.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    pub category_ids: Vec<i64>,
}

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert shape for a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// Join row between a product and a category. Composite identity; its
/// lifecycle is bound to the owning product's association set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub product_id: i64,
    pub category_id: i64,
}

/// Transient output of the discount calculation. Not persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscountDetail {
    pub product_id: i64,
    pub discount: Decimal,
}
