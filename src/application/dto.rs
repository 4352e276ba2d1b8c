//! Data Transfer Objects for the catalog boundary
//!
//! Contains DTOs for data exchange between the use cases and a transport
//! layer (HTTP controllers or similar).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Category, DiscountDetail, Product};

// ============================================================================
// Product DTOs
// ============================================================================

/// Input shape for creating or fully overwriting a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreateDto {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i64,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponseDto {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i64,
    pub categories: Vec<CategoryResponseDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponseDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            categories: product
                .categories
                .into_iter()
                .map(CategoryResponseDto::from)
                .collect(),
            created_at: product.created_at.to_rfc3339(),
            updated_at: product.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Category DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

// ============================================================================
// Discount DTOs
// ============================================================================

/// Quantity request against a product identifier, used only for discount
/// computation.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BasketItemDto {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DiscountDetailDto {
    pub product_id: i64,
    pub discount: Decimal,
}

/// Per-product discount details, in basket order. The list is the
/// authoritative contract; `total_discount` is derived by summing it.
#[derive(Debug, Clone, Serialize)]
pub struct DiscountSummaryDto {
    pub items: Vec<DiscountDetailDto>,
    pub total_discount: Decimal,
}

impl From<Vec<DiscountDetail>> for DiscountSummaryDto {
    fn from(details: Vec<DiscountDetail>) -> Self {
        let total_discount: Decimal = details.iter().map(|d| d.discount).sum();
        Self {
            items: details
                .into_iter()
                .map(|d| DiscountDetailDto {
                    product_id: d.product_id,
                    discount: d.discount,
                })
                .collect(),
            total_discount,
        }
    }
}

// ============================================================================
// Import DTOs
// ============================================================================

/// One record of an externally supplied import batch.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductImportDto {
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Outcome counts for an import batch.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ImportSummaryDto {
    pub created: u32,
    pub updated: u32,
    pub failed: u32,
}
