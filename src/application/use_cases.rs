//! Application use cases for the product catalog
//!
//! Contains the catalog's business workflows: category resolution, product
//! rules (validation, duplicate checks, category-aware create/update),
//! basket discount calculation, and bulk import reconciliation. These are
//! the operations a transport layer consumes.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::dto::{
    BasketItemDto, DiscountSummaryDto, ImportSummaryDto, ProductCreateDto, ProductImportDto,
    ProductResponseDto,
};
use crate::domain::constants::{catalog, discount};
use crate::domain::entities::{Category, DiscountDetail, NewCategory, NewProduct, Product};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::repositories::{CategoryRepository, ProductRepository};

// ============================================================================
// Category resolution
// ============================================================================

/// Use cases for category lookup and resolve-or-create semantics.
#[derive(Clone)]
pub struct CategoryUseCases {
    category_repo: Arc<dyn CategoryRepository>,
}

impl CategoryUseCases {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    /// Exact-match lookup by name.
    pub async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Category>> {
        Ok(self.category_repo.find_by_name(name).await?)
    }

    /// Return the existing category with this name, or create one with the
    /// default description. Check-then-act: concurrent calls with the same
    /// name race, and the store uniqueness constraint is the backstop.
    pub async fn resolve_or_create(&self, name: &str) -> CatalogResult<Category> {
        if let Some(existing) = self.category_repo.find_by_name(name).await? {
            return Ok(existing);
        }

        validate_name(name, "category")?;
        let new_category = NewCategory {
            name: name.to_string(),
            description: catalog::DEFAULT_DESCRIPTION.to_string(),
        };
        let category = self
            .category_repo
            .save(&new_category)
            .await
            .map_err(|e| CatalogError::from_store_error(e, "category"))?;
        info!(category_id = category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Every category, no ordering guarantee.
    pub async fn list_all(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.category_repo.find_all().await?)
    }
}

// ============================================================================
// Product rules
// ============================================================================

/// Use cases for product CRUD, category reconciliation, and the basket
/// discount calculation.
#[derive(Clone)]
pub struct ProductUseCases {
    product_repo: Arc<dyn ProductRepository>,
    categories: CategoryUseCases,
}

impl ProductUseCases {
    pub fn new(product_repo: Arc<dyn ProductRepository>, categories: CategoryUseCases) -> Self {
        Self {
            product_repo,
            categories,
        }
    }

    pub async fn get_all_products(&self) -> CatalogResult<Vec<ProductResponseDto>> {
        let products = self.product_repo.find_all().await?;
        Ok(products.into_iter().map(ProductResponseDto::from).collect())
    }

    /// Lookup by identifier. `None` maps to not-found at the caller.
    pub async fn get_product(&self, product_id: i64) -> CatalogResult<Option<ProductResponseDto>> {
        Ok(self
            .product_repo
            .find_by_id(product_id)
            .await?
            .map(ProductResponseDto::from))
    }

    /// Exact-match lookup by name, hydrated with categories.
    pub async fn find_by_name(&self, name: &str) -> CatalogResult<Option<Product>> {
        Ok(self.product_repo.find_by_name(name).await?)
    }

    /// Create a product. Category references are resolved against the
    /// existing categories by name so no duplicate category rows appear;
    /// missing ones are created with the default description. The product
    /// and its association rows are persisted in one store transaction.
    pub async fn create_product(&self, dto: ProductCreateDto) -> CatalogResult<ProductResponseDto> {
        validate_product_input(&dto)?;

        if self.product_repo.find_by_name(&dto.name).await?.is_some() {
            return Err(CatalogError::conflict(format!(
                "product with name '{}' already exists",
                dto.name
            )));
        }

        let category_ids = self.resolve_category_names(&dto.categories).await?;
        let new_product = NewProduct {
            name: dto.name,
            description: normalize_description(dto.description),
            price: dto.price,
            quantity: dto.quantity,
            category_ids,
        };

        let product = self
            .product_repo
            .save(&new_product)
            .await
            .map_err(|e| CatalogError::from_store_error(e, "product"))?;
        info!(product_id = product.id, name = %product.name, "product created");
        Ok(ProductResponseDto::from(product))
    }

    /// Overwrite every field of an existing product and replace its
    /// association set with the one implied by the supplied category names.
    /// Fields are never merged; an empty description becomes the default.
    pub async fn update_product(
        &self,
        product_id: i64,
        dto: ProductCreateDto,
    ) -> CatalogResult<ProductResponseDto> {
        validate_product_input(&dto)?;

        let mut product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("product {product_id}")))?;

        product.name = dto.name;
        product.description = normalize_description(dto.description);
        product.price = dto.price;
        product.quantity = dto.quantity;

        self.product_repo
            .update(&product)
            .await
            .map_err(|e| CatalogError::from_store_error(e, "product"))?;

        let category_ids = self.resolve_category_names(&dto.categories).await?;
        self.product_repo
            .replace_categories(product_id, &category_ids)
            .await?;

        let updated = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("product {product_id}")))?;
        info!(product_id, name = %updated.name, "product updated");
        Ok(ProductResponseDto::from(updated))
    }

    /// Remove a product; its associations go with it.
    pub async fn delete_product(&self, product_id: i64) -> CatalogResult<()> {
        let removed = self.product_repo.delete(product_id).await?;
        if !removed {
            return Err(CatalogError::not_found(format!("product {product_id}")));
        }
        info!(product_id, "product deleted");
        Ok(())
    }

    /// Compute per-item basket discounts, in basket order. Items referencing
    /// a product that does not exist are excluded from the output; items for
    /// existing products always get an entry, discount 0 when the rule does
    /// not match.
    pub async fn calculate_discount(
        &self,
        basket_items: &[BasketItemDto],
    ) -> CatalogResult<DiscountSummaryDto> {
        let mut details = Vec::with_capacity(basket_items.len());
        for item in basket_items {
            let Some(product) = self.product_repo.find_by_id(item.product_id).await? else {
                continue;
            };

            let amount = if product.has_category(discount::CATEGORY)
                && item.quantity >= discount::MIN_QUANTITY
            {
                product.price * discount::RATE
            } else {
                Decimal::ZERO
            };
            details.push(DiscountDetail {
                product_id: item.product_id,
                discount: amount,
            });
        }
        Ok(DiscountSummaryDto::from(details))
    }

    /// Remove every association, product, and category and reset the
    /// identifier sequences so the next created entity receives id 1.
    pub async fn clear_catalog(&self) -> CatalogResult<()> {
        self.product_repo.clear_catalog().await?;
        info!("catalog cleared, identifier sequences reset");
        Ok(())
    }

    /// Resolve category names to persisted category ids, deduplicating
    /// repeated names while preserving first-occurrence order.
    async fn resolve_category_names(&self, names: &[String]) -> CatalogResult<Vec<i64>> {
        let mut seen = HashSet::new();
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let category = self.categories.resolve_or_create(name).await?;
            ids.push(category.id);
        }
        Ok(ids)
    }
}

// ============================================================================
// Import reconciliation
// ============================================================================

/// Behavior switches for the import reconciler.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Keep processing records after one fails instead of aborting the
    /// batch. Either way, records committed before a failure stay committed.
    #[serde(default)]
    pub continue_on_record_error: bool,
}

enum ImportOutcome {
    Created,
    Updated,
}

/// Use cases for merging an externally supplied product batch into the
/// catalog with create-or-increment semantics.
pub struct ImportUseCases {
    product_repo: Arc<dyn ProductRepository>,
    products: ProductUseCases,
    options: ImportOptions,
}

impl ImportUseCases {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        products: ProductUseCases,
        options: ImportOptions,
    ) -> Self {
        Self {
            product_repo,
            products,
            options,
        }
    }

    /// Decode a JSON array of import records and merge it into the catalog.
    pub async fn import_json(&self, payload: &str) -> CatalogResult<ImportSummaryDto> {
        let records: Vec<ProductImportDto> = serde_json::from_str(payload)?;
        self.import(records).await
    }

    /// Merge records in input order: unknown names are created through the
    /// product rules, known names get their stored quantity incremented
    /// (price, description, and categories untouched).
    pub async fn import(&self, records: Vec<ProductImportDto>) -> CatalogResult<ImportSummaryDto> {
        let mut summary = ImportSummaryDto::default();
        for record in records {
            match self.import_record(&record).await {
                Ok(ImportOutcome::Created) => summary.created += 1,
                Ok(ImportOutcome::Updated) => summary.updated += 1,
                Err(err) if self.options.continue_on_record_error => {
                    warn!(name = %record.name, error = %err, "import record failed, continuing");
                    summary.failed += 1;
                }
                Err(err) => return Err(err),
            }
        }
        info!(
            created = summary.created,
            updated = summary.updated,
            failed = summary.failed,
            "product import finished"
        );
        Ok(summary)
    }

    async fn import_record(&self, record: &ProductImportDto) -> CatalogResult<ImportOutcome> {
        match self.product_repo.find_by_name(&record.name).await? {
            None => {
                let dto = ProductCreateDto {
                    name: record.name.clone(),
                    description: record.description.clone(),
                    price: record.price,
                    quantity: record.quantity,
                    categories: record.categories.clone(),
                };
                self.products.create_product(dto).await?;
                Ok(ImportOutcome::Created)
            }
            Some(mut existing) => {
                existing.quantity += record.quantity;
                if existing.description.is_empty() {
                    existing.description = catalog::DEFAULT_DESCRIPTION.to_string();
                }
                self.product_repo
                    .update(&existing)
                    .await
                    .map_err(|e| CatalogError::from_store_error(e, "product"))?;
                Ok(ImportOutcome::Updated)
            }
        }
    }
}

// ============================================================================
// Input validation
// ============================================================================

fn normalize_description(description: Option<String>) -> String {
    match description {
        Some(d) if !d.is_empty() => d,
        _ => catalog::DEFAULT_DESCRIPTION.to_string(),
    }
}

fn validate_product_input(dto: &ProductCreateDto) -> CatalogResult<()> {
    if dto.name.trim().is_empty() {
        return Err(CatalogError::validation("product name is required"));
    }
    if dto.name.chars().count() > catalog::MAX_NAME_LEN {
        return Err(CatalogError::validation(format!(
            "product name must be at most {} characters",
            catalog::MAX_NAME_LEN
        )));
    }
    if dto.price < catalog::PRICE_MIN || dto.price > catalog::PRICE_MAX {
        return Err(CatalogError::validation(format!(
            "price must be between {} and {}",
            catalog::PRICE_MIN,
            catalog::PRICE_MAX
        )));
    }
    if dto.quantity < 0 {
        return Err(CatalogError::validation(
            "quantity must be a non-negative number",
        ));
    }
    for name in &dto.categories {
        validate_name(name, "category")?;
    }
    Ok(())
}

fn validate_name(name: &str, kind: &str) -> CatalogResult<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::validation(format!("{kind} name is required")));
    }
    if name.chars().count() > catalog::MAX_NAME_LEN {
        return Err(CatalogError::validation(format!(
            "{kind} name must be at most {} characters",
            catalog::MAX_NAME_LEN
        )));
    }
    Ok(())
}
