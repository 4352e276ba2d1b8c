//! SQLite repository implementations for the catalog store
//!
//! Concrete implementations of the domain repository traits over an sqlx
//! SQLite pool. Prices are stored as TEXT and parsed into `Decimal` on read;
//! association rows are written inside the same transaction as the owning
//! product.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::{Category, NewCategory, NewProduct, Product};
use crate::domain::repositories::{CategoryRepository, ProductRepository};

fn product_from_row(row: &SqliteRow) -> Result<Product> {
    let price: String = row.try_get("price")?;
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: price
            .parse::<Decimal>()
            .with_context(|| format!("invalid stored price '{price}'"))?,
        quantity: row.try_get("quantity")?,
        categories: Vec::new(),
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

fn category_from_row(row: &SqliteRow) -> Result<Category> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

/// Repository for product rows and their category association rows.
#[derive(Clone)]
pub struct SqliteProductRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteProductRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    async fn load_categories(&self, product_id: i64) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.name, c.description, c.created_at, c.updated_at
            FROM categories c
            INNER JOIN product_categories pc ON pc.category_id = c.id
            WHERE pc.product_id = ?
            ORDER BY c.id
            "#,
        )
        .bind(product_id)
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(category_from_row).collect()
    }

    async fn hydrate(&self, mut product: Product) -> Result<Product> {
        product.categories = self.load_categories(product.id).await?;
        Ok(product)
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn save(&self, product: &NewProduct) -> Result<Product> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, quantity, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.to_string())
        .bind(product.quantity)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        let product_id = result.last_insert_rowid();

        for &category_id in &product.category_ids {
            sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)")
                .bind(product_id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        self.find_by_id(product_id)
            .await?
            .context("product row missing immediately after insert")
    }

    async fn update(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, description = ?, price = ?, quantity = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.to_string())
        .bind(product.quantity)
        .bind(Utc::now())
        .bind(product.id)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn replace_categories(&self, product_id: i64, category_ids: &[i64]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM product_categories WHERE product_id = ?")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        for &category_id in category_ids {
            sqlx::query("INSERT INTO product_categories (product_id, category_id) VALUES (?, ?)")
                .bind(product_id)
                .bind(category_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let row = sqlx::query(
            "SELECT id, name, description, price, quantity, created_at, updated_at FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        match row {
            Some(row) => {
                let product = product_from_row(&row)?;
                Ok(Some(self.hydrate(product).await?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>> {
        let row = sqlx::query(
            "SELECT id, name, description, price, quantity, created_at, updated_at FROM products WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&*self.pool)
        .await?;

        match row {
            Some(row) => {
                let product = product_from_row(&row)?;
                Ok(Some(self.hydrate(product).await?))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price, quantity, created_at, updated_at FROM products ORDER BY id",
        )
        .fetch_all(&*self.pool)
        .await?;

        let mut products = Vec::with_capacity(rows.len());
        for row in &rows {
            let product = product_from_row(row)?;
            products.push(self.hydrate(product).await?);
        }
        Ok(products)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM product_categories WHERE product_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear_catalog(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        // dependency order: associations, then products, then categories
        sqlx::query("DELETE FROM product_categories")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM products").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM categories")
            .execute(&mut *tx)
            .await?;

        // sqlite_sequence only exists once an AUTOINCREMENT table has rows
        let has_sequence = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
        )
        .fetch_optional(&mut *tx)
        .await?
        .is_some();
        if has_sequence {
            sqlx::query("DELETE FROM sqlite_sequence WHERE name IN ('products', 'categories')")
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Repository for category rows.
#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteCategoryRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn save(&self, category: &NewCategory) -> Result<Category> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(now)
        .bind(now)
        .execute(&*self.pool)
        .await?;

        self.find_by_id(result.last_insert_rowid())
            .await?
            .context("category row missing immediately after insert")
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query(
            "SELECT id, name, description, created_at, updated_at FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await?;

        row.as_ref().map(category_from_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row = sqlx::query(
            "SELECT id, name, description, created_at, updated_at FROM categories WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&*self.pool)
        .await?;

        row.as_ref().map(category_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT id, name, description, created_at, updated_at FROM categories ORDER BY id",
        )
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(category_from_row).collect()
    }
}
