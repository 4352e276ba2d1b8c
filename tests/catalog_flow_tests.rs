//! End-to-end catalog flows over a real SQLite database.

use std::sync::Arc;

use anyhow::Result;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use computer_store::application::dto::{BasketItemDto, ProductCreateDto};
use computer_store::application::use_cases::{CategoryUseCases, ProductUseCases};
use computer_store::domain::errors::CatalogError;
use computer_store::domain::repositories::{CategoryRepository, ProductRepository};
use computer_store::infrastructure::database_connection::DatabaseConnection;
use computer_store::infrastructure::repositories::{
    SqliteCategoryRepository, SqliteProductRepository,
};

struct TestCatalog {
    products: ProductUseCases,
    categories: CategoryUseCases,
    _temp_dir: TempDir,
}

async fn setup() -> Result<TestCatalog> {
    let temp_dir = tempfile::tempdir()?;
    let database_url = format!("sqlite:{}", temp_dir.path().join("catalog.db").display());
    let db = DatabaseConnection::new(&database_url).await?;
    db.migrate().await?;

    let pool = Arc::new(db.pool().clone());
    let category_repo: Arc<dyn CategoryRepository> =
        Arc::new(SqliteCategoryRepository::new(Arc::clone(&pool)));
    let product_repo: Arc<dyn ProductRepository> = Arc::new(SqliteProductRepository::new(pool));
    let categories = CategoryUseCases::new(category_repo);
    let products = ProductUseCases::new(product_repo, categories.clone());

    Ok(TestCatalog {
        products,
        categories,
        _temp_dir: temp_dir,
    })
}

fn dto(name: &str, description: Option<&str>, categories: &[&str]) -> ProductCreateDto {
    ProductCreateDto {
        name: name.to_string(),
        description: description.map(|s| s.to_string()),
        price: dec!(329.99),
        quantity: 10,
        categories: categories.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn product_lifecycle_roundtrip() -> Result<()> {
    let catalog = setup().await?;

    let created = catalog
        .products
        .create_product(dto(
            "Ryzen 7 5800X",
            Some("8-core desktop CPU"),
            &["CPU", "Gaming"],
        ))
        .await?;
    assert_eq!(created.id, 1);
    assert_eq!(created.description, "8-core desktop CPU");
    let names: Vec<_> = created.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["CPU", "Gaming"]);

    let fetched = catalog.products.get_product(created.id).await?;
    assert_eq!(fetched.map(|p| p.name), Some("Ryzen 7 5800X".to_string()));
    assert_eq!(catalog.products.get_all_products().await?.len(), 1);

    // full overwrite: empty description becomes the default, the
    // association set is replaced by the supplied list
    let updated = catalog
        .products
        .update_product(
            created.id,
            ProductCreateDto {
                name: "Ryzen 7 5800X3D".to_string(),
                description: Some(String::new()),
                price: dec!(449.99),
                quantity: 4,
                categories: vec!["CPU".to_string()],
            },
        )
        .await?;
    assert_eq!(updated.name, "Ryzen 7 5800X3D");
    assert_eq!(updated.description, "Default description");
    assert_eq!(updated.price, dec!(449.99));
    assert_eq!(updated.quantity, 4);
    let names: Vec<_> = updated.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["CPU"]);

    catalog.products.delete_product(created.id).await?;
    assert!(catalog.products.get_product(created.id).await?.is_none());

    let err = catalog.products.delete_product(created.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn duplicate_product_name_is_a_conflict() -> Result<()> {
    let catalog = setup().await?;
    catalog
        .products
        .create_product(dto("Ryzen 7 5800X", None, &[]))
        .await?;

    let err = catalog
        .products
        .create_product(dto("Ryzen 7 5800X", None, &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Conflict { .. }));
    Ok(())
}

#[tokio::test]
async fn shared_category_names_resolve_to_one_row() -> Result<()> {
    let catalog = setup().await?;

    let first = catalog
        .products
        .create_product(dto("Ryzen 7 5800X", None, &["CPU"]))
        .await?;
    let second = catalog
        .products
        .create_product(dto("Core i7-12700K", None, &["CPU"]))
        .await?;

    assert_eq!(first.categories[0].id, second.categories[0].id);
    assert_eq!(catalog.categories.list_all().await?.len(), 1);

    let resolved_once = catalog.categories.resolve_or_create("GPU").await?;
    let resolved_twice = catalog.categories.resolve_or_create("GPU").await?;
    assert_eq!(resolved_once.id, resolved_twice.id);
    assert_eq!(resolved_once.description, "Default description");
    Ok(())
}

#[tokio::test]
async fn basket_discount_follows_the_cpu_rule() -> Result<()> {
    let catalog = setup().await?;

    let cpu = catalog
        .products
        .create_product(ProductCreateDto {
            name: "Ryzen 7 5800X".to_string(),
            description: None,
            price: dec!(100.00),
            quantity: 10,
            categories: vec!["CPU".to_string()],
        })
        .await?;
    let keyboard = catalog
        .products
        .create_product(ProductCreateDto {
            name: "MX Keys".to_string(),
            description: None,
            price: dec!(50.00),
            quantity: 20,
            categories: vec!["Peripherals".to_string()],
        })
        .await?;

    let basket = vec![
        BasketItemDto {
            product_id: cpu.id,
            quantity: 2,
        },
        BasketItemDto {
            product_id: cpu.id,
            quantity: 1,
        },
        BasketItemDto {
            product_id: keyboard.id,
            quantity: 5,
        },
        BasketItemDto {
            product_id: 9999,
            quantity: 2,
        },
    ];
    let summary = catalog.products.calculate_discount(&basket).await?;

    assert_eq!(summary.items.len(), 3);
    assert_eq!(summary.items[0].discount, dec!(5.00));
    assert_eq!(summary.items[1].discount, dec!(0));
    assert_eq!(summary.items[2].discount, dec!(0));
    assert_eq!(summary.total_discount, dec!(5.00));
    Ok(())
}

#[tokio::test]
async fn clear_catalog_empties_the_store_and_resets_identifiers() -> Result<()> {
    let catalog = setup().await?;

    catalog
        .products
        .create_product(dto("Ryzen 7 5800X", None, &["CPU"]))
        .await?;
    catalog
        .products
        .create_product(dto("MX Keys", None, &["Peripherals"]))
        .await?;

    catalog.products.clear_catalog().await?;

    assert!(catalog.products.get_all_products().await?.is_empty());
    assert!(catalog.categories.list_all().await?.is_empty());

    let recreated = catalog
        .products
        .create_product(dto("Core i5-13600K", None, &["CPU"]))
        .await?;
    assert_eq!(recreated.id, 1);
    assert_eq!(recreated.categories[0].id, 1);
    Ok(())
}
