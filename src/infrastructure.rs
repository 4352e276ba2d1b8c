//! Infrastructure layer for database connections, persistence, and runtime setup
//!
//! Contains the SQLite connection/pool management, the concrete repository
//! implementations, configuration loading, and logging initialization.

pub mod config;
pub mod database_connection;
pub mod logging;
pub mod repositories;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, DatabaseConfig, LoggingConfig};
pub use database_connection::DatabaseConnection;
pub use repositories::{SqliteCategoryRepository, SqliteProductRepository};
