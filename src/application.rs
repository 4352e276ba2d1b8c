//! Application layer - use cases and DTOs
//!
//! Contains the catalog use cases (category resolution, product rules,
//! discount calculation, import reconciliation) and the data transfer
//! objects exchanged with a transport layer.

pub mod dto;
pub mod use_cases;

// Re-export commonly used items
pub use use_cases::{CategoryUseCases, ImportOptions, ImportUseCases, ProductUseCases};
