//! Catalog domain constants
//!
//! Business rule parameters shared across the catalog operations.

/// Field constraints applied to products and categories at persistence time.
pub mod catalog {
    use rust_decimal::Decimal;

    /// Description stored when none is provided.
    pub const DEFAULT_DESCRIPTION: &str = "Default description";

    /// Maximum length of a product or category name.
    pub const MAX_NAME_LEN: usize = 100;

    /// Lower bound of the valid price range, inclusive (0.01).
    pub const PRICE_MIN: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

    /// Upper bound of the valid price range, inclusive (10000.00).
    pub const PRICE_MAX: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 2);
}

/// Basket discount rule parameters.
pub mod discount {
    use rust_decimal::Decimal;

    /// Category whose products are eligible for the basket discount.
    pub const CATEGORY: &str = "CPU";

    /// Minimum requested quantity for the discount to apply.
    pub const MIN_QUANTITY: i64 = 2;

    /// Rate applied to the unit price when the rule matches (0.05).
    pub const RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
}
