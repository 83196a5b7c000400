//! `ProductStore` adapters.
//!
//! Both adapters enforce the same column limits so a row rejected by
//! PostgreSQL is also rejected in memory.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

use catalog_core::{DomainError, DomainResult};
use catalog_products::Product;

/// `products.name` is `VARCHAR(100)`.
pub const NAME_MAX_LEN: usize = 100;

/// `products.description` is `VARCHAR(250)`.
pub const DESCRIPTION_MAX_LEN: usize = 250;

pub(crate) fn check_column_limits(operation: &str, product: &Product) -> DomainResult<()> {
    if product.name.chars().count() > NAME_MAX_LEN {
        return Err(DomainError::data(format!(
            "{operation}: value too long for name (max {NAME_MAX_LEN})"
        )));
    }
    if let Some(description) = &product.description {
        if description.chars().count() > DESCRIPTION_MAX_LEN {
            return Err(DomainError::data(format!(
                "{operation}: value too long for description (max {DESCRIPTION_MAX_LEN})"
            )));
        }
    }
    Ok(())
}
