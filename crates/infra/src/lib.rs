//! Infrastructure layer: data store adapters for the product catalog.

pub mod store;

pub use store::{InMemoryProductStore, PostgresProductStore};
