//! Products domain module.
//!
//! The `Product` entity, its closed `Category` enumeration, JSON conversions,
//! and the query layer. Storage is reached only through the injected
//! `ProductStore` port; adapters live in `catalog-infra`.

pub mod category;
pub mod product;
pub mod query;
pub mod store;

pub use category::Category;
pub use product::Product;
pub use store::{ProductFilter, ProductStore};
