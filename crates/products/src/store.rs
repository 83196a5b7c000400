use std::sync::Arc;

use async_trait::async_trait;

use catalog_core::{DomainResult, ProductId};

use crate::category::Category;
use crate::product::Product;

/// Single-criterion row selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    Name(String),
    Category(Category),
    Availability(bool),
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Name(name) => product.name == *name,
            ProductFilter::Category(category) => product.category == *category,
            ProductFilter::Availability(available) => product.available == *available,
        }
    }
}

/// Persistence port for product rows.
///
/// Implementations own row lifetime and id assignment. Each call maps to one
/// statement; there are no multi-step transactions.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new row and return the id the store assigned.
    ///
    /// Any `id` already present on `product` is ignored.
    async fn insert(&self, product: &Product) -> DomainResult<ProductId>;

    /// Replace the mutable fields of the row with `product.id()`.
    ///
    /// Returns `false` when no row matched.
    async fn update(&self, product: &Product) -> DomainResult<bool>;

    /// Remove a row; absent rows are not an error.
    async fn delete(&self, id: ProductId) -> DomainResult<()>;

    async fn get(&self, id: ProductId) -> DomainResult<Option<Product>>;

    /// Rows matching `filter`, ordered by id.
    async fn list(&self, filter: ProductFilter) -> DomainResult<Vec<Product>>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn insert(&self, product: &Product) -> DomainResult<ProductId> {
        (**self).insert(product).await
    }

    async fn update(&self, product: &Product) -> DomainResult<bool> {
        (**self).update(product).await
    }

    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        (**self).delete(id).await
    }

    async fn get(&self, id: ProductId) -> DomainResult<Option<Product>> {
        (**self).get(id).await
    }

    async fn list(&self, filter: ProductFilter) -> DomainResult<Vec<Product>> {
        (**self).list(filter).await
    }
}
