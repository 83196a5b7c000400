//! Query layer: persistence operations on `Product`, each a direct
//! translation to one `ProductStore` call.
//!
//! The store is always passed in; nothing here holds a connection.

use catalog_core::{DomainError, DomainResult, ProductId};

use crate::category::Category;
use crate::product::Product;
use crate::store::{ProductFilter, ProductStore};

impl Product {
    /// Insert as a new row and record the id the store assigned.
    pub async fn create<S>(&mut self, store: &S) -> DomainResult<ProductId>
    where
        S: ProductStore + ?Sized,
    {
        let id = store.insert(self).await?;
        self.assign_id(id);
        Ok(id)
    }

    /// Write every mutable field back to the existing row.
    pub async fn update<S>(&self, store: &S) -> DomainResult<()>
    where
        S: ProductStore + ?Sized,
    {
        let id = self
            .id()
            .ok_or_else(|| DomainError::data("update called with empty id field"))?;

        if store.update(self).await? {
            Ok(())
        } else {
            Err(DomainError::data(format!("update: no product with id {id}")))
        }
    }

    /// Remove the row. A row that is already gone is not an error.
    pub async fn delete<S>(&self, store: &S) -> DomainResult<()>
    where
        S: ProductStore + ?Sized,
    {
        let id = self
            .id()
            .ok_or_else(|| DomainError::data("delete called with empty id field"))?;
        store.delete(id).await
    }

    pub async fn all<S>(store: &S) -> DomainResult<Vec<Product>>
    where
        S: ProductStore + ?Sized,
    {
        store.list(ProductFilter::All).await
    }

    pub async fn find<S>(store: &S, id: ProductId) -> DomainResult<Option<Product>>
    where
        S: ProductStore + ?Sized,
    {
        store.get(id).await
    }

    /// Exact, case-sensitive name match.
    pub async fn find_by_name<S>(store: &S, name: &str) -> DomainResult<Vec<Product>>
    where
        S: ProductStore + ?Sized,
    {
        store.list(ProductFilter::Name(name.to_string())).await
    }

    pub async fn find_by_category<S>(store: &S, category: Category) -> DomainResult<Vec<Product>>
    where
        S: ProductStore + ?Sized,
    {
        store.list(ProductFilter::Category(category)).await
    }

    pub async fn find_by_availability<S>(store: &S, available: bool) -> DomainResult<Vec<Product>>
    where
        S: ProductStore + ?Sized,
    {
        store.list(ProductFilter::Availability(available)).await
    }
}
