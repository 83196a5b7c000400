use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::{DomainError, DomainResult, ProductId};
use catalog_products::{Product, ProductFilter, ProductStore};

use super::check_column_limits;

/// In-memory product table for tests/dev.
///
/// Ids start at 1 and are never reused, matching a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Table>,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<ProductId, Product>,
    last_id: i64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(operation: &str) -> DomainError {
    DomainError::data(format!("{operation}: product table lock poisoned"))
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> DomainResult<ProductId> {
        check_column_limits("insert", product)?;

        let mut table = self.inner.write().map_err(|_| poisoned("insert"))?;
        table.last_id += 1;
        let id = ProductId::new(table.last_id);

        let row = Product::rehydrate(
            id,
            product.name.clone(),
            product.description.clone(),
            product.price,
            product.available,
            product.category,
        );
        table.rows.insert(id, row);
        Ok(id)
    }

    async fn update(&self, product: &Product) -> DomainResult<bool> {
        let Some(id) = product.id() else {
            return Ok(false);
        };
        check_column_limits("update", product)?;

        let mut table = self.inner.write().map_err(|_| poisoned("update"))?;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        let mut table = self.inner.write().map_err(|_| poisoned("delete"))?;
        table.rows.remove(&id);
        Ok(())
    }

    async fn get(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let table = self.inner.read().map_err(|_| poisoned("get"))?;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> DomainResult<Vec<Product>> {
        let table = self.inner.read().map_err(|_| poisoned("list"))?;
        Ok(table
            .rows
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use catalog_products::Category;
    use rust_decimal::Decimal;

    use crate::store::NAME_MAX_LEN;

    fn product(name: &str, available: bool, category: Category) -> Product {
        Product::new(
            name,
            Some(format!("{name} description")),
            Decimal::new(1999, 2),
            available,
            category,
        )
    }

    fn sample_batch() -> Vec<Product> {
        vec![
            product("Hammer", true, Category::Tools),
            product("Shirt", false, Category::Cloths),
            product("Hammer", false, Category::Tools),
            product("Bread", true, Category::Food),
            product("Tire", true, Category::Automotive),
            product("Pan", false, Category::Housewares),
        ]
    }

    async fn seeded(store: &InMemoryProductStore) -> Vec<Product> {
        let mut created = Vec::new();
        for mut p in sample_batch() {
            p.create(store).await.unwrap();
            created.push(p);
        }
        created
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = InMemoryProductStore::new();
        let mut a = product("A", true, Category::Food);
        let mut b = product("B", true, Category::Food);

        a.create(&store).await.unwrap();
        b.create(&store).await.unwrap();

        assert_eq!(a.id(), Some(ProductId::new(1)));
        assert_eq!(b.id(), Some(ProductId::new(2)));
    }

    #[tokio::test]
    async fn find_after_create_returns_equal_product() {
        let store = InMemoryProductStore::new();
        let mut p = product("Hammer", true, Category::Tools);
        p.create(&store).await.unwrap();

        let found = Product::find(&store, p.id().unwrap()).await.unwrap().unwrap();
        assert_eq!(found, p);
    }

    #[tokio::test]
    async fn find_missing_id_is_none() {
        let store = InMemoryProductStore::new();
        let found = Product::find(&store, ProductId::new(999_999)).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let store = InMemoryProductStore::new();
        let mut p = product("Hammer", true, Category::Tools);
        p.create(&store).await.unwrap();
        let id = p.id();

        p.description = Some("Updated Description".to_string());
        p.update(&store).await.unwrap();

        let found = Product::find(&store, id.unwrap()).await.unwrap().unwrap();
        assert_eq!(found.id(), id);
        assert_eq!(found.description.as_deref(), Some("Updated Description"));
        assert_eq!(found.name, "Hammer");
        assert_eq!(Product::all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_without_id_is_data_error() {
        let store = InMemoryProductStore::new();
        let p = product("Hammer", true, Category::Tools);

        let err = p.update(&store).await.unwrap_err();
        assert!(matches!(err, DomainError::Data(msg) if msg.contains("empty id")));
    }

    #[tokio::test]
    async fn update_of_deleted_row_is_data_error() {
        let store = InMemoryProductStore::new();
        let mut p = product("Hammer", true, Category::Tools);
        p.create(&store).await.unwrap();
        p.delete(&store).await.unwrap();

        let err = p.update(&store).await.unwrap_err();
        assert!(matches!(err, DomainError::Data(_)));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_row() {
        let store = InMemoryProductStore::new();
        let created = seeded(&store).await;
        let before = Product::all(&store).await.unwrap().len();

        created[0].delete(&store).await.unwrap();

        assert_eq!(Product::all(&store).await.unwrap().len(), before - 1);
        assert!(Product::find(&store, created[0].id().unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_of_absent_row_is_a_no_op() {
        let store = InMemoryProductStore::new();
        let mut p = product("Hammer", true, Category::Tools);
        p.create(&store).await.unwrap();

        p.delete(&store).await.unwrap();
        p.delete(&store).await.unwrap();
        assert!(Product::all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_without_id_is_data_error() {
        let store = InMemoryProductStore::new();
        let p = product("Hammer", true, Category::Tools);
        assert!(matches!(p.delete(&store).await, Err(DomainError::Data(_))));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = InMemoryProductStore::new();
        let mut a = product("A", true, Category::Food);
        a.create(&store).await.unwrap();
        a.delete(&store).await.unwrap();

        let mut b = product("B", true, Category::Food);
        b.create(&store).await.unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn all_lists_every_row() {
        let store = InMemoryProductStore::new();
        assert!(Product::all(&store).await.unwrap().is_empty());

        let created = seeded(&store).await;
        assert_eq!(Product::all(&store).await.unwrap(), created);
    }

    #[tokio::test]
    async fn find_by_name_returns_exact_subset() {
        let store = InMemoryProductStore::new();
        let created = seeded(&store).await;

        let found = Product::find_by_name(&store, "Hammer").await.unwrap();
        let expected: Vec<_> = created.iter().filter(|p| p.name == "Hammer").cloned().collect();
        assert_eq!(found, expected);
        assert_eq!(found.len(), 2);

        assert!(Product::find_by_name(&store, "hammer").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_category_returns_exact_subset() {
        let store = InMemoryProductStore::new();
        let created = seeded(&store).await;

        for category in Category::ALL {
            let found = Product::find_by_category(&store, category).await.unwrap();
            let expected: Vec<_> =
                created.iter().filter(|p| p.category == category).cloned().collect();
            assert_eq!(found, expected, "{category}");
        }
    }

    #[tokio::test]
    async fn find_by_availability_returns_exact_subset() {
        let store = InMemoryProductStore::new();
        let created = seeded(&store).await;

        for available in [true, false] {
            let found = Product::find_by_availability(&store, available).await.unwrap();
            let expected: Vec<_> =
                created.iter().filter(|p| p.available == available).cloned().collect();
            assert_eq!(found, expected);
        }
    }

    #[tokio::test]
    async fn overlong_name_is_rejected_like_the_table() {
        let store = InMemoryProductStore::new();
        let mut p = product(&"x".repeat(NAME_MAX_LEN + 1), true, Category::Tools);

        let err = p.create(&store).await.unwrap_err();
        assert!(matches!(err, DomainError::Data(msg) if msg.contains("name")));
        assert_eq!(p.id(), None);
        assert!(Product::all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn query_layer_works_through_shared_trait_object() {
        let store: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::new());
        let handle = Arc::clone(&store);

        let mut p = product("Hammer", true, Category::Tools);
        p.create(&store).await.unwrap();

        let found = Product::find(&handle, p.id().unwrap()).await.unwrap();
        assert_eq!(found, Some(p.clone()));

        p.delete(&handle).await.unwrap();
        assert!(Product::all(&store).await.unwrap().is_empty());
    }
}
