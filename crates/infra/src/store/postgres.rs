//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! Every `sqlx::Error` becomes `DomainError::Data` carrying the operation name.
//! Constraint violations (`23xxx`, `22001` value too long) keep the database
//! message so callers can see which column failed. Nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row};
use tracing::instrument;

use catalog_core::{DomainError, DomainResult, ProductId};
use catalog_products::{Category, Product, ProductFilter, ProductStore};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id          BIGSERIAL PRIMARY KEY,
        name        VARCHAR(100) NOT NULL,
        description VARCHAR(250),
        price       NUMERIC NOT NULL,
        available   BOOLEAN NOT NULL DEFAULT TRUE,
        category    VARCHAR(32) NOT NULL DEFAULT 'UNKNOWN'
    )
"#;

const SELECT_BY_ID: &str = r#"
    SELECT id, name, description, price, available, category
    FROM products
    WHERE id = $1
"#;

const SELECT_ALL: &str = r#"
    SELECT id, name, description, price, available, category
    FROM products
    ORDER BY id
"#;

const SELECT_BY_NAME: &str = r#"
    SELECT id, name, description, price, available, category
    FROM products
    WHERE name = $1
    ORDER BY id
"#;

const SELECT_BY_CATEGORY: &str = r#"
    SELECT id, name, description, price, available, category
    FROM products
    WHERE category = $1
    ORDER BY id
"#;

const SELECT_BY_AVAILABILITY: &str = r#"
    SELECT id, name, description, price, available, category
    FROM products
    WHERE available = $1
    ORDER BY id
"#;

/// Product table over a shared SQLx pool.
///
/// The pool is created once at startup and cloned into request handlers;
/// SQLx handles connection checkout.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: Arc<PgPool>,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Build a pool for `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> DomainResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> DomainResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self, product), fields(name = %product.name), err)]
    async fn insert(&self, product: &Product) -> DomainResult<ProductId> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, available, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .bind(product.category.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| map_sqlx_error("insert", e))?;
        Ok(ProductId::new(id))
    }

    #[instrument(skip(self, product), fields(id = ?product.id()), err)]
    async fn update(&self, product: &Product) -> DomainResult<bool> {
        let Some(id) = product.id() else {
            return Ok(false);
        };

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = $4,
                available = $5,
                category = $6
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .bind(product.category.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn get(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn list(&self, filter: ProductFilter) -> DomainResult<Vec<Product>> {
        let query = match &filter {
            ProductFilter::All => sqlx::query::<Postgres>(SELECT_ALL),
            ProductFilter::Name(name) => sqlx::query::<Postgres>(SELECT_BY_NAME).bind(name.as_str()),
            ProductFilter::Category(category) => {
                sqlx::query::<Postgres>(SELECT_BY_CATEGORY).bind(category.as_str())
            }
            ProductFilter::Availability(available) => {
                sqlx::query::<Postgres>(SELECT_BY_AVAILABILITY).bind(*available)
            }
        };

        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(product_from_row).collect()
    }
}

fn product_from_row(row: &PgRow) -> DomainResult<Product> {
    let decode = |e: sqlx::Error| map_sqlx_error("decode", e);

    let id: i64 = row.try_get("id").map_err(decode)?;
    let name: String = row.try_get("name").map_err(decode)?;
    let description: Option<String> = row.try_get("description").map_err(decode)?;
    let price: Decimal = row.try_get("price").map_err(decode)?;
    let available: bool = row.try_get("available").map_err(decode)?;
    let category: String = row.try_get("category").map_err(decode)?;

    let category: Category = category
        .parse()
        .map_err(|_| DomainError::data(format!("decode: unknown category at rest: {category}")))?;

    Ok(Product::rehydrate(
        ProductId::new(id),
        name,
        description,
        price,
        available,
        category,
    ))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            DomainError::data(format!(
                "database error in {operation} [{code}]: {}",
                db_err.message()
            ))
        }
        sqlx::Error::PoolClosed => {
            DomainError::data(format!("connection pool closed in {operation}"))
        }
        other => DomainError::data(format!("sqlx error in {operation}: {other}")),
    }
}
