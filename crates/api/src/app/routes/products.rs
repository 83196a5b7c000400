use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use catalog_products::{Product, ProductFilter, ProductStore};

use crate::app::dto::{self, ListProductsQuery};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let data = dto::json_body(body)?;

    let mut product = Product::from_json(&data)?;
    let id = product.create(&services.store()).await?;
    tracing::info!(%id, name = %product.name, "product created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/products/{id}"))],
        Json(product.to_json()),
    )
        .into_response())
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query: ListProductsQuery = dto::query_params(query)?;
    let store = services.store();

    let products = match query.filter()? {
        ProductFilter::Name(name) => Product::find_by_name(&store, &name).await?,
        ProductFilter::Category(category) => Product::find_by_category(&store, category).await?,
        ProductFilter::Availability(available) => {
            Product::find_by_availability(&store, available).await?
        }
        ProductFilter::All => Product::all(&store).await?,
    };

    let items = products.iter().map(Product::to_json).collect::<Vec<_>>();
    Ok((StatusCode::OK, Json(Value::Array(items))).into_response())
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let product = find_or_404(&services.store(), &id).await?;
    Ok((StatusCode::OK, Json(product.to_json())).into_response())
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let store = services.store();
    let mut product = find_or_404(&store, &id).await?;
    let data = dto::json_body(body)?;

    product.apply_json(&data)?;
    product.update(&store).await?;
    tracing::info!(id = %id, "product updated");

    Ok((StatusCode::OK, Json(product.to_json())).into_response())
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let store = services.store();
    let product = find_or_404(&store, &id).await?;
    product.delete(&store).await?;
    tracing::info!(id = %id, "product deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn find_or_404<S>(store: &S, raw_id: &str) -> Result<Product, ApiError>
where
    S: ProductStore + ?Sized,
{
    let id = dto::parse_product_id(raw_id)?;
    let product = Product::find(store, id).await?;
    Ok(product.ok_or_else(|| dto::product_not_found(id))?)
}
