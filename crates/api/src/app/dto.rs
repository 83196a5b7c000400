use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use catalog_core::{DomainError, DomainResult, ProductId};
use catalog_products::{Category, ProductFilter};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// `GET /products` query string. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub available: Option<String>,
}

impl ListProductsQuery {
    /// Pick a single criterion: name, then category, then available, else all.
    pub fn filter(&self) -> DomainResult<ProductFilter> {
        if let Some(name) = non_empty(&self.name) {
            return Ok(ProductFilter::Name(name.to_string()));
        }
        if let Some(category) = non_empty(&self.category) {
            return Ok(ProductFilter::Category(category.parse::<Category>()?));
        }
        if let Some(available) = non_empty(&self.available) {
            // Anything other than "true" means false; malformed input is not rejected.
            return Ok(ProductFilter::Availability(available.eq_ignore_ascii_case("true")));
        }
        Ok(ProductFilter::All)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// -------------------------
// Extraction helpers
// -------------------------

/// Unwrap a JSON body, keeping "not JSON at all" (415) apart from
/// "JSON that failed to parse" (400).
pub fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(e)) => {
            Err(ApiError::UnsupportedMediaType(e.body_text()))
        }
        Err(e) => Err(ApiError::MalformedBody(e.body_text())),
    }
}

/// Unwrap the list query string; a string axum cannot decode (such as a
/// repeated key) is a 400 with the usual JSON error body.
pub fn query_params(
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<ListProductsQuery, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| ApiError::MalformedBody(e.body_text()))
}

/// Path ids that are not integers resolve to no product.
pub fn parse_product_id(raw: &str) -> DomainResult<ProductId> {
    raw.parse().map_err(|_| product_not_found(raw))
}

pub fn product_not_found(id: impl core::fmt::Display) -> DomainError {
    DomainError::not_found(format!("Product with id '{id}' was not found."))
}
