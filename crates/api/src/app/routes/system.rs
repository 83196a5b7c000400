use axum::{http::StatusCode, response::IntoResponse, Json};

pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, "Product Catalog Administration")
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "message": "OK" })))
}
