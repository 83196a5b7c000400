use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use catalog_core::DomainError;

/// Every failure a handler can surface, mapped to one status code each.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not sent as `application/json`.
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Body was JSON-typed but could not be read as JSON.
    #[error("{0}")]
    MalformedBody(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UnsupportedMediaType(msg) => {
                json_error(StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media_type", msg)
            }
            ApiError::MalformedBody(msg) => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            ApiError::Domain(err) => domain_error_to_response(err),
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        DomainError::Data(msg) => {
            tracing::error!("data error: {msg}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "data_error", msg)
        }
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_error_to_its_status() {
        let cases = [
            (ApiError::UnsupportedMediaType("x".into()), StatusCode::UNSUPPORTED_MEDIA_TYPE),
            (ApiError::MalformedBody("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::validation("x").into(), StatusCode::BAD_REQUEST),
            (DomainError::not_found("x").into(), StatusCode::NOT_FOUND),
            (DomainError::data("x").into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
