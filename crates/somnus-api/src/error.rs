//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Rendered as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request body could not be read as JSON at all.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The body is JSON but not a valid sample.
  #[error("unprocessable: {0}")]
  Unprocessable(String),

  #[error("internal error: {0}")]
  Internal(#[source] somnus_core::Error),
}

impl From<somnus_core::Error> for ApiError {
  fn from(e: somnus_core::Error) -> Self {
    match e {
      somnus_core::Error::Validation(msg) => ApiError::Unprocessable(msg),
      other => ApiError::Internal(other),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, detail) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Internal(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "detail": detail }))).into_response()
  }
}
