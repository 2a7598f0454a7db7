//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use planner_core::{ErrorKind, StoreError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Rendered as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("storage unavailable: {0}")]
  Unavailable(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error. Duplicate keys only arise from subject codes
  /// and not-found only from the attendance action, hence the fixed messages.
  pub fn from_store<E: StoreError>(err: E) -> Self {
    match err.kind() {
      ErrorKind::DuplicateKey => ApiError::BadRequest("Subject code already exists".into()),
      ErrorKind::NotFound => ApiError::NotFound("Subject not found".into()),
      ErrorKind::Timeout => ApiError::Unavailable(err.to_string()),
      ErrorKind::Storage => ApiError::Store(Box::new(err)),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unavailable(m) => (StatusCode::SERVICE_UNAVAILABLE, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    if status.is_server_error() {
      tracing::error!(%status, "{self}");
    } else {
      tracing::warn!(%status, "{self}");
    }
    (status, Json(json!({ "error": message }))).into_response()
  }
}
