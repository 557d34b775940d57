//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use intake_core::error::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<intake_core::Error> for ApiError {
  fn from(err: intake_core::Error) -> Self {
    use intake_core::Error as E;
    match err {
      E::Validation(e) => Self::BadRequest(e.to_string()),
      E::InvalidContact(e) => Self::BadRequest(e.to_string()),
      e @ E::NotFound(_) => Self::NotFound(e.to_string()),
      e @ E::Conflict { .. } => Self::Conflict(e.to_string()),
      E::StoreUnavailable(e) => Self::Store(e),
    }
  }
}

impl From<ValidationError> for ApiError {
  fn from(err: ValidationError) -> Self { intake_core::Error::from(err).into() }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
