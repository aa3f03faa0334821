//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use parish_core::eligibility::EligibilityError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// A failed prerequisite check — the documented business outcome of the
  /// gated write path, not a system fault. Carries the engine's reason
  /// verbatim.
  #[error("{0}")]
  Ineligible(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map an engine failure onto HTTP semantics. A store failure is a 500 —
  /// the write path fails closed, it never treats "could not check" as
  /// eligible.
  pub fn from_eligibility<E>(err: EligibilityError<E>) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    match err {
      EligibilityError::InvalidPerson(id) => {
        ApiError::BadRequest(format!("invalid person id: {id}"))
      }
      EligibilityError::StoreUnavailable(e) => ApiError::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Ineligible(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
