//! Service-wide error taxonomy.
//!
//! Engine functions fail fast with a typed error and never return partial
//! results. An empty pool is not an error: it produces empty sessions and
//! buckets at the call sites, never a fabricated fallback.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
  /// Referenced document/question does not exist; surfaced, not retried
  #[error("{0} not found")]
  NotFound(&'static str),

  /// Rejected before computation: inverted date range, month outside 1-12,
  /// unparseable date
  #[error("invalid range: {0}")]
  InvalidRange(String),

  /// The optimistic write-back detected a stale read; the caller should
  /// retry the whole record-and-reschedule call once
  #[error("concurrent update conflict")]
  Conflict,

  /// Database mutex poisoned (a thread panicked while holding the lock)
  #[error("database unavailable")]
  Lock,

  #[error("database error: {0}")]
  Db(#[from] rusqlite::Error),
}

impl ServiceError {
  fn status(&self) -> StatusCode {
    match self {
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::InvalidRange(_) => StatusCode::BAD_REQUEST,
      Self::Conflict => StatusCode::CONFLICT,
      Self::Lock | Self::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ServiceError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!("request failed: {}", self);
    }
    (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
  }
}
