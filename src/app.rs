//! Router assembly, shared by the binary and the integration tests.

use axum::{routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::db::DbPool;
use crate::handlers;

pub fn router(pool: DbPool) -> Router {
  Router::new()
    .route("/review/today", get(handlers::review_today))
    .route("/review/date/{date}", get(handlers::review_by_date))
    .route("/review/range", get(handlers::review_range))
    .route("/review/calendar/{year}/{month}", get(handlers::review_calendar))
    .route("/documents", get(handlers::list_documents))
    .route("/documents/{id}/questions", get(handlers::document_questions))
    .route("/sessions/active-recall", post(handlers::active_recall_session))
    .route("/sessions/quiz", post(handlers::quiz_session))
    .route("/sessions/retake", post(handlers::retake_session))
    .route("/sessions/submit", post(handlers::submit_session))
    .route("/attempts", post(handlers::record_attempt))
    .route("/progress", get(handlers::progress))
    .layer(TraceLayer::new_for_http())
    .with_state(pool)
}
