//! Learner progress summary.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::config::WEAKEST_DOCUMENTS_LIMIT;
use crate::db::{self, DbPool, LogOnError, WeakDocument};
use crate::engine::calendar;
use crate::error::ServiceError;

use super::host_offset;

#[derive(Debug, Serialize)]
pub struct ProgressSummary {
  pub total_documents: i64,
  pub total_questions: i64,
  pub total_attempts: i64,
  pub sessions_completed: i64,
  pub average_session_score: f64,
  pub best_session_score: f64,
  pub average_mastery: f64,
  pub due_today: usize,
  pub weakest_documents: Vec<WeakDocument>,
}

/// GET /progress
pub async fn progress(
  State(pool): State<DbPool>,
) -> Result<Json<ProgressSummary>, ServiceError> {
  let conn = db::try_lock(&pool)?;

  let (total_documents, total_questions, total_attempts) =
    db::get_total_counts(&conn).log_warn_default("Failed to get total counts");
  let (sessions_completed, average_session_score, best_session_score) =
    db::get_session_stats(&conn).log_warn_default("Failed to get session stats");
  let average_mastery =
    db::get_average_document_mastery(&conn).log_warn_default("Failed to get average mastery");
  let weakest_documents = db::get_weakest_documents(&conn, WEAKEST_DOCUMENTS_LIMIT)
    .log_warn_default("Failed to get weakest documents");

  let offset = host_offset();
  let today = Utc::now().with_timezone(&offset).date_naive();
  let scheduled = db::list_scheduled_documents(&conn)?;
  let due_today = calendar::due_on(&scheduled, today, offset).len();

  Ok(Json(ProgressSummary {
    total_documents,
    total_questions,
    total_attempts,
    sessions_completed,
    average_session_score,
    best_session_score,
    average_mastery,
    due_today,
    weakest_documents,
  }))
}
