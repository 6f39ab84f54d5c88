//! Single-attempt recording: the engine's one mutation point.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::db::{self, DbPool};
use crate::domain::{Attempt, Document};
use crate::engine;
use crate::error::ServiceError;

#[derive(Debug, Deserialize)]
pub struct RecordAttemptRequest {
    pub question_id: i64,
    pub selected_option_index: i64,
    /// Defaults to now; clients syncing delayed answers may backdate
    pub answered_at: Option<DateTime<Utc>>,
}

/// POST /attempts
///
/// Records one answer, re-estimates mastery from the full history, and
/// atomically reschedules the owning document. Correctness is judged against
/// the stored question, never taken from the client.
pub async fn record_attempt(
    State(pool): State<DbPool>,
    Json(request): Json<RecordAttemptRequest>,
) -> Result<Json<Document>, ServiceError> {
    let conn = db::try_lock(&pool)?;
    let now = Utc::now();

    let question = db::get_question_by_id(&conn, request.question_id)?
        .ok_or(ServiceError::NotFound("question"))?;
    let document = db::get_document_by_id(&conn, question.document_id)?
        .ok_or(ServiceError::NotFound("document"))?;

    let mut attempt = Attempt::new(
        question.id,
        request.selected_option_index,
        question.is_correct_choice(request.selected_option_index),
    );
    attempt.answered_at = request.answered_at.unwrap_or(now);
    db::insert_attempt(&conn, &attempt)?;

    let history = db::list_attempts_for_question(&conn, question.id)?;
    let estimate = engine::estimate_mastery(&history);
    db::update_question_mastery(&conn, question.id, estimate.score)?;

    let document_mastery = db::average_question_mastery(&conn, document.id)?
        .unwrap_or(document.mastery_score);

    let schedule = engine::reschedule(document_mastery, document.review_interval_days, now);
    let applied = db::update_schedule(
        &conn,
        document.id,
        document_mastery,
        schedule.interval_days,
        now,
        schedule.next_review,
        document.revision,
    )?;
    if !applied {
        // A concurrent submission rescheduled first; the caller retries once
        return Err(ServiceError::Conflict);
    }

    tracing::debug!(
        "attempt on question {}: {} (mastery {:.2}, interval {}d)",
        question.id,
        if attempt.is_correct { "correct" } else { "incorrect" },
        estimate.score,
        schedule.interval_days
    );

    let document = db::get_document_by_id(&conn, document.id)?
        .ok_or(ServiceError::NotFound("document"))?;
    Ok(Json(document))
}
