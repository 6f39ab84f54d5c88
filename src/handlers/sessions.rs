//! Session construction handlers.
//!
//! Active-recall selection happens at two levels: picking which quizzes to
//! review (bounded, performance-weighted) and ordering the questions inside
//! one quiz (unbounded, history-prioritized). Retakes are seeded directly by
//! the caller's previous answers instead of a storage round-trip.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_SESSION_ITEMS;
use crate::db::{self, DbPool};
use crate::domain::{Attempt, Document, PriorityReason, RetakeAnswer, Session};
use crate::engine::{self, Candidate};
use crate::error::ServiceError;

// ============================================================================
// Document-level active recall
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ActiveRecallRequest {
    /// Queue size; defaults to 5
    pub max_items: Option<usize>,
}

/// One document in the active-recall queue with the priority that placed it
#[derive(Debug, Serialize)]
pub struct QueueItem {
    pub document: Document,
    pub priority_score: f64,
    pub priority_reason: PriorityReason,
    pub days_since_seen: i64,
}

#[derive(Debug, Serialize)]
pub struct ActiveRecallQueue {
    pub created_at: DateTime<Utc>,
    pub items: Vec<QueueItem>,
}

/// Most recent attempt across a document's questions, by timestamp then
/// insertion order
fn latest_document_attempt(attempts: &[Attempt]) -> Option<&Attempt> {
    attempts.iter().max_by_key(|a| (a.answered_at, a.id))
}

/// POST /sessions/active-recall
pub async fn active_recall_session(
    State(pool): State<DbPool>,
    Json(request): Json<ActiveRecallRequest>,
) -> Result<Json<ActiveRecallQueue>, ServiceError> {
    let conn = db::try_lock(&pool)?;
    let now = Utc::now();
    let max_items = request.max_items.unwrap_or(DEFAULT_SESSION_ITEMS);

    let documents = db::list_documents(&conn)?;
    let mut by_id: HashMap<i64, Document> = HashMap::with_capacity(documents.len());
    let mut candidates = Vec::with_capacity(documents.len());

    for doc in documents {
        let attempts = db::list_attempts_for_document(&conn, doc.id)?;
        let last_incorrect = latest_document_attempt(&attempts)
            .map(|a| !a.is_correct)
            .unwrap_or(false);

        candidates.push(Candidate {
            id: doc.id,
            mastery_score: doc.mastery_score,
            last_incorrect,
            last_reviewed_at: doc.last_reviewed_at,
        });
        by_id.insert(doc.id, doc);
    }

    let selected = engine::select_top(engine::rank(candidates, now), max_items);
    tracing::debug!("active recall queue: {} of {} candidates", selected.len(), by_id.len());

    let items = selected
        .into_iter()
        .filter_map(|ranked| {
            let document = by_id.remove(&ranked.id)?;
            Some(QueueItem {
                document,
                priority_score: ranked.priority_score,
                priority_reason: ranked.priority_reason,
                days_since_seen: ranked.days_since_seen,
            })
        })
        .collect();

    Ok(Json(ActiveRecallQueue {
        created_at: now,
        items,
    }))
}

// ============================================================================
// Question-level session for one quiz
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuizSessionRequest {
    pub document_id: i64,
}

/// POST /sessions/quiz
pub async fn quiz_session(
    State(pool): State<DbPool>,
    Json(request): Json<QuizSessionRequest>,
) -> Result<Json<Session>, ServiceError> {
    let conn = db::try_lock(&pool)?;

    if db::get_document_by_id(&conn, request.document_id)?.is_none() {
        return Err(ServiceError::NotFound("document"));
    }

    let questions = db::list_questions_for_document(&conn, request.document_id)?;
    let mut attempts_by_question = HashMap::with_capacity(questions.len());
    for question in &questions {
        let attempts = db::list_attempts_for_question(&conn, question.id)?;
        attempts_by_question.insert(question.id, attempts);
    }

    let session = engine::build_question_session(questions, &attempts_by_question, Utc::now());
    Ok(Json(session))
}

// ============================================================================
// Retake
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RetakeRequest {
    pub document_id: i64,
    pub previous_answers: Vec<RetakeAnswer>,
}

/// POST /sessions/retake
pub async fn retake_session(
    State(pool): State<DbPool>,
    Json(request): Json<RetakeRequest>,
) -> Result<Json<Session>, ServiceError> {
    let conn = db::try_lock(&pool)?;

    if db::get_document_by_id(&conn, request.document_id)?.is_none() {
        return Err(ServiceError::NotFound("document"));
    }

    let questions = db::list_questions_for_document(&conn, request.document_id)?;
    let session = engine::build_retake_session(
        request.document_id,
        questions,
        &request.previous_answers,
        Utc::now(),
    );
    Ok(Json(session))
}

// ============================================================================
// Batch submission
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitAnswer {
    pub question_id: i64,
    pub selected_option_index: i64,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub document_id: i64,
    pub answers: Vec<SubmitAnswer>,
}

#[derive(Debug, Serialize)]
pub struct AnswerResult {
    pub question_id: i64,
    pub selected_option_index: i64,
    pub correct_option_index: i64,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub session_id: i64,
    pub score: f64,
    pub correct_count: usize,
    pub questions_answered: usize,
    pub answers: Vec<AnswerResult>,
    /// The document with its updated mastery and schedule
    pub document: Document,
}

/// POST /sessions/submit
///
/// Grades a completed review pass, records it as attempts plus one session
/// row, then recomputes mastery and reschedules the document.
pub async fn submit_session(
    State(pool): State<DbPool>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ServiceError> {
    let conn = db::try_lock(&pool)?;
    let now = Utc::now();

    let document = db::get_document_by_id(&conn, request.document_id)?
        .ok_or(ServiceError::NotFound("document"))?;

    let session_id = db::create_review_session(&conn, document.id, now)?;

    let mut results = Vec::with_capacity(request.answers.len());
    let mut correct_count = 0usize;

    for answer in &request.answers {
        let question = db::get_question_by_id(&conn, answer.question_id)?
            .filter(|q| q.document_id == document.id)
            .ok_or(ServiceError::NotFound("question"))?;

        let is_correct = question.is_correct_choice(answer.selected_option_index);
        if is_correct {
            correct_count += 1;
        }

        let mut attempt = Attempt::new(question.id, answer.selected_option_index, is_correct);
        attempt.session_id = Some(session_id);
        attempt.answered_at = now;
        db::insert_attempt(&conn, &attempt)?;

        let history = db::list_attempts_for_question(&conn, question.id)?;
        let estimate = engine::estimate_mastery(&history);
        db::update_question_mastery(&conn, question.id, estimate.score)?;

        results.push(AnswerResult {
            question_id: question.id,
            selected_option_index: answer.selected_option_index,
            correct_option_index: question.correct_option_index,
            is_correct,
        });
    }

    let answered = request.answers.len();
    let score = if answered > 0 {
        correct_count as f64 / answered as f64 * 100.0
    } else {
        0.0
    };
    db::complete_review_session(&conn, session_id, score, correct_count as i64, answered as i64, now)?;

    // Document mastery follows its questions; a document with no questions
    // keeps its stored score
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
        return Err(ServiceError::Conflict);
    }

    let document = db::get_document_by_id(&conn, document.id)?
        .ok_or(ServiceError::NotFound("document"))?;

    tracing::info!(
        "session {} for document {} scored {:.0}%, next review {}",
        session_id,
        document.id,
        score,
        schedule.next_review
    );

    Ok(Json(SubmitResponse {
        session_id,
        score,
        correct_count,
        questions_answered: answered,
        answers: results,
        document,
    }))
}
