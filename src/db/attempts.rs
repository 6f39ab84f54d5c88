//! Attempt recording and review-session bookkeeping

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::Attempt;

use super::parse_timestamp;

pub fn insert_attempt(conn: &Connection, attempt: &Attempt) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO attempts (question_id, session_id, selected_option_index, is_correct, answered_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
        params![
            attempt.question_id,
            attempt.session_id,
            attempt.selected_option_index,
            if attempt.is_correct { 1 } else { 0 },
            attempt.answered_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Full attempt history for one question, oldest first
pub fn list_attempts_for_question(conn: &Connection, question_id: i64) -> Result<Vec<Attempt>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, question_id, session_id, selected_option_index, is_correct, answered_at
    FROM attempts
    WHERE question_id = ?1
    ORDER BY answered_at ASC, id ASC
    "#,
    )?;

    let attempts = stmt
        .query_map(params![question_id], |row| row_to_attempt(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(attempts)
}

/// All attempts across a document's questions, oldest first
pub fn list_attempts_for_document(conn: &Connection, document_id: i64) -> Result<Vec<Attempt>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT a.id, a.question_id, a.session_id, a.selected_option_index, a.is_correct, a.answered_at
    FROM attempts a
    JOIN questions q ON a.question_id = q.id
    WHERE q.document_id = ?1
    ORDER BY a.answered_at ASC, a.id ASC
    "#,
    )?;

    let attempts = stmt
        .query_map(params![document_id], |row| row_to_attempt(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(attempts)
}

pub fn create_review_session(
    conn: &Connection,
    document_id: i64,
    started_at: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO review_sessions (document_id, started_at) VALUES (?1, ?2)",
        params![document_id, started_at.to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn complete_review_session(
    conn: &Connection,
    session_id: i64,
    score: f64,
    correct_answers: i64,
    total_questions: i64,
    completed_at: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        r#"
    UPDATE review_sessions
    SET completed_at = ?1, score = ?2, correct_answers = ?3, total_questions = ?4
    WHERE id = ?5
    "#,
        params![
            completed_at.to_rfc3339(),
            score,
            correct_answers,
            total_questions,
            session_id,
        ],
    )?;
    Ok(())
}

/// Convert a database row to an Attempt struct
pub(crate) fn row_to_attempt(row: &rusqlite::Row) -> Result<Attempt> {
    let is_correct: i64 = row.get(4)?;
    let answered_at: String = row.get(5)?;

    Ok(Attempt {
        id: row.get(0)?,
        question_id: row.get(1)?,
        session_id: row.get(2)?,
        selected_option_index: row.get(3)?,
        is_correct: is_correct != 0,
        answered_at: parse_timestamp(&answered_at),
    })
}
