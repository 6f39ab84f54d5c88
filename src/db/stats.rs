//! Aggregate statistics for the progress summary

use rusqlite::{params, Connection, Result};
use serde::Serialize;

/// A document the learner is struggling with
#[derive(Debug, Clone, Serialize)]
pub struct WeakDocument {
    pub id: i64,
    pub title: String,
    pub mastery_score: f64,
}

/// Total documents, questions and attempts recorded
pub fn get_total_counts(conn: &Connection) -> Result<(i64, i64, i64)> {
    let documents: i64 = conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
    let questions: i64 = conn.query_row("SELECT COUNT(*) FROM questions", [], |row| row.get(0))?;
    let attempts: i64 = conn.query_row("SELECT COUNT(*) FROM attempts", [], |row| row.get(0))?;
    Ok((documents, questions, attempts))
}

/// Mean mastery across all documents, 0 when there are none
pub fn get_average_document_mastery(conn: &Connection) -> Result<f64> {
    let avg: Option<f64> =
        conn.query_row("SELECT AVG(mastery_score) FROM documents", [], |row| {
            row.get(0)
        })?;
    Ok(avg.unwrap_or(0.0))
}

/// Completed session count, average score and best score
pub fn get_session_stats(conn: &Connection) -> Result<(i64, f64, f64)> {
    let (count, avg, best): (i64, Option<f64>, Option<f64>) = conn.query_row(
        r#"
    SELECT COUNT(*), AVG(score), MAX(score)
    FROM review_sessions
    WHERE completed_at IS NOT NULL
    "#,
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    Ok((count, avg.unwrap_or(0.0), best.unwrap_or(0.0)))
}

/// Documents with the lowest mastery, weakest first
pub fn get_weakest_documents(conn: &Connection, limit: usize) -> Result<Vec<WeakDocument>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, title, mastery_score
    FROM documents
    ORDER BY mastery_score ASC, id ASC
    LIMIT ?1
    "#,
    )?;

    let weakest = stmt
        .query_map(params![limit as i64], |row| {
            Ok(WeakDocument {
                id: row.get(0)?,
                title: row.get(1)?,
                mastery_score: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(weakest)
}
