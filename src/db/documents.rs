//! Document CRUD and schedule state operations

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::Document;

use super::{parse_timestamp, parse_timestamp_opt};

pub fn insert_document(conn: &Connection, doc: &Document) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO documents (title, mastery_score, review_interval_days, last_reviewed_at,
                           next_review_date, revision, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
        params![
            doc.title,
            doc.mastery_score,
            doc.review_interval_days,
            doc.last_reviewed_at.map(|dt| dt.to_rfc3339()),
            doc.next_review_date.map(|dt| dt.to_rfc3339()),
            doc.revision,
            doc.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_document_by_id(conn: &Connection, id: i64) -> Result<Option<Document>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, title, mastery_score, review_interval_days, last_reviewed_at,
           next_review_date, revision, created_at
    FROM documents WHERE id = ?1
    "#,
    )?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_document(row)?))
    } else {
        Ok(None)
    }
}

pub fn list_documents(conn: &Connection) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, title, mastery_score, review_interval_days, last_reviewed_at,
           next_review_date, revision, created_at
    FROM documents
    ORDER BY created_at ASC, id ASC
    "#,
    )?;

    let docs = stmt
        .query_map([], |row| row_to_document(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(docs)
}

/// Documents that have entered the review calendar (scheduled at least once)
pub fn list_scheduled_documents(conn: &Connection) -> Result<Vec<Document>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, title, mastery_score, review_interval_days, last_reviewed_at,
           next_review_date, revision, created_at
    FROM documents
    WHERE next_review_date IS NOT NULL
    ORDER BY next_review_date ASC
    "#,
    )?;

    let docs = stmt
        .query_map([], |row| row_to_document(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(docs)
}

/// Write back the schedule state after a scored review.
///
/// Optimistic concurrency: the update only applies if the stored revision
/// still matches the one the caller read. Returns false when another writer
/// got there first, so the caller can surface a conflict instead of silently
/// losing an update.
pub fn update_schedule(
    conn: &Connection,
    document_id: i64,
    mastery_score: f64,
    interval_days: i64,
    last_reviewed_at: DateTime<Utc>,
    next_review_date: DateTime<Utc>,
    expected_revision: i64,
) -> Result<bool> {
    let updated = conn.execute(
        r#"
    UPDATE documents
    SET mastery_score = ?1, review_interval_days = ?2, last_reviewed_at = ?3,
        next_review_date = ?4, revision = revision + 1
    WHERE id = ?5 AND revision = ?6
    "#,
        params![
            mastery_score,
            interval_days,
            last_reviewed_at.to_rfc3339(),
            next_review_date.to_rfc3339(),
            document_id,
            expected_revision,
        ],
    )?;
    Ok(updated == 1)
}

/// Convert a database row to a Document struct
pub(crate) fn row_to_document(row: &rusqlite::Row) -> Result<Document> {
    let last_reviewed: Option<String> = row.get(4)?;
    let next_review: Option<String> = row.get(5)?;
    let created_at: String = row.get(7)?;

    Ok(Document {
        id: row.get(0)?,
        title: row.get(1)?,
        mastery_score: row.get(2)?,
        review_interval_days: row.get(3)?,
        last_reviewed_at: parse_timestamp_opt(last_reviewed),
        next_review_date: parse_timestamp_opt(next_review),
        revision: row.get(6)?,
        created_at: parse_timestamp(&created_at),
    })
}
