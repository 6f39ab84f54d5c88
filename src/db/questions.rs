//! Question CRUD and study-listing queries

use rusqlite::{params, Connection, Result};

use crate::config::MASTERED_THRESHOLD;
use crate::domain::{Difficulty, Question};

use super::parse_timestamp;

pub fn insert_question(conn: &Connection, question: &Question) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO questions (document_id, prompt, option1, option2, option3, option4,
                           correct_option_index, hint, explanation, difficulty,
                           mastery_score, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
    "#,
        params![
            question.document_id,
            question.prompt,
            question.options.first().map(String::as_str).unwrap_or(""),
            question.options.get(1).map(String::as_str).unwrap_or(""),
            question.options.get(2).map(String::as_str).unwrap_or(""),
            question.options.get(3).map(String::as_str).unwrap_or(""),
            question.correct_option_index,
            question.hint,
            question.explanation,
            question.difficulty.as_str(),
            question.mastery_score,
            question.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_question_by_id(conn: &Connection, id: i64) -> Result<Option<Question>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, document_id, prompt, option1, option2, option3, option4,
           correct_option_index, hint, explanation, difficulty, mastery_score, created_at
    FROM questions WHERE id = ?1
    "#,
    )?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_question(row)?))
    } else {
        Ok(None)
    }
}

/// All questions of a document, in creation order
pub fn list_questions_for_document(conn: &Connection, document_id: i64) -> Result<Vec<Question>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, document_id, prompt, option1, option2, option3, option4,
           correct_option_index, hint, explanation, difficulty, mastery_score, created_at
    FROM questions
    WHERE document_id = ?1
    ORDER BY created_at ASC, id ASC
    "#,
    )?;

    let questions = stmt
        .query_map(params![document_id], |row| row_to_question(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(questions)
}

/// Questions still worth studying: mastered ones are filtered out
pub fn list_study_questions(conn: &Connection, document_id: i64) -> Result<Vec<Question>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, document_id, prompt, option1, option2, option3, option4,
           correct_option_index, hint, explanation, difficulty, mastery_score, created_at
    FROM questions
    WHERE document_id = ?1 AND mastery_score < ?2
    ORDER BY created_at ASC, id ASC
    "#,
    )?;

    let questions = stmt
        .query_map(params![document_id, MASTERED_THRESHOLD], |row| {
            row_to_question(row)
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(questions)
}

pub fn update_question_mastery(conn: &Connection, question_id: i64, mastery: f64) -> Result<()> {
    conn.execute(
        "UPDATE questions SET mastery_score = ?1, difficulty = ?2 WHERE id = ?3",
        params![mastery, Difficulty::from_mastery(mastery).as_str(), question_id],
    )?;
    Ok(())
}

/// Mean question mastery for a document, None when it has no questions
pub fn average_question_mastery(conn: &Connection, document_id: i64) -> Result<Option<f64>> {
    conn.query_row(
        "SELECT AVG(mastery_score) FROM questions WHERE document_id = ?1",
        params![document_id],
        |row| row.get(0),
    )
}

/// Convert a database row to a Question struct
pub(crate) fn row_to_question(row: &rusqlite::Row) -> Result<Question> {
    let difficulty_str: String = row.get(10)?;
    let created_at: String = row.get(12)?;

    Ok(Question {
        id: row.get(0)?,
        document_id: row.get(1)?,
        prompt: row.get(2)?,
        options: vec![row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?],
        correct_option_index: row.get(7)?,
        hint: row.get(8)?,
        explanation: row.get(9)?,
        difficulty: Difficulty::from_str(&difficulty_str).unwrap_or(Difficulty::Medium),
        mastery_score: row.get(11)?,
        created_at: parse_timestamp(&created_at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{insert_document, run_migrations};
    use crate::domain::Document;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn sample_question(document_id: i64, prompt: &str) -> Question {
        Question::new(
            document_id,
            prompt.to_string(),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            2,
        )
    }

    #[test]
    fn test_insert_and_get_roundtrip() {
        let conn = test_conn();
        let doc_id = insert_document(&conn, &Document::new("doc".to_string())).unwrap();

        let mut question = sample_question(doc_id, "What is ATP?");
        question.hint = Some("energy".to_string());
        let id = insert_question(&conn, &question).unwrap();

        let loaded = get_question_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(loaded.prompt, "What is ATP?");
        assert_eq!(loaded.options, vec!["a", "b", "c", "d"]);
        assert_eq!(loaded.correct_option_index, 2);
        assert_eq!(loaded.hint.as_deref(), Some("energy"));
        assert_eq!(loaded.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_get_missing_question() {
        let conn = test_conn();
        assert!(get_question_by_id(&conn, 404).unwrap().is_none());
    }

    #[test]
    fn test_study_listing_excludes_mastered() {
        let conn = test_conn();
        let doc_id = insert_document(&conn, &Document::new("doc".to_string())).unwrap();

        let weak = insert_question(&conn, &sample_question(doc_id, "weak")).unwrap();
        let strong = insert_question(&conn, &sample_question(doc_id, "strong")).unwrap();
        update_question_mastery(&conn, weak, 0.4).unwrap();
        update_question_mastery(&conn, strong, 0.9).unwrap();

        let study = list_study_questions(&conn, doc_id).unwrap();
        assert_eq!(study.len(), 1);
        assert_eq!(study[0].prompt, "weak");

        // The full listing still returns both
        let all = list_questions_for_document(&conn, doc_id).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_mastery_update_relabels_difficulty() {
        let conn = test_conn();
        let doc_id = insert_document(&conn, &Document::new("doc".to_string())).unwrap();
        let id = insert_question(&conn, &sample_question(doc_id, "q")).unwrap();

        update_question_mastery(&conn, id, 0.2).unwrap();
        let q = get_question_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(q.difficulty, Difficulty::Hard);
        assert!((q.mastery_score - 0.2).abs() < 1e-9);

        update_question_mastery(&conn, id, 0.95).unwrap();
        let q = get_question_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(q.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_average_mastery() {
        let conn = test_conn();
        let doc_id = insert_document(&conn, &Document::new("doc".to_string())).unwrap();

        assert!(average_question_mastery(&conn, doc_id).unwrap().is_none());

        let a = insert_question(&conn, &sample_question(doc_id, "a")).unwrap();
        let b = insert_question(&conn, &sample_question(doc_id, "b")).unwrap();
        update_question_mastery(&conn, a, 0.4).unwrap();
        update_question_mastery(&conn, b, 0.8).unwrap();

        let avg = average_question_mastery(&conn, doc_id).unwrap().unwrap();
        assert!((avg - 0.6).abs() < 1e-9);
    }
}
