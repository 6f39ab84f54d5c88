use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
    // Create tables with COMPLETE schema for new databases
    // Migrations below handle upgrades for existing databases
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS documents (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      title TEXT NOT NULL,
      mastery_score REAL NOT NULL DEFAULT 0,
      review_interval_days INTEGER,
      last_reviewed_at TEXT,
      next_review_date TEXT,
      revision INTEGER NOT NULL DEFAULT 0,
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS questions (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      document_id INTEGER NOT NULL,
      prompt TEXT NOT NULL,
      option1 TEXT NOT NULL,
      option2 TEXT NOT NULL,
      option3 TEXT NOT NULL,
      option4 TEXT NOT NULL,
      correct_option_index INTEGER NOT NULL,
      hint TEXT,
      explanation TEXT,
      difficulty TEXT NOT NULL DEFAULT 'medium',
      mastery_score REAL NOT NULL DEFAULT 0,
      created_at TEXT NOT NULL,
      FOREIGN KEY (document_id) REFERENCES documents(id)
    );

    CREATE TABLE IF NOT EXISTS review_sessions (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      document_id INTEGER NOT NULL,
      started_at TEXT NOT NULL,
      completed_at TEXT,
      score REAL,
      correct_answers INTEGER NOT NULL DEFAULT 0,
      total_questions INTEGER NOT NULL DEFAULT 0,
      FOREIGN KEY (document_id) REFERENCES documents(id)
    );

    CREATE TABLE IF NOT EXISTS attempts (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      question_id INTEGER NOT NULL,
      session_id INTEGER,
      selected_option_index INTEGER NOT NULL,
      is_correct INTEGER NOT NULL,
      answered_at TEXT NOT NULL,
      FOREIGN KEY (question_id) REFERENCES questions(id),
      FOREIGN KEY (session_id) REFERENCES review_sessions(id)
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_documents_next_review ON documents(next_review_date);
    CREATE INDEX IF NOT EXISTS idx_questions_document_id ON questions(document_id);
    CREATE INDEX IF NOT EXISTS idx_attempts_question_id ON attempts(question_id);
    CREATE INDEX IF NOT EXISTS idx_attempts_answered_at ON attempts(answered_at);
    CREATE INDEX IF NOT EXISTS idx_sessions_document_id ON review_sessions(document_id);
    "#,
    )?;

    // ============================================================
    // MIGRATIONS FOR EXISTING DATABASES
    // These are no-ops for new databases (columns already exist)
    // ============================================================

    // Migration: Add revision column for the optimistic write-back check
    add_column_if_missing(conn, "documents", "revision", "INTEGER NOT NULL DEFAULT 0")?;

    // Migration: Add session linkage to attempts
    add_column_if_missing(conn, "attempts", "session_id", "INTEGER")?;

    Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    conn.prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
        .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(conn: &Connection, table: &str, column: &str, column_def: &str) -> Result<()> {
    if !column_exists(conn, table, column) {
        conn.execute(
            &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
            [],
        )?;
    }
    Ok(())
}
