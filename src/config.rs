//! Application configuration constants.
//!
//! This module centralizes the engine's tunables and the database path
//! resolution so nothing is hardcoded at call sites.

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Database Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Ok(contents) = std::fs::read_to_string("config.toml") {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            if let Some(db) = config.database {
                if let Some(path) = db.path {
                    tracing::info!("Using database from config.toml: {}", path);
                    return PathBuf::from(path);
                }
            }
        }
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    // Default
    let default = PathBuf::from("data/review.db");
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, SERVER_PORT)
}

// ==================== Interval Scheduling ====================

/// Shortest allowed review interval
pub const MIN_INTERVAL_DAYS: i64 = 1;

/// Longest allowed review interval
pub const MAX_INTERVAL_DAYS: i64 = 30;

/// Mastery at or above this doubles the interval
pub const GROW_MASTERY_THRESHOLD: f64 = 0.8;

/// Mastery at or above this (but below the grow threshold) holds the
/// interval; anything lower halves it
pub const HOLD_MASTERY_THRESHOLD: f64 = 0.5;

// ==================== Priority Ranking ====================

/// Weight of the performance deficit in the composite priority score
pub const PERFORMANCE_WEIGHT: f64 = 0.7;

/// Weight of staleness in the composite priority score
pub const RECENCY_WEIGHT: f64 = 0.3;

/// Staleness saturates at this many days; unseen items count as this
pub const RECENCY_WINDOW_DAYS: i64 = 30;

/// Items attempted within this many days are labeled "recent attempt"
pub const RECENT_ATTEMPT_DAYS: i64 = 7;

/// Incorrect percentage above this is labeled "low performance"
pub const LOW_PERFORMANCE_THRESHOLD_PCT: f64 = 30.0;

/// Hard override score for an item whose latest attempt was wrong
pub const LAST_INCORRECT_PRIORITY: f64 = 100.0;

// ==================== Session Building ====================

/// Default size of a document-level active-recall queue
pub const DEFAULT_SESSION_ITEMS: usize = 5;

/// Retake priority for a previously-incorrect question
pub const RETAKE_INCORRECT_PRIORITY: f64 = 100.0;

/// Retake priority for a previously-correct question
pub const RETAKE_REVIEW_PRIORITY: f64 = 50.0;

// ==================== Study Listings ====================

/// Questions at or above this mastery are considered mastered and are
/// excluded from study listings
pub const MASTERED_THRESHOLD: f64 = 0.8;

/// Number of weakest documents shown in the progress summary
pub const WEAKEST_DOCUMENTS_LIMIT: usize = 5;
