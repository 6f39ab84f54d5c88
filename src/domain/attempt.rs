use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One historical answer event for a question.
///
/// Attempts are immutable once recorded. `id` is the insertion-order row id;
/// when two attempts carry the same timestamp, the higher id is treated as
/// the later event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
  pub id: i64,
  pub question_id: i64,
  /// Set when the attempt was recorded as part of a batch session submission
  pub session_id: Option<i64>,
  pub selected_option_index: i64,
  pub is_correct: bool,
  pub answered_at: DateTime<Utc>,
}

impl Attempt {
  pub fn new(question_id: i64, selected_option_index: i64, is_correct: bool) -> Self {
    Self {
      id: 0,
      question_id,
      session_id: None,
      selected_option_index,
      is_correct,
      answered_at: Utc::now(),
    }
  }
}
