use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reviewable document: the unit of calendar-based spaced repetition.
///
/// Schedule state (`review_interval_days`, `last_reviewed_at`,
/// `next_review_date`) is absent until the first scored review. The
/// `revision` counter backs the optimistic write-back check: every schedule
/// update must name the revision it read, and bumps it on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
  pub id: i64,
  pub title: String,
  /// Fraction of correct attempts across the document's questions, in [0,1]
  pub mastery_score: f64,
  pub review_interval_days: Option<i64>,
  pub last_reviewed_at: Option<DateTime<Utc>>,
  pub next_review_date: Option<DateTime<Utc>>,
  pub revision: i64,
  pub created_at: DateTime<Utc>,
}

impl Document {
  pub fn new(title: String) -> Self {
    Self {
      id: 0,
      title,
      mastery_score: 0.0,
      review_interval_days: None,
      last_reviewed_at: None,
      next_review_date: None,
      revision: 0,
      created_at: Utc::now(),
    }
  }

  /// A document enters the calendar only once it has been reviewed
  pub fn is_scheduled(&self) -> bool {
    self.next_review_date.is_some()
  }
}
