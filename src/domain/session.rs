use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::question::{Difficulty, Question};

/// Why an item was surfaced for review. Mutually exclusive; assigned by the
/// priority ranker (first matching rule wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityReason {
  LowPerformance,
  RecentAttempt,
  SpacedRepetitionDue,
  Review,
}

impl PriorityReason {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::LowPerformance => "low_performance",
      Self::RecentAttempt => "recent_attempt",
      Self::SpacedRepetitionDue => "spaced_repetition_due",
      Self::Review => "review",
    }
  }
}

/// A learner's answer from a previous run of a quiz, used to seed retakes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetakeAnswer {
  pub question_id: i64,
  pub selected_option_index: i64,
  pub correct: bool,
}

/// One question inside an active-recall session, annotated with the
/// priority data that put it there.
#[derive(Debug, Clone, Serialize)]
pub struct SessionItem {
  pub question: Question,
  pub priority_score: f64,
  pub priority_reason: PriorityReason,
  pub difficulty: Difficulty,
  /// True when the seed answers show this question was missed last time
  pub was_previously_incorrect: bool,
  /// The option the learner picked last time, for retake highlighting
  pub previous_answer: Option<i64>,
}

/// An ordered, bounded batch of questions for a single review pass.
///
/// Sessions are built on demand and discarded after completion; results are
/// persisted back as new attempts, never as session state.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
  pub created_at: DateTime<Utc>,
  /// Document id of the original quiz when this is a retake
  pub retake_of: Option<i64>,
  pub items: Vec<SessionItem>,
}

impl Session {
  pub fn empty() -> Self {
    Self {
      created_at: Utc::now(),
      retake_of: None,
      items: Vec::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}
