//! Mastery estimation from attempt history.

use crate::domain::Attempt;

/// Neutral mastery for a never-attempted item. Treated as medium priority
/// rather than unknown/zero so blank items are not over-prioritized.
pub const NEUTRAL_MASTERY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MasteryEstimate {
  /// Fraction of correct attempts, in [0,1]
  pub score: f64,
  pub total_attempts: usize,
  /// True if the most recent attempt (by timestamp) was wrong
  pub last_incorrect: bool,
}

impl MasteryEstimate {
  pub fn neutral() -> Self {
    Self {
      score: NEUTRAL_MASTERY,
      total_attempts: 0,
      last_incorrect: false,
    }
  }
}

/// Estimate mastery for one item from its attempt history.
///
/// The most recent attempt is found by comparing timestamps, not slice
/// order, since attempts may arrive out of order. Equal timestamps fall
/// back to the row id: the later-inserted record wins.
pub fn estimate_mastery(attempts: &[Attempt]) -> MasteryEstimate {
  if attempts.is_empty() {
    return MasteryEstimate::neutral();
  }

  let total = attempts.len();
  let correct = attempts.iter().filter(|a| a.is_correct).count();

  let last_incorrect = attempts
    .iter()
    .max_by_key(|a| (a.answered_at, a.id))
    .map(|latest| !latest.is_correct)
    .unwrap_or(false);

  MasteryEstimate {
    score: correct as f64 / total as f64,
    total_attempts: total,
    last_incorrect,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, Utc};

  fn attempt(id: i64, correct: bool, minutes_ago: i64) -> Attempt {
    Attempt {
      id,
      question_id: 1,
      session_id: None,
      selected_option_index: 0,
      is_correct: correct,
      answered_at: Utc::now() - Duration::minutes(minutes_ago),
    }
  }

  #[test]
  fn test_no_attempts_neutral_default() {
    let estimate = estimate_mastery(&[]);
    assert_eq!(estimate.score, NEUTRAL_MASTERY);
    assert_eq!(estimate.total_attempts, 0);
    assert!(!estimate.last_incorrect);
  }

  #[test]
  fn test_score_is_correct_fraction() {
    // 3 correct out of 10 -> 0.3
    let mut attempts: Vec<Attempt> = (0..3).map(|i| attempt(i, true, 100 - i)).collect();
    attempts.extend((3..10).map(|i| attempt(i, false, 100 - i)));

    let estimate = estimate_mastery(&attempts);
    assert!((estimate.score - 0.3).abs() < 1e-9);
    assert_eq!(estimate.total_attempts, 10);
  }

  #[test]
  fn test_all_correct() {
    let attempts = vec![attempt(1, true, 10), attempt(2, true, 5)];
    let estimate = estimate_mastery(&attempts);
    assert_eq!(estimate.score, 1.0);
    assert!(!estimate.last_incorrect);
  }

  #[test]
  fn test_last_incorrect_by_timestamp_not_order() {
    // Most recent attempt (5 min ago) is wrong, but it appears first in the
    // slice. Timestamp comparison must still flag it.
    let attempts = vec![attempt(2, false, 5), attempt(1, true, 60)];
    let estimate = estimate_mastery(&attempts);
    assert!(estimate.last_incorrect);
  }

  #[test]
  fn test_last_correct_by_timestamp_not_order() {
    let attempts = vec![attempt(1, false, 60), attempt(2, true, 5)];
    let estimate = estimate_mastery(&attempts);
    assert!(!estimate.last_incorrect);
  }

  #[test]
  fn test_tied_timestamps_later_insert_wins() {
    let ts = Utc::now();
    let mut a = attempt(1, true, 0);
    a.answered_at = ts;
    let mut b = attempt(2, false, 0);
    b.answered_at = ts;

    // Same timestamp, higher id inserted later -> its outcome decides
    let estimate = estimate_mastery(&[a.clone(), b.clone()]);
    assert!(estimate.last_incorrect);

    // Order in the slice must not matter
    let estimate = estimate_mastery(&[b, a]);
    assert!(estimate.last_incorrect);
  }

  #[test]
  fn test_single_incorrect_attempt() {
    let estimate = estimate_mastery(&[attempt(1, false, 1)]);
    assert_eq!(estimate.score, 0.0);
    assert_eq!(estimate.total_attempts, 1);
    assert!(estimate.last_incorrect);
  }
}
