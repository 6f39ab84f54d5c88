//! Spaced-repetition interval policy.
//!
//! The interval grows when mastery is high, holds steady in the middle band,
//! and tightens when mastery is low, always staying within
//! [`MIN_INTERVAL_DAYS`, `MAX_INTERVAL_DAYS`]. Deterministic: the same
//! inputs always produce the same schedule.

use chrono::{DateTime, Duration, Utc};

use crate::config::{
  GROW_MASTERY_THRESHOLD, HOLD_MASTERY_THRESHOLD, MAX_INTERVAL_DAYS, MIN_INTERVAL_DAYS,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reschedule {
  pub interval_days: i64,
  pub next_review: DateTime<Utc>,
}

/// Compute the next review interval from the current mastery score and the
/// previous interval (None on first review).
pub fn next_interval(mastery: f64, previous: Option<i64>) -> i64 {
  let previous = previous.unwrap_or(MIN_INTERVAL_DAYS).max(MIN_INTERVAL_DAYS);

  let interval = if mastery >= GROW_MASTERY_THRESHOLD {
    previous.saturating_mul(2)
  } else if mastery >= HOLD_MASTERY_THRESHOLD {
    previous
  } else {
    previous / 2
  };

  interval.clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS)
}

/// Full schedule update after a scored review: the new interval plus the
/// date the item becomes due again.
pub fn reschedule(
  mastery: f64,
  previous: Option<i64>,
  last_reviewed: DateTime<Utc>,
) -> Reschedule {
  let interval_days = next_interval(mastery, previous);
  Reschedule {
    interval_days,
    next_review: last_reviewed + Duration::days(interval_days),
  }
}
