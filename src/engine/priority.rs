//! Performance-weighted priority ranking of review candidates.
//!
//! The composite score weighs performance deficit at 70% and staleness at
//! 30%, with one hard override: an item whose most recent attempt was wrong
//! always ranks at the top.

use chrono::{DateTime, Utc};

use crate::config::{
  LAST_INCORRECT_PRIORITY, LOW_PERFORMANCE_THRESHOLD_PCT, PERFORMANCE_WEIGHT,
  RECENCY_WEIGHT, RECENCY_WINDOW_DAYS, RECENT_ATTEMPT_DAYS,
};
use crate::domain::PriorityReason;

/// One item of the candidate pool, as the ranker sees it.
#[derive(Debug, Clone)]
pub struct Candidate {
  pub id: i64,
  pub mastery_score: f64,
  pub last_incorrect: bool,
  pub last_reviewed_at: Option<DateTime<Utc>>,
}

/// A candidate annotated with its computed priority, in rank order.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
  pub id: i64,
  pub mastery_score: f64,
  pub last_incorrect: bool,
  pub last_reviewed_at: Option<DateTime<Utc>>,
  pub days_since_seen: i64,
  pub priority_score: f64,
  pub priority_reason: PriorityReason,
}

/// Days since the item was last seen, saturated at the recency window.
/// Never-reviewed items count as maximally stale.
fn days_since_seen(last_reviewed_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
  match last_reviewed_at {
    Some(reviewed) => (now - reviewed).num_days().clamp(0, RECENCY_WINDOW_DAYS),
    None => RECENCY_WINDOW_DAYS,
  }
}

fn score_candidate(candidate: &Candidate, now: DateTime<Utc>) -> (f64, i64) {
  let days = days_since_seen(candidate.last_reviewed_at, now);

  if candidate.last_incorrect {
    return (LAST_INCORRECT_PRIORITY, days);
  }

  let incorrect_pct = (1.0 - candidate.mastery_score) * 100.0;
  let recency_factor = days as f64 / RECENCY_WINDOW_DAYS as f64;
  let score = incorrect_pct * PERFORMANCE_WEIGHT + recency_factor * 100.0 * RECENCY_WEIGHT;

  (score, days)
}

fn label_reason(candidate: &Candidate, days_since_seen: i64) -> PriorityReason {
  let incorrect_pct = (1.0 - candidate.mastery_score) * 100.0;

  if candidate.last_incorrect {
    PriorityReason::LowPerformance
  } else if incorrect_pct > LOW_PERFORMANCE_THRESHOLD_PCT {
    PriorityReason::LowPerformance
  } else if days_since_seen < RECENT_ATTEMPT_DAYS {
    PriorityReason::RecentAttempt
  } else {
    PriorityReason::SpacedRepetitionDue
  }
}

/// Rank a candidate pool, most urgent first.
///
/// Ordering: priority score descending; the last-incorrect override ranks
/// above every unflagged item even at equal scores; remaining ties go to the
/// staler item (never-reviewed sorts before reviewed-today).
pub fn rank(pool: Vec<Candidate>, now: DateTime<Utc>) -> Vec<RankedCandidate> {
  let mut ranked: Vec<RankedCandidate> = pool
    .into_iter()
    .map(|candidate| {
      let (priority_score, days) = score_candidate(&candidate, now);
      let priority_reason = label_reason(&candidate, days);
      RankedCandidate {
        id: candidate.id,
        mastery_score: candidate.mastery_score,
        last_incorrect: candidate.last_incorrect,
        last_reviewed_at: candidate.last_reviewed_at,
        days_since_seen: days,
        priority_score,
        priority_reason,
      }
    })
    .collect();

  ranked.sort_by(|a, b| {
    b.priority_score
      .partial_cmp(&a.priority_score)
      .unwrap_or(std::cmp::Ordering::Equal)
      .then_with(|| b.last_incorrect.cmp(&a.last_incorrect))
      .then_with(|| a.last_reviewed_at.cmp(&b.last_reviewed_at))
  });

  ranked
}
