//! Active-recall session construction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::config::{RETAKE_INCORRECT_PRIORITY, RETAKE_REVIEW_PRIORITY};
use crate::domain::{Attempt, Difficulty, PriorityReason, Question, RetakeAnswer, Session,
  SessionItem};
use crate::engine::mastery::estimate_mastery;
use crate::engine::priority::{rank, Candidate, RankedCandidate};

/// Take the top `max_items` entries of a ranked pool, preserving rank order.
/// A pool smaller than `max_items` is returned whole; no padding or repeats.
pub fn select_top(mut ranked: Vec<RankedCandidate>, max_items: usize) -> Vec<RankedCandidate> {
  ranked.truncate(max_items);
  ranked
}

/// Build a question-level session for one quiz, ordered by attempt history.
///
/// Each question's mastery is estimated from its own attempts; the ranked
/// order of the pool decides the session order. Unbounded: every question of
/// the quiz appears exactly once.
pub fn build_question_session(
  questions: Vec<Question>,
  attempts_by_question: &HashMap<i64, Vec<Attempt>>,
  now: DateTime<Utc>,
) -> Session {
  static EMPTY: Vec<Attempt> = Vec::new();

  let mut by_id: HashMap<i64, Question> = HashMap::with_capacity(questions.len());
  let mut pool = Vec::with_capacity(questions.len());

  for question in questions {
    let attempts = attempts_by_question.get(&question.id).unwrap_or(&EMPTY);
    let estimate = estimate_mastery(attempts);
    let last_reviewed_at = attempts
      .iter()
      .max_by_key(|a| (a.answered_at, a.id))
      .map(|a| a.answered_at);

    pool.push(Candidate {
      id: question.id,
      mastery_score: estimate.score,
      last_incorrect: estimate.last_incorrect,
      last_reviewed_at,
    });
    by_id.insert(question.id, question);
  }

  let items = rank(pool, now)
    .into_iter()
    .filter_map(|ranked| {
      let question = by_id.remove(&ranked.id)?;
      Some(SessionItem {
        difficulty: Difficulty::from_mastery(ranked.mastery_score),
        question,
        priority_score: ranked.priority_score,
        priority_reason: ranked.priority_reason,
        was_previously_incorrect: ranked.last_incorrect,
        previous_answer: None,
      })
    })
    .collect();

  Session {
    created_at: now,
    retake_of: None,
    items,
  }
}

/// Build a retake session seeded by the learner's answers from a previous
/// run of the same quiz.
///
/// Previously-incorrect questions are pinned to the top (score 100); the
/// rest follow at score 50. Within each group the original quiz order is
/// preserved (the sort is stable).
pub fn build_retake_session(
  document_id: i64,
  questions: Vec<Question>,
  previous: &[RetakeAnswer],
  now: DateTime<Utc>,
) -> Session {
  let mut items: Vec<SessionItem> = questions
    .into_iter()
    .map(|question| {
      let prior = previous.iter().find(|a| a.question_id == question.id);
      let was_incorrect = prior.map(|a| !a.correct).unwrap_or(false);

      SessionItem {
        difficulty: if was_incorrect {
          Difficulty::Hard
        } else {
          Difficulty::Medium
        },
        priority_score: if was_incorrect {
          RETAKE_INCORRECT_PRIORITY
        } else {
          RETAKE_REVIEW_PRIORITY
        },
        priority_reason: if was_incorrect {
          PriorityReason::LowPerformance
        } else {
          PriorityReason::Review
        },
        was_previously_incorrect: was_incorrect,
        previous_answer: prior.map(|a| a.selected_option_index),
        question,
      }
    })
    .collect();

  items.sort_by(|a, b| {
    b.priority_score
      .partial_cmp(&a.priority_score)
      .unwrap_or(std::cmp::Ordering::Equal)
  });

  Session {
    created_at: now,
    retake_of: Some(document_id),
    items,
  }
}
