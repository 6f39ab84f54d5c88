//! Calendar projection of the per-document review schedule.
//!
//! Buckets are keyed by the *local* calendar date of `next_review_date`: the
//! caller supplies its UTC offset, so a review scheduled for 23:30 UTC lands
//! on the learner's own day, not the UTC one. Documents without a schedule
//! never appear here (they surface through active recall instead).

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

use crate::domain::Document;
use crate::error::ServiceError;

fn local_date(dt: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
  dt.with_timezone(&offset).date_naive()
}

fn due_date(doc: &Document, offset: FixedOffset) -> Option<NaiveDate> {
  doc.next_review_date.map(|dt| local_date(dt, offset))
}

/// Documents due on exactly one calendar date, ordered by review time.
pub fn due_on(documents: &[Document], date: NaiveDate, offset: FixedOffset) -> Vec<Document> {
  let mut due: Vec<Document> = documents
    .iter()
    .filter(|doc| due_date(doc, offset) == Some(date))
    .cloned()
    .collect();
  due.sort_by_key(|doc| doc.next_review_date);
  due
}

/// Documents due within [start, end], bounds inclusive.
pub fn due_in_range(
  documents: &[Document],
  start: NaiveDate,
  end: NaiveDate,
  offset: FixedOffset,
) -> Result<Vec<Document>, ServiceError> {
  if end < start {
    return Err(ServiceError::InvalidRange(format!(
      "end {} precedes start {}",
      end, start
    )));
  }

  let mut due: Vec<Document> = documents
    .iter()
    .filter(|doc| {
      due_date(doc, offset).is_some_and(|date| date >= start && date <= end)
    })
    .cloned()
    .collect();
  due.sort_by_key(|doc| doc.next_review_date);
  Ok(due)
}

/// A whole month's schedule: map from calendar date to the documents due
/// that day. Only dates with at least one due document appear.
pub fn month_buckets(
  documents: &[Document],
  year: i32,
  month: u32,
  offset: FixedOffset,
) -> Result<BTreeMap<NaiveDate, Vec<Document>>, ServiceError> {
  if !(1..=12).contains(&month) {
    return Err(ServiceError::InvalidRange(format!(
      "month {} outside 1-12",
      month
    )));
  }

  let mut buckets: BTreeMap<NaiveDate, Vec<Document>> = BTreeMap::new();
  for doc in documents {
    if let Some(date) = due_date(doc, offset) {
      if date.year() == year && date.month() == month {
        buckets.entry(date).or_default().push(doc.clone());
      }
    }
  }

  for bucket in buckets.values_mut() {
    bucket.sort_by_key(|doc| doc.next_review_date);
  }

  Ok(buckets)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
  }

  fn doc(id: i64, next_review: Option<DateTime<Utc>>) -> Document {
    Document {
      id,
      title: format!("doc {}", id),
      mastery_score: 0.5,
      review_interval_days: next_review.map(|_| 3),
      last_reviewed_at: None,
      next_review_date: next_review,
      revision: 0,
      created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
  }

  fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
  }

  #[test]
  fn test_due_on_matches_single_date() {
    let docs = vec![
      doc(1, Some(at(2025, 4, 10, 9))),
      doc(2, Some(at(2025, 4, 11, 9))),
      doc(3, None),
    ];

    let due = due_on(&docs, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(), utc());
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, 1);
  }

  #[test]
  fn test_due_on_orders_by_review_time() {
    let docs = vec![
      doc(1, Some(at(2025, 4, 10, 18))),
      doc(2, Some(at(2025, 4, 10, 8))),
    ];

    let due = due_on(&docs, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(), utc());
    assert_eq!(due[0].id, 2);
    assert_eq!(due[1].id, 1);
  }

  #[test]
  fn test_unscheduled_documents_excluded() {
    let docs = vec![doc(1, None), doc(2, None)];
    let due = due_on(&docs, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(), utc());
    assert!(due.is_empty());
  }

  #[test]
  fn test_local_date_bucketing_across_midnight() {
    // 23:30 UTC on the 9th is already the 10th at UTC+2
    let docs = vec![doc(1, Some(Utc.with_ymd_and_hms(2025, 4, 9, 23, 30, 0).unwrap()))];
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

    let due_ninth = due_on(&docs, NaiveDate::from_ymd_opt(2025, 4, 9).unwrap(), plus_two);
    assert!(due_ninth.is_empty());

    let due_tenth = due_on(&docs, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(), plus_two);
    assert_eq!(due_tenth.len(), 1);
  }

  #[test]
  fn test_range_inclusive_bounds() {
    let docs = vec![
      doc(1, Some(at(2025, 4, 10, 9))),
      doc(2, Some(at(2025, 4, 12, 9))),
      doc(3, Some(at(2025, 4, 14, 9))),
      doc(4, Some(at(2025, 4, 15, 9))),
    ];

    let due = due_in_range(
      &docs,
      NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
      NaiveDate::from_ymd_opt(2025, 4, 14).unwrap(),
      utc(),
    )
    .unwrap();

    let ids: Vec<i64> = due.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
  }

  #[test]
  fn test_range_rejects_inverted_bounds() {
    let result = due_in_range(
      &[],
      NaiveDate::from_ymd_opt(2025, 4, 14).unwrap(),
      NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
      utc(),
    );
    assert!(matches!(result, Err(ServiceError::InvalidRange(_))));
  }

  #[test]
  fn test_range_single_day() {
    let docs = vec![doc(1, Some(at(2025, 4, 10, 9)))];
    let date = NaiveDate::from_ymd_opt(2025, 4, 10).unwrap();
    let due = due_in_range(&docs, date, date, utc()).unwrap();
    assert_eq!(due.len(), 1);
  }

  #[test]
  fn test_month_buckets_partition() {
    let docs = vec![
      doc(1, Some(at(2025, 4, 3, 9))),
      doc(2, Some(at(2025, 4, 3, 15))),
      doc(3, Some(at(2025, 4, 20, 9))),
      doc(4, Some(at(2025, 5, 1, 9))), // next month
      doc(5, None),
    ];

    let buckets = month_buckets(&docs, 2025, 4, utc()).unwrap();

    assert_eq!(buckets.len(), 2);
    let third = NaiveDate::from_ymd_opt(2025, 4, 3).unwrap();
    assert_eq!(buckets[&third].len(), 2);

    // Union of buckets is exactly the April documents, no duplicates
    let mut all: Vec<i64> = buckets
      .values()
      .flat_map(|docs| docs.iter().map(|d| d.id))
      .collect();
    all.sort();
    assert_eq!(all, vec![1, 2, 3]);
  }

  #[test]
  fn test_month_buckets_rejects_bad_month() {
    assert!(matches!(
      month_buckets(&[], 2025, 0, utc()),
      Err(ServiceError::InvalidRange(_))
    ));
    assert!(matches!(
      month_buckets(&[], 2025, 13, utc()),
      Err(ServiceError::InvalidRange(_))
    ));
  }

  #[test]
  fn test_month_buckets_empty_is_ok() {
    let buckets = month_buckets(&[], 2025, 4, utc()).unwrap();
    assert!(buckets.is_empty());
  }

  #[test]
  fn test_document_in_at_most_one_bucket() {
    let docs = vec![doc(1, Some(at(2025, 4, 3, 9)))];
    let buckets = month_buckets(&docs, 2025, 4, utc()).unwrap();

    let occurrences: usize = buckets
      .values()
      .map(|docs| docs.iter().filter(|d| d.id == 1).count())
      .sum();
    assert_eq!(occurrences, 1);
  }
}
