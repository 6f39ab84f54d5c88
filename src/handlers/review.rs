//! Review schedule queries: what is due today, on a date, in a range, or
//! across a whole month.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{self, DbPool};
use crate::domain::Document;
use crate::engine::calendar;
use crate::error::ServiceError;

use super::host_offset;

fn parse_date(s: &str) -> Result<NaiveDate, ServiceError> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|_| ServiceError::InvalidRange(format!("unparseable date '{}'", s)))
}

/// GET /review/today
pub async fn review_today(
  State(pool): State<DbPool>,
) -> Result<Json<Vec<Document>>, ServiceError> {
  let conn = db::try_lock(&pool)?;
  let documents = db::list_scheduled_documents(&conn)?;

  let offset = host_offset();
  let today = Utc::now().with_timezone(&offset).date_naive();
  Ok(Json(calendar::due_on(&documents, today, offset)))
}

/// GET /review/date/{date}
pub async fn review_by_date(
  State(pool): State<DbPool>,
  Path(date): Path<String>,
) -> Result<Json<Vec<Document>>, ServiceError> {
  let date = parse_date(&date)?;

  let conn = db::try_lock(&pool)?;
  let documents = db::list_scheduled_documents(&conn)?;
  Ok(Json(calendar::due_on(&documents, date, host_offset())))
}

#[derive(Debug, Deserialize)]
pub struct RangeParams {
  pub start: String,
  pub end: String,
}

/// GET /review/range?start=YYYY-MM-DD&end=YYYY-MM-DD
pub async fn review_range(
  State(pool): State<DbPool>,
  Query(params): Query<RangeParams>,
) -> Result<Json<Vec<Document>>, ServiceError> {
  let start = parse_date(&params.start)?;
  let end = parse_date(&params.end)?;

  let conn = db::try_lock(&pool)?;
  let documents = db::list_scheduled_documents(&conn)?;
  let due = calendar::due_in_range(&documents, start, end, host_offset())?;
  Ok(Json(due))
}

/// One calendar entry: the schedule facts a caller renders on a day cell
#[derive(Debug, Serialize)]
pub struct CalendarEntry {
  pub id: i64,
  pub title: String,
  pub mastery_score: f64,
  pub review_interval_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
  pub year: i32,
  pub month: u32,
  /// ISO date string -> documents due that day
  pub calendar_data: BTreeMap<String, Vec<CalendarEntry>>,
}

/// GET /review/calendar/{year}/{month}
pub async fn review_calendar(
  State(pool): State<DbPool>,
  Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<CalendarResponse>, ServiceError> {
  let conn = db::try_lock(&pool)?;
  let documents = db::list_scheduled_documents(&conn)?;

  let buckets = calendar::month_buckets(&documents, year, month, host_offset())?;

  let calendar_data = buckets
    .into_iter()
    .map(|(date, docs)| {
      let entries = docs
        .into_iter()
        .map(|doc| CalendarEntry {
          id: doc.id,
          title: doc.title,
          mastery_score: doc.mastery_score,
          review_interval_days: doc.review_interval_days,
        })
        .collect();
      (date.format("%Y-%m-%d").to_string(), entries)
    })
    .collect();

  Ok(Json(CalendarResponse {
    year,
    month,
    calendar_data,
  }))
}
