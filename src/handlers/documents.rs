//! Read-side listings of the candidate pool.

use axum::extract::{Path, State};
use axum::Json;

use crate::db::{self, DbPool};
use crate::domain::{Document, Question};
use crate::error::ServiceError;

/// GET /documents
pub async fn list_documents(
  State(pool): State<DbPool>,
) -> Result<Json<Vec<Document>>, ServiceError> {
  let conn = db::try_lock(&pool)?;
  Ok(Json(db::list_documents(&conn)?))
}

/// GET /documents/{id}/questions
///
/// Questions still worth studying; mastered ones are excluded.
pub async fn document_questions(
  State(pool): State<DbPool>,
  Path(id): Path<i64>,
) -> Result<Json<Vec<Question>>, ServiceError> {
  let conn = db::try_lock(&pool)?;

  if db::get_document_by_id(&conn, id)?.is_none() {
    return Err(ServiceError::NotFound("document"));
  }

  Ok(Json(db::list_study_questions(&conn, id)?))
}
