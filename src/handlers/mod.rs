//! HTTP handlers: thin JSON adapters over the pure engine.

pub mod attempts;
pub mod documents;
pub mod progress;
pub mod review;
pub mod sessions;

use chrono::{FixedOffset, Local};

pub use attempts::record_attempt;
pub use documents::{document_questions, list_documents};
pub use progress::progress;
pub use review::{review_by_date, review_calendar, review_range, review_today};
pub use sessions::{
  active_recall_session, quiz_session, retake_session, submit_session,
};

/// The host's UTC offset, used to bucket schedules by the learner's own
/// calendar day rather than the UTC one.
pub(crate) fn host_offset() -> FixedOffset {
  *Local::now().offset()
}
