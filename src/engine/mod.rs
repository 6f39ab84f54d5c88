//! The adaptive review engine: pure, synchronous decision logic.
//!
//! Everything in this module operates on in-memory snapshots supplied by the
//! caller. Time never comes from the clock; the handlers inject "now" so the
//! same inputs always produce the same outputs.

pub mod calendar;
pub mod interval;
pub mod mastery;
pub mod priority;
pub mod session;

pub use interval::{next_interval, reschedule, Reschedule};
pub use mastery::{estimate_mastery, MasteryEstimate};
pub use priority::{rank, Candidate, RankedCandidate};
pub use session::{build_question_session, build_retake_session, select_top};
