pub mod attempt;
pub mod document;
pub mod question;
pub mod session;

pub use attempt::Attempt;
pub use document::Document;
pub use question::{Difficulty, Question};
pub use session::{PriorityReason, RetakeAnswer, Session, SessionItem};
