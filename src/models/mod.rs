pub mod content;
pub mod session;
pub mod submission;

pub use content::{Activity, Book, BookRole, Chapter, Section, Term};
pub use session::{BuildKey, RunContext, RunMode, Session};
pub use submission::{ActivityOutcome, PartOutcome, SubmissionRecord};
