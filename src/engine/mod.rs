//! Quiz engine: session state machine, scoring, grading and result summaries.
//!
//! Nothing in here does I/O or knows how questions are displayed.

mod grade;
mod score;
mod session;
mod summary;

pub use grade::{GradeDescriptor, GradingPolicy, GradingPolicyError};
pub use score::calculate_score;
pub use session::{AnswerRecord, CompletionResult, QuizSession, SessionStatus};
pub use summary::{build_summary, ResultSummary};
