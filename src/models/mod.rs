mod question;

pub use question::{Answer, Mark, Question, QuestionError, QuestionKind};

/// Screen currently shown by the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
