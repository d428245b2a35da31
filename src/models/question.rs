use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer to a binary (O/X) question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// True.
    O,
    /// False.
    X,
}

impl Mark {
    pub const ALL: [Mark; 2] = [Mark::O, Mark::X];

    pub fn as_str(self) -> &'static str {
        match self {
            Mark::O => "O",
            Mark::X => "X",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mark {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "O" => Ok(Mark::O),
            "X" => Ok(Mark::X),
            other => Err(QuestionError::InvalidMark(other.to_string())),
        }
    }
}

/// A submitted or expected answer in its canonical form.
///
/// Correctness is plain equality between two `Answer`s, so the
/// presentation layer has to hand in the same variant the question uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Answer {
    /// Text of one of the options of a multiple-choice question.
    Choice(String),
    /// O or X.
    Mark(Mark),
}

impl From<Mark> for Answer {
    fn from(mark: Mark) -> Self {
        Answer::Mark(mark)
    }
}

impl From<&str> for Answer {
    fn from(text: &str) -> Self {
        Answer::Choice(text.to_string())
    }
}

impl From<String> for Answer {
    fn from(text: String) -> Self {
        Answer::Choice(text)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Choice(text) => f.write_str(text),
            Answer::Mark(mark) => mark.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    Binary,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("binary question answer must be \"O\" or \"X\", got {0:?}")]
    InvalidMark(String),
}

/// One quiz question.
///
/// Deserialized from `{ "question", "options"?, "correctAnswer", "explanation"? }`.
/// A question without options is an O/X question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: Answer,
    pub explanation: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    question: String,
    #[serde(default)]
    options: Vec<String>,
    correct_answer: String,
    #[serde(default)]
    explanation: Option<String>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let correct_answer = if raw.options.is_empty() {
            Answer::Mark(raw.correct_answer.parse()?)
        } else {
            Answer::Choice(raw.correct_answer)
        };

        Ok(Self {
            prompt: raw.question,
            options: raw.options,
            correct_answer,
            explanation: raw.explanation.filter(|text| !text.trim().is_empty()),
        })
    }
}

impl Question {
    pub fn multiple_choice<I, S>(prompt: &str, options: I, correct: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prompt: prompt.to_string(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: Answer::Choice(correct.to_string()),
            explanation: None,
        }
    }

    pub fn binary(prompt: &str, correct: Mark) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: Vec::new(),
            correct_answer: Answer::Mark(correct),
            explanation: None,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        if self.options.is_empty() {
            QuestionKind::Binary
        } else {
            QuestionKind::MultipleChoice
        }
    }

    /// Number of selectable slots: the options, or O and X.
    pub fn answer_count(&self) -> usize {
        match self.kind() {
            QuestionKind::MultipleChoice => self.options.len(),
            QuestionKind::Binary => Mark::ALL.len(),
        }
    }

    /// Canonical answer for the selectable slot at `index`.
    pub fn option_answer(&self, index: usize) -> Option<Answer> {
        match self.kind() {
            QuestionKind::MultipleChoice => self.options.get(index).cloned().map(Answer::Choice),
            QuestionKind::Binary => Mark::ALL.get(index).copied().map(Answer::Mark),
        }
    }

    pub fn answer_options(&self) -> Vec<Answer> {
        (0..self.answer_count())
            .filter_map(|index| self.option_answer(index))
            .collect()
    }

    /// Slot holding the correct answer, if any slot does.
    pub fn correct_index(&self) -> Option<usize> {
        self.answer_options()
            .iter()
            .position(|answer| *answer == self.correct_answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_multiple_choice() {
        let json = r#"{
            "question": "Which keyword declares a constant?",
            "options": ["let", "const", "static", "mut"],
            "correctAnswer": "const",
            "explanation": "const items are inlined."
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.kind(), QuestionKind::MultipleChoice);
        assert_eq!(question.correct_answer, Answer::Choice("const".into()));
        assert_eq!(question.correct_index(), Some(1));
        assert_eq!(question.explanation.as_deref(), Some("const items are inlined."));
    }

    #[test]
    fn test_deserialize_binary() {
        let json = r#"{ "question": "Rust has a garbage collector.", "correctAnswer": "X" }"#;
        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.kind(), QuestionKind::Binary);
        assert_eq!(question.correct_answer, Answer::Mark(Mark::X));
        assert_eq!(question.answer_options(), vec![Answer::Mark(Mark::O), Answer::Mark(Mark::X)]);
        assert_eq!(question.correct_index(), Some(1));
        assert!(question.explanation.is_none());
    }

    #[test]
    fn test_binary_rejects_unknown_mark() {
        let json = r#"{ "question": "Yes?", "options": [], "correctAnswer": "yes" }"#;
        let err = serde_json::from_str::<Question>(json).unwrap_err();
        assert!(err.to_string().contains("\"O\" or \"X\""));
    }

    #[test]
    fn test_blank_explanation_is_dropped() {
        let json = r#"{ "question": "Q", "correctAnswer": "O", "explanation": "  " }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert!(question.explanation.is_none());
    }

    #[test]
    fn test_choice_never_equals_mark() {
        assert_ne!(Answer::from("O"), Answer::from(Mark::O));
    }

    #[test]
    fn test_option_answer_out_of_range() {
        let question = Question::multiple_choice("Q", ["a", "b"], "a");
        assert_eq!(question.option_answer(1), Some(Answer::Choice("b".into())));
        assert_eq!(question.option_answer(2), None);
    }
}
