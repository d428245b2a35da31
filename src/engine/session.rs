//! Quiz session state machine.
//!
//! A [`QuizSession`] walks an ordered list of questions, records one
//! [`AnswerRecord`] per submitted answer and reports its progress through
//! three notification channels. Every call runs to completion and handlers
//! are invoked before the call that triggered them returns.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{Answer, Question};

use super::score::calculate_score;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

/// Outcome of one submitted answer. Correctness is decided at submission
/// time and never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub question: Question,
    pub user_answer: Answer,
    pub is_correct: bool,
}

/// Totals reported when the session completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionResult {
    pub total: usize,
    pub correct_count: usize,
    pub score: u32,
}

type QuestionChangeHandler = Box<dyn FnMut(Option<&Question>, usize)>;
type AnswerSubmitHandler = Box<dyn FnMut(&AnswerRecord)>;
type CompleteHandler = Box<dyn FnMut(&CompletionResult)>;

#[derive(Default)]
struct Listeners {
    question_change: Option<QuestionChangeHandler>,
    answer_submit: Option<AnswerSubmitHandler>,
    complete: Option<CompleteHandler>,
}

/// One attempt at a quiz.
///
/// Each channel holds at most one handler; registering again replaces it.
///
/// Submitting twice for the same question before calling [`next`](Self::next)
/// records two answers for that index. Callers are expected to submit once
/// per question.
pub struct QuizSession {
    questions: Arc<[Question]>,
    current_index: usize,
    status: SessionStatus,
    answers: Vec<AnswerRecord>,
    result: Option<CompletionResult>,
    listeners: Listeners,
}

impl QuizSession {
    pub fn new(questions: impl Into<Arc<[Question]>>) -> Self {
        Self {
            questions: questions.into(),
            current_index: 0,
            status: SessionStatus::NotStarted,
            answers: Vec::new(),
            result: None,
            listeners: Listeners::default(),
        }
    }

    /// Called with the new current question (`None` for an empty quiz) and its index.
    pub fn on_question_change<F>(&mut self, handler: F)
    where
        F: FnMut(Option<&Question>, usize) + 'static,
    {
        self.listeners.question_change = Some(Box::new(handler));
    }

    pub fn on_answer_submit<F>(&mut self, handler: F)
    where
        F: FnMut(&AnswerRecord) + 'static,
    {
        self.listeners.answer_submit = Some(Box::new(handler));
    }

    pub fn on_complete<F>(&mut self, handler: F)
    where
        F: FnMut(&CompletionResult) + 'static,
    {
        self.listeners.complete = Some(Box::new(handler));
    }

    /// Begin (or begin again) from the first question.
    pub fn start(&mut self) {
        if self.status != SessionStatus::NotStarted {
            debug!(status = ?self.status, "restarting session");
        }

        self.clear_progress();
        self.status = SessionStatus::InProgress;
        info!(total = self.questions.len(), "quiz started");
        self.emit_question_change();
    }

    /// Record an answer for the current question without moving on.
    ///
    /// Returns `None`, and records nothing, once the session has completed
    /// or when there is no question to answer.
    pub fn submit_answer(&mut self, answer: impl Into<Answer>) -> Option<AnswerRecord> {
        if self.status == SessionStatus::Completed {
            debug!("answer ignored: session already completed");
            return None;
        }
        let question = self.questions.get(self.current_index)?;

        let user_answer = answer.into();
        let record = AnswerRecord {
            question_index: self.current_index,
            question: question.clone(),
            is_correct: question.correct_answer == user_answer,
            user_answer,
        };
        debug!(
            index = record.question_index,
            correct = record.is_correct,
            "answer submitted"
        );

        self.answers.push(record.clone());
        if let Some(handler) = self.listeners.answer_submit.as_mut() {
            handler(&record);
        }

        Some(record)
    }

    /// Move to the next question.
    ///
    /// Returns `true` if there was one. On the last question the session
    /// completes instead and `false` is returned.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        if self.status == SessionStatus::Completed {
            return false;
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            debug!(index = self.current_index, "advanced to next question");
            self.emit_question_change();
            true
        } else {
            self.complete();
            false
        }
    }

    /// Back to the not-started state with no answers. Emits nothing.
    pub fn reset(&mut self) {
        self.clear_progress();
        self.status = SessionStatus::NotStarted;
    }

    /// The question being answered, `None` when the quiz is empty or over.
    pub fn current_question(&self) -> Option<&Question> {
        if self.status == SessionStatus::Completed {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Share of questions already passed, 0 to 100.
    pub fn progress(&self) -> u32 {
        calculate_score(self.current_index, self.questions.len())
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|record| record.is_correct).count()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Handle on the question list, for building a fresh session over it.
    pub fn shared_questions(&self) -> Arc<[Question]> {
        Arc::clone(&self.questions)
    }

    /// Final totals, once completed.
    pub fn result(&self) -> Option<CompletionResult> {
        self.result
    }

    fn clear_progress(&mut self) {
        self.current_index = 0;
        self.answers.clear();
        self.result = None;
    }

    fn complete(&mut self) {
        let total = self.questions.len();
        let correct_count = self.correct_count();
        let result = CompletionResult {
            total,
            correct_count,
            score: calculate_score(correct_count, total),
        };

        self.status = SessionStatus::Completed;
        self.result = Some(result);
        info!(total, correct = correct_count, score = result.score, "quiz completed");

        if let Some(handler) = self.listeners.complete.as_mut() {
            handler(&result);
        }
    }

    fn emit_question_change(&mut self) {
        let index = self.current_index;
        if let Some(handler) = self.listeners.question_change.as_mut() {
            handler(self.questions.get(index), index);
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("total", &self.questions.len())
            .field("current_index", &self.current_index)
            .field("status", &self.status)
            .field("answers", &self.answers.len())
            .finish_non_exhaustive()
    }
}
