use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};

use tracing::debug;

use crate::engine::{AnswerRecord, CompletionResult, GradingPolicy, QuizSession, ResultSummary};
use crate::models::{AppState, Question};

const DEFAULT_TITLE: &str = "QUIZ";

/// Notifications forwarded from the session to the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    QuestionChanged { index: usize },
    AnswerSubmitted(AnswerRecord),
    Completed(CompletionResult),
}

/// Per-question marker shown in the progress strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMark {
    Pending,
    Correct,
    Incorrect,
}

/// Front-end state around a [`QuizSession`].
///
/// The session reports through its handlers into a channel which is
/// drained after every call, so screen state only changes in response to
/// session notifications.
pub struct App {
    pub state: AppState,
    title: String,
    type_label: Option<&'static str>,
    policy: GradingPolicy,
    session: QuizSession,
    events: Receiver<SessionEvent>,
    selected_option: Option<usize>,
    feedback: Option<AnswerRecord>,
    notice: Option<&'static str>,
    steps: Vec<StepMark>,
    summary: Option<ResultSummary>,
    result_scroll: usize,
}

impl App {
    pub fn new(questions: Vec<Question>, policy: GradingPolicy) -> Self {
        let (session, events) = wire_session(questions.into());
        let num_questions = session.total_questions();

        Self {
            state: AppState::Welcome,
            title: DEFAULT_TITLE.to_string(),
            type_label: None,
            policy,
            session,
            events,
            selected_option: None,
            feedback: None,
            notice: None,
            steps: vec![StepMark::Pending; num_questions],
            summary: None,
            result_scroll: 0,
        }
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self::new(questions, GradingPolicy::default())
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Quiz flavour shown under the title, e.g. `O/X`.
    pub fn with_type_label(mut self, label: &'static str) -> Self {
        self.type_label = Some(label);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn type_label(&self) -> Option<&'static str> {
        self.type_label
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    pub fn current_question_number(&self) -> usize {
        self.session.current_index() + 1
    }

    pub fn total_questions(&self) -> usize {
        self.session.total_questions()
    }

    pub fn is_last_question(&self) -> bool {
        self.session.is_last_question()
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    /// The record for the current question once it has been answered.
    pub fn feedback(&self) -> Option<&AnswerRecord> {
        self.feedback.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    pub fn steps(&self) -> &[StepMark] {
        &self.steps
    }

    pub fn summary(&self) -> Option<&ResultSummary> {
        self.summary.as_ref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn start_quiz(&mut self) {
        self.state = AppState::Quiz;
        self.session.start();
        self.drain_events();
    }

    pub fn select_next_option(&mut self) {
        let Some(count) = self.selectable_count() else {
            return;
        };
        self.selected_option = Some(match self.selected_option {
            Some(index) => (index + 1) % count,
            None => 0,
        });
        self.notice = None;
    }

    pub fn select_previous_option(&mut self) {
        let Some(count) = self.selectable_count() else {
            return;
        };
        self.selected_option = Some(match self.selected_option {
            Some(index) => (index + count - 1) % count,
            None => count - 1,
        });
        self.notice = None;
    }

    /// Pick a slot directly (number keys, O/X keys). Out-of-range slots are ignored.
    pub fn select_option(&mut self, index: usize) {
        if self.selectable_count().is_some_and(|count| index < count) {
            self.selected_option = Some(index);
            self.notice = None;
        }
    }

    /// First press submits the selected answer, second press moves on.
    pub fn confirm(&mut self) {
        if self.state != AppState::Quiz {
            return;
        }

        if self.feedback.is_some() || self.session.current_question().is_none() {
            self.session.next();
            self.drain_events();
            return;
        }

        let answer = self
            .selected_option
            .and_then(|index| self.session.current_question()?.option_answer(index));

        match answer {
            Some(answer) => {
                self.session.submit_answer(answer);
                self.drain_events();
            }
            None => self.notice = Some("Select an answer first."),
        }
    }

    pub fn scroll_results_down(&mut self) {
        let lines = self.summary.as_ref().map_or(0, |s| s.mistakes().count());
        self.result_scroll = (self.result_scroll + 1).min(lines.saturating_sub(1));
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Throw the finished session away and start a fresh one over the same questions.
    pub fn restart(&mut self) {
        self.rewire();
        debug!("quiz restarted");
        self.start_quiz();
    }

    /// Back to the welcome screen with a fresh, not yet started session.
    pub fn go_home(&mut self) {
        self.rewire();
        self.state = AppState::Welcome;
        debug!("returned to welcome screen");
    }

    fn rewire(&mut self) {
        let (session, events) = wire_session(self.session.shared_questions());
        self.session = session;
        self.events = events;
        self.selected_option = None;
        self.feedback = None;
        self.notice = None;
        self.steps = vec![StepMark::Pending; self.session.total_questions()];
        self.summary = None;
        self.result_scroll = 0;
    }

    fn selectable_count(&self) -> Option<usize> {
        if self.feedback.is_some() {
            return None;
        }
        self.session
            .current_question()
            .map(Question::answer_count)
            .filter(|count| *count > 0)
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::QuestionChanged { index } => {
                debug!(index, "showing question");
                self.selected_option = None;
                self.feedback = None;
                self.notice = None;
            }
            SessionEvent::AnswerSubmitted(record) => {
                if let Some(step) = self.steps.get_mut(record.question_index) {
                    *step = if record.is_correct {
                        StepMark::Correct
                    } else {
                        StepMark::Incorrect
                    };
                }
                self.feedback = Some(record);
            }
            SessionEvent::Completed(result) => {
                self.summary = Some(ResultSummary::from_completion(
                    &result,
                    &self.policy,
                    self.session.answers(),
                ));
                self.feedback = None;
                self.result_scroll = 0;
                self.state = AppState::Result;
            }
        }
    }
}

fn wire_session(questions: Arc<[Question]>) -> (QuizSession, Receiver<SessionEvent>) {
    let (tx, rx) = mpsc::channel();
    let mut session = QuizSession::new(questions);

    let sender = tx.clone();
    session.on_question_change(move |_, index| {
        let _ = sender.send(SessionEvent::QuestionChanged { index });
    });
    let sender = tx.clone();
    session.on_answer_submit(move |record| {
        let _ = sender.send(SessionEvent::AnswerSubmitted(record.clone()));
    });
    session.on_complete(move |result| {
        let _ = tx.send(SessionEvent::Completed(*result));
    });

    (session, rx)
}
