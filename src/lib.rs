//! # quiz-runner
//!
//! A terminal quiz runner: multiple-choice and O/X question sets loaded
//! from JSON, scored and graded when the last question is answered.
//!
//! The [`engine`] module holds the session state machine and the scoring
//! pipeline and can be driven without the terminal front end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_runner::{Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Load questions from a JSON file
//!     let quiz = Quiz::from_json("data/multiple-choice.json")?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
pub mod config;
mod data;
pub mod engine;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tracing::info;

pub use app::{App, SessionEvent, StepMark};
pub use config::ConfigError;
pub use data::{
    is_binary_type_name, load_question_set, load_questions_from_json, DataLoader, LoadError,
    QuestionSet, QuizType,
};
pub use engine::{GradingPolicy, QuizSession, ResultSummary};
pub use models::{Answer, AppState, Mark, Question, QuestionError, QuestionKind};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a vector of questions, graded with the default table.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            app: App::with_questions(questions),
        }
    }

    /// Create a quiz from a loaded question set, using its title if it has one.
    pub fn from_set(set: QuestionSet, policy: GradingPolicy) -> Self {
        let app = App::new(set.questions, policy);
        let app = match set.title {
            Some(title) => app.with_title(title),
            None => app,
        };
        Self { app }
    }

    /// Load a quiz from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_runner::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let set = load_question_set(path)?;
        Ok(Self::from_set(set, GradingPolicy::default()))
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.app = self.app.with_title(title);
        self
    }

    /// Label naming the kind of quiz on the welcome screen.
    pub fn with_type_label(mut self, label: &'static str) -> Self {
        self.app = self.app.with_type_label(label);
        self
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::TerminalGuard::enter()?;
        info!(questions = self.app.total_questions(), "running quiz");
        run_event_loop(&mut term, &mut self.app)
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    let is_binary = app
        .current_question()
        .is_some_and(|question| question.kind() == QuestionKind::Binary);

    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Char('o') | KeyCode::Char('O') if is_binary => app.select_option(0),
        KeyCode::Char('x') | KeyCode::Char('X') if is_binary => app.select_option(1),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.select_option(digit as usize - 1);
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            app.go_home();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
