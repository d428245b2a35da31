use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use quiz_runner::{config, DataLoader, GradingPolicy, Quiz, QuizError, QuizType};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long, conflicts_with = "quiz_type")]
    questions: Option<PathBuf>,

    /// Bundled quiz to run from the data directory (multiple-choice, ox)
    #[arg(short = 't', long, default_value = "multiple-choice")]
    quiz_type: String,

    /// Directory holding the bundled quiz files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// JSON grading table overriding the default S/A/B/C/D grades
    #[arg(short, long)]
    grades: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the quiz)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Maximum log level
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn init_logging(args: &Args) -> Result<(), QuizError> {
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_max_level(args.log_level)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

fn build_quiz(args: &Args) -> Result<Quiz, QuizError> {
    let policy = match &args.grades {
        Some(path) => config::load_grading_policy(path)?,
        None => GradingPolicy::default(),
    };

    let (set, quiz_type) = match &args.questions {
        Some(path) => {
            // `ox-quiz.json` and `haircare-ox.json` both name O/X sets.
            let stem = path.file_stem().and_then(|stem| stem.to_str()).unwrap_or_default();
            let quiz_type = QuizType::from_type_name(stem.trim_end_matches("-quiz"));
            (quiz_runner::load_question_set(path)?, quiz_type)
        }
        None => {
            let quiz_type: QuizType = args.quiz_type.parse()?;
            let mut loader = DataLoader::new(&args.data_dir);
            (loader.load_quiz(quiz_type)?, quiz_type)
        }
    };

    Ok(Quiz::from_set(set, policy).with_type_label(quiz_type.label()))
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(&args) {
        eprintln!("Error setting up logging: {}", e);
        std::process::exit(1);
    }

    let result = build_quiz(&args).and_then(Quiz::run);
    if let Err(e) = result {
        tracing::error!(error = %e, "quiz failed");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
