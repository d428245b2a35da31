use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Question;

const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown quiz type: {0}")]
    UnknownQuizType(String),
}

/// A question file: `{ "title"?: ..., "questions": [...] }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionSet {
    #[serde(default)]
    pub title: Option<String>,
    pub questions: Vec<Question>,
}

/// The bundled quiz flavours and the files they live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizType {
    MultipleChoice,
    Ox,
}

impl QuizType {
    pub fn file_name(self) -> &'static str {
        match self {
            QuizType::MultipleChoice => "multiple-choice.json",
            QuizType::Ox => "ox-quiz.json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QuizType::MultipleChoice => "Multiple choice",
            QuizType::Ox => "O/X",
        }
    }

    /// Quiz type implied by a free-form type name such as `haircare-ox`.
    pub fn from_type_name(name: &str) -> Self {
        if is_binary_type_name(name) {
            QuizType::Ox
        } else {
            QuizType::MultipleChoice
        }
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizType::MultipleChoice => f.write_str("multiple-choice"),
            QuizType::Ox => f.write_str("ox"),
        }
    }
}

impl FromStr for QuizType {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple-choice" => Ok(QuizType::MultipleChoice),
            "ox" => Ok(QuizType::Ox),
            other => Err(LoadError::UnknownQuizType(other.to_string())),
        }
    }
}

/// True for type names that denote an O/X quiz (`ox`, `*-ox`).
pub fn is_binary_type_name(name: &str) -> bool {
    name == "ox" || name.ends_with("-ox")
}

pub fn load_question_set<P: AsRef<Path>>(path: P) -> Result<QuestionSet, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let set: QuestionSet = serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), questions = set.questions.len(), "loaded question set");
    Ok(set)
}

pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    load_question_set(path).map(|set| set.questions)
}

/// Loads question sets relative to a base directory and keeps parsed sets
/// around so repeated loads of the same file skip the disk.
#[derive(Debug)]
pub struct DataLoader {
    base_path: PathBuf,
    cache: HashMap<PathBuf, QuestionSet>,
}

impl DataLoader {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
            cache: HashMap::new(),
        }
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    pub fn load(&mut self, name: &str) -> Result<QuestionSet, LoadError> {
        let path = self.resolve(name);

        if let Some(set) = self.cache.get(&path) {
            debug!(path = %path.display(), "question set served from cache");
            return Ok(set.clone());
        }

        let set = load_question_set(&path)?;
        self.cache.insert(path, set.clone());
        Ok(set)
    }

    pub fn load_quiz(&mut self, quiz_type: QuizType) -> Result<QuestionSet, LoadError> {
        self.load(quiz_type.file_name())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, Mark};

    const OX_SET: &str = r#"{
        "title": "Rust basics",
        "questions": [
            { "question": "Rust has a garbage collector.", "correctAnswer": "X" },
            { "question": "Variables are immutable by default.", "correctAnswer": "O", "explanation": "Use mut." }
        ]
    }"#;

    fn write_set(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_questions_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_set(dir.path(), "ox-quiz.json", OX_SET);

        let questions = load_questions_from_json(&path).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].correct_answer, Answer::Mark(Mark::O));
    }

    #[test]
    fn test_empty_set_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_set(dir.path(), "empty.json", r#"{ "questions": [] }"#);

        let set = load_question_set(&path).unwrap();
        assert!(set.questions.is_empty());
        assert!(set.title.is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = load_questions_from_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_set(dir.path(), "broken.json", r#"{ "questions": [ { "question": 1 } ] }"#);

        let err = load_questions_from_json(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_loader_caches_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_set(dir.path(), "ox-quiz.json", OX_SET);
        let mut loader = DataLoader::new(dir.path());

        let first = loader.load_quiz(QuizType::Ox).unwrap();

        // Served from the cache even after the file is gone.
        fs::remove_file(&path).unwrap();
        let second = loader.load("ox-quiz.json").unwrap();
        assert_eq!(first, second);

        loader.clear_cache();
        assert!(loader.load("ox-quiz.json").is_err());
    }

    #[test]
    fn test_absolute_names_bypass_base_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_set(dir.path(), "custom.json", OX_SET);
        let loader = DataLoader::new("/somewhere/else");

        assert_eq!(loader.resolve(path.to_str().unwrap()), path);
        assert_eq!(loader.resolve("a.json"), PathBuf::from("/somewhere/else/a.json"));
    }

    #[test]
    fn test_quiz_type_names() {
        assert_eq!("ox".parse::<QuizType>().unwrap(), QuizType::Ox);
        assert_eq!(
            "multiple-choice".parse::<QuizType>().unwrap(),
            QuizType::MultipleChoice
        );
        assert!(matches!(
            "trivia".parse::<QuizType>(),
            Err(LoadError::UnknownQuizType(name)) if name == "trivia"
        ));
        assert_eq!(QuizType::Ox.to_string(), "ox");
        assert_eq!(QuizType::Ox.label(), "O/X");
    }

    #[test]
    fn test_binary_type_names() {
        assert!(is_binary_type_name("ox"));
        assert!(is_binary_type_name("haircare-ox"));
        assert!(!is_binary_type_name("haircare"));
        assert!(!is_binary_type_name("oxford"));
    }

    #[test]
    fn test_quiz_type_from_type_name() {
        assert_eq!(QuizType::from_type_name("ox"), QuizType::Ox);
        assert_eq!(QuizType::from_type_name("event-ox"), QuizType::Ox);
        assert_eq!(QuizType::from_type_name("cosmetic"), QuizType::MultipleChoice);
        assert_eq!(QuizType::from_type_name("ox-quiz"), QuizType::MultipleChoice);
    }
}
