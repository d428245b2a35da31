mod loader;

pub use loader::{
    is_binary_type_name, load_question_set, load_questions_from_json, DataLoader, LoadError,
    QuestionSet, QuizType,
};
