use super::grade::{GradeDescriptor, GradingPolicy};
use super::session::{AnswerRecord, CompletionResult};

/// Everything the results screen shows, built once when a quiz ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub total_questions: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub score: u32,
    pub grade: String,
    pub grade_label: String,
    pub grade_color: String,
    pub answers: Vec<AnswerRecord>,
}

impl ResultSummary {
    /// Resolves the grade for `result` and builds the summary from it.
    pub fn from_completion(
        result: &CompletionResult,
        policy: &GradingPolicy,
        answers: &[AnswerRecord],
    ) -> Self {
        build_summary(
            result.total,
            result.correct_count,
            result.score,
            policy.resolve(result.score),
            answers.to_vec(),
        )
    }

    /// Score formatted for display, e.g. `60%`.
    pub fn percentage(&self) -> String {
        format!("{}%", self.score)
    }

    /// Wrong answers in the order they were given.
    pub fn mistakes(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.answers.iter().filter(|record| !record.is_correct)
    }
}

/// Assembles a summary from values computed elsewhere. Nothing is
/// re-scored or re-graded here.
pub fn build_summary(
    total: usize,
    correct_count: usize,
    score: u32,
    grade: &GradeDescriptor,
    answers: Vec<AnswerRecord>,
) -> ResultSummary {
    ResultSummary {
        total_questions: total,
        correct_count,
        incorrect_count: total.saturating_sub(correct_count),
        score,
        grade: grade.tier.clone(),
        grade_label: grade.label.clone(),
        grade_color: grade.color.clone(),
        answers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, Mark, Question};

    fn record(index: usize, is_correct: bool) -> AnswerRecord {
        AnswerRecord {
            question_index: index,
            question: Question::binary(&format!("Q{}", index + 1), Mark::O),
            user_answer: Answer::Mark(if is_correct { Mark::O } else { Mark::X }),
            is_correct,
        }
    }

    #[test]
    fn test_build_summary_copies_inputs() {
        let grade = GradeDescriptor::new(50, "B", "Good job!", "#2196F3");
        let answers = vec![record(0, true), record(1, false), record(2, true)];

        let summary = build_summary(3, 2, 67, &grade, answers.clone());

        assert_eq!(summary.total_questions, 3);
        assert_eq!(summary.correct_count, 2);
        assert_eq!(summary.incorrect_count, 1);
        assert_eq!(summary.score, 67);
        assert_eq!(summary.grade, "B");
        assert_eq!(summary.grade_label, "Good job!");
        assert_eq!(summary.grade_color, "#2196F3");
        assert_eq!(summary.answers, answers);
        assert_eq!(summary.percentage(), "67%");
    }

    #[test]
    fn test_build_summary_does_not_regrade() {
        // The grade passed in wins even if it disagrees with the score.
        let grade = GradeDescriptor::new(90, "S", "Perfect!", "#FFD700");
        let summary = build_summary(4, 0, 0, &grade, Vec::new());
        assert_eq!(summary.grade, "S");
        assert_eq!(summary.incorrect_count, 4);
    }

    #[test]
    fn test_mistakes_keep_order() {
        let grade = GradeDescriptor::new(0, "D", "Try again!", "#F44336");
        let answers = vec![record(0, false), record(1, true), record(2, false)];
        let summary = build_summary(3, 1, 33, &grade, answers);

        let indices: Vec<_> = summary.mistakes().map(|r| r.question_index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_from_completion() {
        let result = CompletionResult {
            total: 5,
            correct_count: 3,
            score: 60,
        };
        let answers = vec![record(0, true)];
        let summary = ResultSummary::from_completion(&result, &GradingPolicy::default(), &answers);

        assert_eq!(summary.grade, "B");
        assert_eq!(summary.incorrect_count, 2);
        assert_eq!(summary.answers.len(), 1);
    }
}
