/// Percentage of correct answers, rounded to the nearest integer.
///
/// Halves round up (`1/8` is 12.5 and scores 13), which for non-negative
/// inputs is the same as rounding half away from zero. An empty quiz
/// scores 0, and a `correct` larger than `total` is clamped to 100.
pub fn calculate_score(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }

    let correct = correct.min(total) as u64;
    let total = total as u64;
    ((200 * correct + total) / (2 * total)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_total() {
        assert_eq!(calculate_score(0, 0), 0);
        assert_eq!(calculate_score(3, 0), 0);
    }

    #[test]
    fn test_pinned_values() {
        assert_eq!(calculate_score(3, 5), 60);
        assert_eq!(calculate_score(1, 3), 33);
        assert_eq!(calculate_score(2, 3), 67);
        assert_eq!(calculate_score(1, 8), 13);
        assert_eq!(calculate_score(1, 200), 1);
        assert_eq!(calculate_score(1, 201), 0);
        assert_eq!(calculate_score(7, 7), 100);
    }

    #[test]
    fn test_more_correct_than_total_is_clamped() {
        assert_eq!(calculate_score(6, 5), 100);
    }

    proptest! {
        #[test]
        fn score_is_a_percentage(total in 1usize..10_000, ratio in 0.0f64..=1.0) {
            let correct = ((total as f64) * ratio) as usize;
            let score = calculate_score(correct, total);
            prop_assert!(score <= 100);
            prop_assert_eq!(calculate_score(total, total), 100);
            prop_assert_eq!(calculate_score(0, total), 0);
        }

        #[test]
        fn score_matches_float_rounding(total in 1usize..1_000, correct in 0usize..1_000) {
            let correct = correct.min(total);
            let expected = ((correct * 100) as f64 / total as f64).round() as u32;
            prop_assert_eq!(calculate_score(correct, total), expected);
        }

        #[test]
        fn score_is_monotonic_in_correct(total in 1usize..1_000, correct in 0usize..999) {
            let correct = correct.min(total - 1);
            prop_assert!(calculate_score(correct, total) <= calculate_score(correct + 1, total));
        }
    }
}
