use super::models::{CategoryQuizStats, QuizResult, QuizStats};

/// Calculate statistics over a quiz history
pub fn quiz_stats(history: &[QuizResult]) -> QuizStats {
    if history.is_empty() {
        return QuizStats::default();
    }

    let total_quizzes = history.len();
    let score_sum: u64 = history.iter().map(|q| u64::from(q.score_percentage)).sum();
    let total_time_secs = history
        .iter()
        .filter_map(|q| q.time_spent_secs)
        .map(u64::from)
        .sum();
    let best_score = history.iter().map(|q| q.score_percentage).max();

    let mut sums = std::collections::BTreeMap::<String, u64>::new();
    let mut stats = QuizStats {
        total_quizzes,
        avg_score: Some(rounded_mean(score_sum, total_quizzes)),
        total_time_secs,
        best_score,
        by_category: Default::default(),
    };

    for quiz in history {
        let entry: &mut CategoryQuizStats =
            stats.by_category.entry(quiz.category.clone()).or_default();
        entry.attempts += 1;
        entry.best_score = entry.best_score.max(quiz.score_percentage);
        entry.gaps.extend(quiz.concept_gaps.iter().cloned());
        *sums.entry(quiz.category.clone()).or_default() += u64::from(quiz.score_percentage);
    }

    for (category, entry) in stats.by_category.iter_mut() {
        let sum = sums.get(category).copied().unwrap_or_default();
        entry.avg_score = rounded_mean(sum, entry.attempts);
    }

    stats
}

/// Mean of 0-100 scores, rounded half up
fn rounded_mean(sum: u64, count: usize) -> u8 {
    let count = count as u64;
    ((sum * 2 + count) / (count * 2)).min(100) as u8
}
