//! Operations over a learner's full list of review items

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::*;

/// Create review items for the questions missed in a quiz.
///
/// A question is skipped when an item with the same question text exists, or
/// when one already covers the same concept in the same category. Returns the
/// items that were added.
pub fn add_from_quiz(
    items: &mut Vec<ReviewItem>,
    missed: &[MissedQuestion],
    category: &str,
    now: DateTime<Utc>,
) -> Vec<ReviewItem> {
    let mut created = Vec::new();

    for q in missed {
        let exists = items.iter().any(|item| {
            item.question == q.question || (item.concept == q.concept && item.category == category)
        });
        if exists {
            log::debug!("Review item already exists for '{}', skipping", q.question);
            continue;
        }

        let mut item = ReviewItem::new(
            category.to_string(),
            q.concept.clone(),
            q.question.clone(),
            q.correct_answer.clone(),
            now,
        );
        item.user_answer = q.user_answer.clone();

        items.push(item.clone());
        created.push(item);
    }

    if !created.is_empty() {
        log::info!("Created {} review items for {}", created.len(), category);
    }

    created
}

/// Delete an item. Returns false when no item had that id.
pub fn remove_item(items: &mut Vec<ReviewItem>, id: Uuid) -> bool {
    let len_before = items.len();
    items.retain(|item| item.id != id);
    items.len() != len_before
}

/// Get review statistics for a set of items
pub fn flashcard_stats(items: &[ReviewItem], now: DateTime<Utc>) -> FlashcardStats {
    let mut stats = FlashcardStats {
        total: items.len(),
        ..FlashcardStats::default()
    };

    for item in items {
        let entry = stats.by_category.entry(item.category.clone()).or_default();
        entry.total += 1;

        if item.is_mastered() {
            stats.mastered += 1;
            entry.mastered += 1;
        }
        if item.is_due(now) {
            stats.due += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn missed(concept: &str, question: &str) -> MissedQuestion {
        MissedQuestion {
            concept: concept.to_string(),
            question: question.to_string(),
            correct_answer: "answer".to_string(),
            user_answer: Some("guess".to_string()),
        }
    }

    #[test]
    fn test_add_from_quiz_creates_due_items() {
        let mut items = Vec::new();
        let created = add_from_quiz(
            &mut items,
            &[missed("Deadlocks", "q1"), missed("Paging", "q2")],
            "Operating Systems",
            now(),
        );

        assert_eq!(created.len(), 2);
        assert_eq!(items.len(), 2);
        for item in &items {
            assert_eq!(item.interval_days, 1);
            assert_eq!(item.repetition_count, 0);
            assert_eq!(item.ease_factor, 2.5);
            assert!(item.is_due(now()));
            assert_eq!(item.last_reviewed_at, None);
            assert_eq!(item.user_answer.as_deref(), Some("guess"));
        }
    }

    #[test]
    fn test_add_from_quiz_deduplicates() {
        let mut items = Vec::new();
        add_from_quiz(&mut items, &[missed("Deadlocks", "q1")], "Operating Systems", now());

        // Same question text, different concept
        let created = add_from_quiz(&mut items, &[missed("Other", "q1")], "DBMS", now());
        assert!(created.is_empty());

        // Same concept and category, different question
        let created =
            add_from_quiz(&mut items, &[missed("Deadlocks", "q9")], "Operating Systems", now());
        assert!(created.is_empty());

        // Same concept in another category is a new item
        let created = add_from_quiz(&mut items, &[missed("Deadlocks", "q9")], "DBMS", now());
        assert_eq!(created.len(), 1);

        // Duplicates within one batch collapse too
        let created = add_from_quiz(
            &mut items,
            &[missed("Joins", "q3"), missed("Joins", "q4")],
            "DBMS",
            now(),
        );
        assert_eq!(created.len(), 1);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_remove_item() {
        let mut items = Vec::new();
        let created = add_from_quiz(&mut items, &[missed("Trees", "q1")], "Data Structures", now());

        assert!(!remove_item(&mut items, Uuid::new_v4()));
        assert!(remove_item(&mut items, created[0].id));
        assert!(items.is_empty());
    }

    #[test]
    fn test_flashcard_stats() {
        let mut items = Vec::new();
        add_from_quiz(
            &mut items,
            &[missed("TCP", "q1"), missed("UDP", "q2")],
            "Computer Networks",
            now(),
        );
        add_from_quiz(&mut items, &[missed("Heaps", "q3")], "Data Structures", now());

        items[0].repetition_count = 3;
        items[0].next_review_at = now() + Duration::days(10);

        let stats = flashcard_stats(&items, now());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.due, 2);
        assert_eq!(stats.mastered, 1);
        assert_eq!(
            stats.by_category["Computer Networks"],
            CategoryCardStats { total: 2, mastered: 1 }
        );
        assert_eq!(
            stats.by_category["Data Structures"],
            CategoryCardStats { total: 1, mastered: 0 }
        );
    }
}
