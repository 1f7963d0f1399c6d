//! Read-modify-write orchestration over a [`LearnerStore`]
//!
//! Each call loads what it needs, runs the pure engines and writes the
//! results back. Callers must not run two mutating calls for the same user
//! at once.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::flashcards::algorithm::{self, SchedulerError};
use crate::flashcards::collection;
use crate::flashcards::{FlashcardStats, MissedQuestion, ReviewItem};
use crate::gamification::{
    self, BadgeStatus, LevelSummary, ProgressError, ProgressRecord, Reward,
};
use crate::quiz::{self, QuizResult, QuizStats};
use crate::storage::{LearnerStore, StorageError, UserId};

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error("Review item not found: {0}")]
    ReviewItemNotFound(Uuid),

    #[error("Quiz attempt already recorded: {0}")]
    DuplicateAttempt(Uuid),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

/// What a quiz submission produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub rewards: Vec<Reward>,
    pub progress: ProgressRecord,
    pub level: LevelSummary,
    pub new_items: Vec<ReviewItem>,
}

/// What grading one review item produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub item: ReviewItem,
    pub rewards: Vec<Reward>,
    pub reviewed_item_count: u32,
}

pub struct Tracker<S> {
    store: S,
}

/// Calendar day of `now` in the local timezone, used for streaks
pub fn local_day(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Local).date_naive()
}

impl<S: LearnerStore> Tracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a completed quiz and create review items for its misses.
    ///
    /// The attempt id is the idempotency key: an id already present in the
    /// user's history is rejected without touching anything. Everything is
    /// loaded and computed before the first write, and the history entry is
    /// written first, so a failed later write can lose the rewards but a
    /// retry can never grant them twice.
    pub fn submit_quiz(
        &self,
        user: &UserId,
        result: QuizResult,
        missed: &[MissedQuestion],
        now: DateTime<Utc>,
    ) -> Result<QuizSubmission> {
        let history = self.store.load_quiz_history(user)?;
        if history.iter().any(|q| q.id == result.id) {
            log::warn!("Ignoring duplicate quiz attempt {} for {}", result.id, user);
            return Err(TrackerError::DuplicateAttempt(result.id));
        }

        let record = self.store.load_progress(user)?;
        let mut items = self.store.load_review_items(user)?;

        let outcome =
            gamification::record_quiz_completion(&record, &result, &history, local_day(now))?;
        let new_items = collection::add_from_quiz(&mut items, missed, &result.category, now);

        self.store.append_quiz_result(user, &result)?;
        self.store.save_progress(user, &outcome.record)?;
        if !new_items.is_empty() {
            self.store.save_review_items(user, &items)?;
        }

        log::info!(
            "Recorded quiz {} for {}: {} rewards, {} new review items",
            result.id,
            user,
            outcome.rewards.len(),
            new_items.len()
        );

        Ok(QuizSubmission {
            level: gamification::level_summary(outcome.record.xp),
            rewards: outcome.rewards,
            progress: outcome.record,
            new_items,
        })
    }

    /// Grade one review item and count the review towards progress.
    ///
    /// An invalid rating fails before anything is written. If the progress
    /// write fails after the item was rescheduled, the previous item list is
    /// written back so the review can be retried as a whole.
    pub fn review_item(
        &self,
        user: &UserId,
        item_id: Uuid,
        quality: i32,
        now: DateTime<Utc>,
    ) -> Result<ReviewSubmission> {
        let mut items = self.store.load_review_items(user)?;
        let pos = items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(TrackerError::ReviewItemNotFound(item_id))?;

        let graded = algorithm::grade(&items[pos], quality, now)?;
        let record = self.store.load_progress(user)?;
        let outcome = gamification::record_flashcard_review(&record);

        let previous = std::mem::replace(&mut items[pos], graded.clone());
        self.store.save_review_items(user, &items)?;

        if let Err(e) = self.store.save_progress(user, &outcome.record) {
            items[pos] = previous;
            if let Err(restore) = self.store.save_review_items(user, &items) {
                log::error!(
                    "Failed to restore review item {} for {}: {}",
                    item_id,
                    user,
                    restore
                );
            }
            return Err(e.into());
        }

        Ok(ReviewSubmission {
            item: graded,
            rewards: outcome.rewards,
            reviewed_item_count: outcome.record.reviewed_item_count,
        })
    }

    pub fn due_items(&self, user: &UserId, now: DateTime<Utc>) -> Result<Vec<ReviewItem>> {
        let items = self.store.load_review_items(user)?;
        Ok(algorithm::due_items(&items, now).into_iter().cloned().collect())
    }

    pub fn review_items(&self, user: &UserId) -> Result<Vec<ReviewItem>> {
        Ok(self.store.load_review_items(user)?)
    }

    pub fn delete_item(&self, user: &UserId, item_id: Uuid) -> Result<()> {
        let mut items = self.store.load_review_items(user)?;
        if !collection::remove_item(&mut items, item_id) {
            return Err(TrackerError::ReviewItemNotFound(item_id));
        }
        self.store.save_review_items(user, &items)?;
        log::info!("Deleted review item {} for {}", item_id, user);
        Ok(())
    }

    pub fn progress(&self, user: &UserId) -> Result<ProgressRecord> {
        Ok(self.store.load_progress(user)?)
    }

    pub fn level_summary(&self, user: &UserId) -> Result<LevelSummary> {
        let record = self.store.load_progress(user)?;
        Ok(gamification::level_summary(record.xp))
    }

    pub fn badges(&self, user: &UserId) -> Result<Vec<BadgeStatus>> {
        let record = self.store.load_progress(user)?;
        Ok(gamification::badge_statuses(&record))
    }

    pub fn flashcard_stats(&self, user: &UserId, now: DateTime<Utc>) -> Result<FlashcardStats> {
        let items = self.store.load_review_items(user)?;
        Ok(collection::flashcard_stats(&items, now))
    }

    pub fn quiz_stats(&self, user: &UserId) -> Result<QuizStats> {
        let history = self.store.load_quiz_history(user)?;
        Ok(quiz::quiz_stats(&history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::BadgeId;
    use crate::storage::FileStore;
    use chrono::Duration;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn create_test_tracker() -> (Tracker<FileStore>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let tracker = Tracker::new(FileStore::new(temp_dir.path().to_path_buf()));
        (tracker, temp_dir)
    }

    fn missed(concept: &str, question: &str) -> MissedQuestion {
        MissedQuestion {
            concept: concept.to_string(),
            question: question.to_string(),
            correct_answer: "right".to_string(),
            user_answer: None,
        }
    }

    #[test]
    fn test_submit_quiz_persists_everything() {
        let (tracker, _temp) = create_test_tracker();
        let user = UserId::from_email("learner@example.com");
        let now = Utc::now();

        let result = QuizResult::new("Operating Systems".to_string(), 60, now)
            .with_gaps(["Deadlocks", "Paging"]);
        let submission = tracker
            .submit_quiz(
                &user,
                result,
                &[missed("Deadlocks", "q1"), missed("Paging", "q2")],
                now,
            )
            .unwrap();

        // 25 + 30 base, 50 for the first quiz
        assert_eq!(submission.progress.xp, 105);
        assert_eq!(submission.level.level, 2);
        assert_eq!(submission.new_items.len(), 2);

        assert_eq!(tracker.progress(&user).unwrap(), submission.progress);
        assert_eq!(tracker.quiz_stats(&user).unwrap().total_quizzes, 1);
        assert_eq!(tracker.due_items(&user, now).unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_attempt_rejected() {
        let (tracker, _temp) = create_test_tracker();
        let user = UserId::new("dup");
        let now = Utc::now();
        let result = QuizResult::new("DBMS".to_string(), 100, now);

        tracker
            .submit_quiz(&user, result.clone(), &[missed("Joins", "q1")], now)
            .unwrap();
        let before = tracker.progress(&user).unwrap();

        let err = tracker
            .submit_quiz(&user, result.clone(), &[missed("Keys", "q2")], now)
            .unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateAttempt(id) if id == result.id));

        assert_eq!(tracker.progress(&user).unwrap(), before);
        assert_eq!(tracker.quiz_stats(&user).unwrap().total_quizzes, 1);
        assert_eq!(tracker.review_items(&user).unwrap().len(), 1);
    }

    #[test]
    fn test_review_item_grades_and_counts() {
        let (tracker, _temp) = create_test_tracker();
        let user = UserId::new("reviewer");
        let now = Utc::now();
        let submission = tracker
            .submit_quiz(
                &user,
                QuizResult::new("DBMS".to_string(), 0, now),
                &[missed("Joins", "q1")],
                now,
            )
            .unwrap();
        let id = submission.new_items[0].id;

        let review = tracker.review_item(&user, id, 4, now).unwrap();
        assert_eq!(review.item.repetition_count, 1);
        assert_eq!(review.item.next_review_at, now + Duration::days(1));
        assert_eq!(review.reviewed_item_count, 1);

        let stored = tracker.review_items(&user).unwrap();
        assert_eq!(stored[0], review.item);
        assert!(tracker.due_items(&user, now).unwrap().is_empty());
        assert_eq!(tracker.progress(&user).unwrap().reviewed_item_count, 1);
    }

    #[test]
    fn test_invalid_quality_persists_nothing() {
        let (tracker, _temp) = create_test_tracker();
        let user = UserId::new("strict");
        let now = Utc::now();
        let submission = tracker
            .submit_quiz(
                &user,
                QuizResult::new("DBMS".to_string(), 0, now),
                &[missed("Joins", "q1")],
                now,
            )
            .unwrap();
        let id = submission.new_items[0].id;
        let items_before = tracker.review_items(&user).unwrap();
        let progress_before = tracker.progress(&user).unwrap();

        let err = tracker.review_item(&user, id, 7, now).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Scheduler(SchedulerError::InvalidQuality(7))
        ));
        assert_eq!(tracker.review_items(&user).unwrap(), items_before);
        assert_eq!(tracker.progress(&user).unwrap(), progress_before);
    }

    #[test]
    fn test_missing_item() {
        let (tracker, _temp) = create_test_tracker();
        let user = UserId::new("empty");
        let id = Uuid::new_v4();

        assert!(matches!(
            tracker.review_item(&user, id, 3, Utc::now()),
            Err(TrackerError::ReviewItemNotFound(_))
        ));
        assert!(matches!(
            tracker.delete_item(&user, id),
            Err(TrackerError::ReviewItemNotFound(_))
        ));
    }

    #[test]
    fn test_delete_item() {
        let (tracker, _temp) = create_test_tracker();
        let user = UserId::new("tidy");
        let now = Utc::now();
        let submission = tracker
            .submit_quiz(
                &user,
                QuizResult::new("Data Structures".to_string(), 50, now),
                &[missed("Heaps", "q1"), missed("Tries", "q2")],
                now,
            )
            .unwrap();

        tracker.delete_item(&user, submission.new_items[0].id).unwrap();
        let remaining = tracker.review_items(&user).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].concept, "Tries");
        assert_eq!(tracker.flashcard_stats(&user, now).unwrap().total, 1);
    }

    #[test]
    fn test_badges_and_level_views() {
        let (tracker, _temp) = create_test_tracker();
        let user = UserId::new("viewer");
        let now = Utc::now();
        tracker
            .submit_quiz(&user, QuizResult::new("DBMS".to_string(), 100, now), &[], now)
            .unwrap();

        let unlocked: Vec<_> = tracker
            .badges(&user)
            .unwrap()
            .into_iter()
            .filter(|b| b.unlocked)
            .map(|b| b.id)
            .collect();
        assert_eq!(unlocked, vec![BadgeId::FirstQuiz, BadgeId::PerfectScore]);

        let level = tracker.level_summary(&user).unwrap();
        assert_eq!(level.xp, 225);
        assert_eq!(level.level, 2);
    }

    /// File store whose writes can be made to fail a set number of times
    struct FailingStore {
        inner: FileStore,
        append_failures: Cell<u32>,
        progress_failures: Cell<u32>,
    }

    impl FailingStore {
        fn new(temp: &TempDir) -> Self {
            Self {
                inner: FileStore::new(temp.path().to_path_buf()),
                append_failures: Cell::new(0),
                progress_failures: Cell::new(0),
            }
        }

        fn take_failure(counter: &Cell<u32>) -> crate::storage::Result<()> {
            if counter.get() == 0 {
                return Ok(());
            }
            counter.set(counter.get() - 1);
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }
    }

    impl LearnerStore for FailingStore {
        fn load_progress(&self, user: &UserId) -> crate::storage::Result<ProgressRecord> {
            self.inner.load_progress(user)
        }

        fn save_progress(&self, user: &UserId, record: &ProgressRecord) -> crate::storage::Result<()> {
            Self::take_failure(&self.progress_failures)?;
            self.inner.save_progress(user, record)
        }

        fn load_review_items(&self, user: &UserId) -> crate::storage::Result<Vec<ReviewItem>> {
            self.inner.load_review_items(user)
        }

        fn save_review_items(&self, user: &UserId, items: &[ReviewItem]) -> crate::storage::Result<()> {
            self.inner.save_review_items(user, items)
        }

        fn load_quiz_history(&self, user: &UserId) -> crate::storage::Result<Vec<QuizResult>> {
            self.inner.load_quiz_history(user)
        }

        fn append_quiz_result(&self, user: &UserId, result: &QuizResult) -> crate::storage::Result<()> {
            Self::take_failure(&self.append_failures)?;
            self.inner.append_quiz_result(user, result)
        }
    }

    #[test]
    fn test_failed_history_write_persists_nothing() {
        let temp = TempDir::new().unwrap();
        let store = FailingStore::new(&temp);
        store.append_failures.set(1);
        let tracker = Tracker::new(store);
        let user = UserId::new("flaky");
        let now = Utc::now();
        let result = QuizResult::new("DBMS".to_string(), 100, now);

        let err = tracker
            .submit_quiz(&user, result.clone(), &[missed("Joins", "q1")], now)
            .unwrap_err();
        assert!(matches!(err, TrackerError::Storage(StorageError::Io(_))));
        assert_eq!(tracker.progress(&user).unwrap(), ProgressRecord::default());
        assert!(tracker.review_items(&user).unwrap().is_empty());

        let retry = tracker
            .submit_quiz(&user, result.clone(), &[missed("Joins", "q1")], now)
            .unwrap();
        assert_eq!(retry.progress.xp, 225);
        assert_eq!(tracker.progress(&user).unwrap().xp, 225);
        assert_eq!(tracker.quiz_stats(&user).unwrap().total_quizzes, 1);
    }

    #[test]
    fn test_retry_after_failed_progress_write_never_double_awards() {
        let temp = TempDir::new().unwrap();
        let store = FailingStore::new(&temp);
        store.progress_failures.set(1);
        let tracker = Tracker::new(store);
        let user = UserId::new("flaky");
        let now = Utc::now();
        let result = QuizResult::new("DBMS".to_string(), 100, now);

        assert!(tracker.submit_quiz(&user, result.clone(), &[], now).is_err());

        let err = tracker.submit_quiz(&user, result.clone(), &[], now).unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateAttempt(id) if id == result.id));
        assert_eq!(tracker.progress(&user).unwrap().xp, 0);
        assert_eq!(tracker.quiz_stats(&user).unwrap().total_quizzes, 1);
    }

    #[test]
    fn test_failed_progress_write_restores_review_item() {
        let temp = TempDir::new().unwrap();
        let tracker = Tracker::new(FailingStore::new(&temp));
        let user = UserId::new("flaky");
        let now = Utc::now();
        let submission = tracker
            .submit_quiz(
                &user,
                QuizResult::new("DBMS".to_string(), 0, now),
                &[missed("Joins", "q1")],
                now,
            )
            .unwrap();
        let id = submission.new_items[0].id;
        let items_before = tracker.review_items(&user).unwrap();
        let progress_before = tracker.progress(&user).unwrap();

        tracker.store.progress_failures.set(1);
        let err = tracker.review_item(&user, id, 4, now).unwrap_err();
        assert!(matches!(err, TrackerError::Storage(StorageError::Io(_))));
        assert_eq!(tracker.review_items(&user).unwrap(), items_before);
        assert_eq!(tracker.progress(&user).unwrap(), progress_before);

        let review = tracker.review_item(&user, id, 4, now).unwrap();
        assert_eq!(review.reviewed_item_count, 1);
        assert_eq!(tracker.review_items(&user).unwrap()[0], review.item);
    }
}
