use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flashcards::ReviewItem;
use crate::gamification::ProgressRecord;
use crate::quiz::QuizResult;

use super::file_storage::Result;

/// Storage key for one learner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the key from an email address, keeping only ASCII
    /// alphanumerics so it is safe as a directory name
    pub fn from_email(email: &str) -> Self {
        Self(
            email
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-user persistence the engines are layered over.
///
/// Loads of missing data return the empty default, not an error. Failures
/// are passed through unmodified; nothing is retried.
pub trait LearnerStore {
    fn load_progress(&self, user: &UserId) -> Result<ProgressRecord>;
    fn save_progress(&self, user: &UserId, record: &ProgressRecord) -> Result<()>;

    fn load_review_items(&self, user: &UserId) -> Result<Vec<ReviewItem>>;
    fn save_review_items(&self, user: &UserId, items: &[ReviewItem]) -> Result<()>;

    /// Earlier quiz attempts, oldest first
    fn load_quiz_history(&self, user: &UserId) -> Result<Vec<QuizResult>>;
    fn append_quiz_result(&self, user: &UserId, result: &QuizResult) -> Result<()>;
}
