//! JSON file storage for learner data
//!
//! Directory structure:
//! ```text
//! {data-dir}/users/{user-id}/
//! ├── progress.json       # ProgressRecord
//! ├── review_items.json   # Array of review items, creation order
//! └── quiz_history.json   # Array of quiz results, oldest first
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::flashcards::ReviewItem;
use crate::gamification::ProgressRecord;
use crate::quiz::QuizResult;

use super::store::{LearnerStore, UserId};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("learnx"))
            .ok_or(StorageError::DataDirNotFound)
    }

    fn user_dir(&self, user: &UserId) -> PathBuf {
        self.base_path.join("users").join(user.as_str())
    }

    fn progress_path(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("progress.json")
    }

    fn review_items_path(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("review_items.json")
    }

    fn quiz_history_path(&self, user: &UserId) -> PathBuf {
        self.user_dir(user).join("quiz_history.json")
    }

    fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
        if !path.exists() {
            return Ok(T::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_json<T: Serialize + ?Sized>(&self, user: &UserId, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(self.user_dir(user))?;
        fs::write(path, serde_json::to_string_pretty(value)?)?;
        log::debug!("Wrote {:?}", path);
        Ok(())
    }
}

impl LearnerStore for FileStore {
    fn load_progress(&self, user: &UserId) -> Result<ProgressRecord> {
        Self::read_or_default(&self.progress_path(user))
    }

    fn save_progress(&self, user: &UserId, record: &ProgressRecord) -> Result<()> {
        self.write_json(user, &self.progress_path(user), record)
    }

    fn load_review_items(&self, user: &UserId) -> Result<Vec<ReviewItem>> {
        Self::read_or_default(&self.review_items_path(user))
    }

    fn save_review_items(&self, user: &UserId, items: &[ReviewItem]) -> Result<()> {
        self.write_json(user, &self.review_items_path(user), items)
    }

    fn load_quiz_history(&self, user: &UserId) -> Result<Vec<QuizResult>> {
        Self::read_or_default(&self.quiz_history_path(user))
    }

    fn append_quiz_result(&self, user: &UserId, result: &QuizResult) -> Result<()> {
        let mut history = self.load_quiz_history(user)?;
        history.push(result.clone());
        self.write_json(user, &self.quiz_history_path(user), &history)
    }
}
