//! Learner data persistence

mod file_storage;
mod store;

pub use file_storage::{FileStore, Result, StorageError};
pub use store::{LearnerStore, UserId};
