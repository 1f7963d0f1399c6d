//! XP, levels, streaks and badges

pub mod catalog;
pub mod engine;
pub mod models;

pub use catalog::{BadgeDefinition, LevelDefinition, BADGES, LEVELS};
pub use engine::{
    badge_statuses, level_summary, record_flashcard_review, record_quiz_completion,
    update_streak, ProgressError,
};
pub use models::*;
