//! Data models for review items

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::algorithm::{DEFAULT_EASE_FACTOR, SchedulerError};

/// Repetition count at which an item counts as mastered
pub const MASTERED_REPETITIONS: u32 = 3;

/// Self-assessed recall quality for a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Quality {
    /// No recall at all
    Blackout = 0,
    /// Recalled incorrectly
    Wrong = 1,
    /// Correct with serious difficulty
    Hard = 2,
    /// Correct after some hesitation
    Good = 3,
    /// Perfect recall
    Easy = 4,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::Blackout,
        Quality::Wrong,
        Quality::Hard,
        Quality::Good,
        Quality::Easy,
    ];

    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Blackout => "blackout",
            Quality::Wrong => "wrong",
            Quality::Hard => "hard",
            Quality::Good => "good",
            Quality::Easy => "easy",
        }
    }
}

impl TryFrom<i32> for Quality {
    type Error = SchedulerError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Quality::Blackout),
            1 => Ok(Quality::Wrong),
            2 => Ok(Quality::Hard),
            3 => Ok(Quality::Good),
            4 => Ok(Quality::Easy),
            other => Err(SchedulerError::InvalidQuality(other)),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A learning prompt scheduled for spaced review.
///
/// Created from a question the learner got wrong in a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub id: Uuid,
    /// Quiz category the question came from
    pub category: String,
    pub concept: String,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    /// Days until the next review, always at least 1
    #[serde(default = "default_interval")]
    pub interval_days: u32,
    /// Multiplicative interval growth, never below 1.3
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// Consecutive acceptable reviews since the last reset
    #[serde(default)]
    pub repetition_count: u32,
    pub next_review_at: DateTime<Utc>,
    #[serde(default)]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

fn default_interval() -> u32 {
    1
}

fn default_ease_factor() -> f64 {
    DEFAULT_EASE_FACTOR
}

impl ReviewItem {
    /// Create a never-reviewed item that is due immediately
    pub fn new(
        category: String,
        concept: String,
        question: String,
        answer: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            concept,
            question,
            answer,
            user_answer: None,
            interval_days: default_interval(),
            ease_factor: DEFAULT_EASE_FACTOR,
            repetition_count: 0,
            next_review_at: now,
            last_reviewed_at: None,
            created_at: now,
        }
    }

    /// Check if the item is due for review at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    pub fn is_mastered(&self) -> bool {
        self.repetition_count >= MASTERED_REPETITIONS
    }
}

/// A quiz question answered incorrectly, used to seed review items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissedQuestion {
    pub concept: String,
    pub question: String,
    pub correct_answer: String,
    #[serde(default)]
    pub user_answer: Option<String>,
}

/// Per-category counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCardStats {
    pub total: usize,
    pub mastered: usize,
}

/// Review statistics across all of a learner's items
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardStats {
    pub total: usize,
    pub due: usize,
    pub mastered: usize,
    pub by_category: BTreeMap<String, CategoryCardStats>,
}
