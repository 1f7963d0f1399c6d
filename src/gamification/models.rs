//! Progress, reward and level data models

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BadgeId {
    #[serde(rename = "first_quiz")]
    FirstQuiz,
    #[serde(rename = "perfect_score")]
    PerfectScore,
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "streak_30")]
    Streak30,
    #[serde(rename = "quizzes_5")]
    Quizzes5,
    #[serde(rename = "quizzes_25")]
    Quizzes25,
    #[serde(rename = "quizzes_100")]
    Quizzes100,
    #[serde(rename = "all_subjects")]
    AllSubjects,
    #[serde(rename = "improver")]
    Improver,
    #[serde(rename = "flashcard_master")]
    FlashcardMaster,
    #[serde(rename = "no_gaps")]
    NoGaps,
}

impl BadgeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeId::FirstQuiz => "first_quiz",
            BadgeId::PerfectScore => "perfect_score",
            BadgeId::Streak3 => "streak_3",
            BadgeId::Streak7 => "streak_7",
            BadgeId::Streak30 => "streak_30",
            BadgeId::Quizzes5 => "quizzes_5",
            BadgeId::Quizzes25 => "quizzes_25",
            BadgeId::Quizzes100 => "quizzes_100",
            BadgeId::AllSubjects => "all_subjects",
            BadgeId::Improver => "improver",
            BadgeId::FlashcardMaster => "flashcard_master",
            BadgeId::NoGaps => "no_gaps",
        }
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user gamification state.
///
/// `xp`, `total_xp_earned` and both sets only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    pub xp: u64,
    /// Lifetime total, never reduced
    pub total_xp_earned: u64,
    pub unlocked_badge_ids: BTreeSet<BadgeId>,
    /// Consecutive days with activity
    pub streak_count: u32,
    pub last_activity_date: Option<NaiveDate>,
    pub reviewed_item_count: u32,
    pub completed_categories: BTreeSet<String>,
}

impl ProgressRecord {
    pub fn has_badge(&self, id: BadgeId) -> bool {
        self.unlocked_badge_ids.contains(&id)
    }
}

/// A reward surfaced to the user for a single event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Reward {
    Xp { amount: u64, reason: String },
    Streak { streak: u32 },
    #[serde(rename_all = "camelCase")]
    Badge { badge: BadgeId, xp_earned: u64 },
}

/// Updated record plus the rewards granted while producing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub record: ProgressRecord,
    pub rewards: Vec<Reward>,
}

impl Outcome {
    /// Total XP granted by this outcome's rewards
    pub fn xp_gained(&self) -> u64 {
        self.rewards
            .iter()
            .map(|r| match r {
                Reward::Xp { amount, .. } => *amount,
                Reward::Badge { xp_earned, .. } => *xp_earned,
                Reward::Streak { .. } => 0,
            })
            .sum()
    }
}

/// A catalog badge with its unlock state, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeStatus {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u64,
    pub unlocked: bool,
}

/// Where a learner stands in the level catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSummary {
    pub xp: u64,
    pub level: u32,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_level_xp: Option<u64>,
    /// Percent through the current level, 100 at max level
    pub progress: u8,
}
