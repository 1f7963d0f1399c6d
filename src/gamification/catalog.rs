//! Static badge and level catalogs
//!
//! Badges are evaluated in the order they appear in [`BADGES`]. Adding a
//! badge only needs a new entry here and, if it needs new inputs, a field on
//! [`BadgeContext`].

use crate::quiz::{QuizResult, ALL_CATEGORIES};

use super::models::{BadgeId, ProgressRecord};

/// Score gain over the previous attempt in a category for `improver`
pub const IMPROVEMENT_POINTS: u8 = 20;

/// Score that counts as having closed earlier gaps
pub const GAP_CLOSED_SCORE: u8 = 80;

/// Inputs a badge predicate may look at.
///
/// `record` is the state after the current event's XP, streak and category
/// updates. `quiz` is set only for quiz completions.
pub struct BadgeContext<'a> {
    pub record: &'a ProgressRecord,
    pub quiz: Option<QuizContext<'a>>,
}

/// The quiz being completed and the attempts before it, oldest first
#[derive(Clone, Copy)]
pub struct QuizContext<'a> {
    pub result: &'a QuizResult,
    pub history: &'a [QuizResult],
}

impl QuizContext<'_> {
    /// Attempts including the current one
    pub fn total_attempts(&self) -> usize {
        self.history.len() + 1
    }

    /// Score of the most recent earlier attempt in the same category
    fn previous_score(&self) -> Option<u8> {
        self.history
            .iter()
            .rev()
            .find(|q| q.category == self.result.category)
            .map(|q| q.score_percentage)
    }

    /// Whether an earlier attempt in the same category recorded gaps
    fn had_gaps_before(&self) -> bool {
        self.history
            .iter()
            .any(|q| q.category == self.result.category && q.has_gaps())
    }
}

impl BadgeContext<'_> {
    fn attempts_at_least(&self, n: usize) -> bool {
        self.quiz.map_or(false, |q| q.total_attempts() >= n)
    }
}

pub struct BadgeDefinition {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub xp_reward: u64,
    pub unlocked_by: fn(&BadgeContext) -> bool,
}

pub static BADGES: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: BadgeId::FirstQuiz,
        name: "First Steps",
        description: "Complete your first quiz",
        icon: "🎯",
        xp_reward: 50,
        unlocked_by: |ctx| ctx.attempts_at_least(1),
    },
    BadgeDefinition {
        id: BadgeId::PerfectScore,
        name: "Perfectionist",
        description: "Score 100% on any quiz",
        icon: "💯",
        xp_reward: 100,
        unlocked_by: |ctx| ctx.quiz.map_or(false, |q| q.result.score_percentage == 100),
    },
    BadgeDefinition {
        id: BadgeId::Streak3,
        name: "On Fire",
        description: "Maintain a 3-day streak",
        icon: "🔥",
        xp_reward: 75,
        unlocked_by: |ctx| ctx.record.streak_count >= 3,
    },
    BadgeDefinition {
        id: BadgeId::Streak7,
        name: "Dedicated Learner",
        description: "Maintain a 7-day streak",
        icon: "⚡",
        xp_reward: 150,
        unlocked_by: |ctx| ctx.record.streak_count >= 7,
    },
    BadgeDefinition {
        id: BadgeId::Streak30,
        name: "Unstoppable",
        description: "Maintain a 30-day streak",
        icon: "🌟",
        xp_reward: 500,
        unlocked_by: |ctx| ctx.record.streak_count >= 30,
    },
    BadgeDefinition {
        id: BadgeId::Quizzes5,
        name: "Getting Started",
        description: "Complete 5 quizzes",
        icon: "📚",
        xp_reward: 100,
        unlocked_by: |ctx| ctx.attempts_at_least(5),
    },
    BadgeDefinition {
        id: BadgeId::Quizzes25,
        name: "Quiz Master",
        description: "Complete 25 quizzes",
        icon: "🏆",
        xp_reward: 250,
        unlocked_by: |ctx| ctx.attempts_at_least(25),
    },
    BadgeDefinition {
        id: BadgeId::Quizzes100,
        name: "Legend",
        description: "Complete 100 quizzes",
        icon: "👑",
        xp_reward: 1000,
        unlocked_by: |ctx| ctx.attempts_at_least(100),
    },
    BadgeDefinition {
        id: BadgeId::AllSubjects,
        name: "Well Rounded",
        description: "Complete a quiz in all subjects",
        icon: "🎓",
        xp_reward: 200,
        unlocked_by: |ctx| {
            ALL_CATEGORIES
                .iter()
                .all(|c| ctx.record.completed_categories.contains(*c))
        },
    },
    BadgeDefinition {
        id: BadgeId::Improver,
        name: "Improver",
        description: "Improve your score in any subject by 20%",
        icon: "📈",
        xp_reward: 150,
        unlocked_by: |ctx| {
            ctx.quiz.map_or(false, |q| {
                q.previous_score().map_or(false, |prev| {
                    q.result.score_percentage >= prev.saturating_add(IMPROVEMENT_POINTS)
                })
            })
        },
    },
    BadgeDefinition {
        id: BadgeId::FlashcardMaster,
        name: "Flash Master",
        description: "Review 50 flashcards",
        icon: "⚡",
        xp_reward: 100,
        unlocked_by: |ctx| ctx.record.reviewed_item_count >= 50,
    },
    BadgeDefinition {
        id: BadgeId::NoGaps,
        name: "Gap Closer",
        description: "Score 80%+ after having gaps in a subject",
        icon: "🔒",
        xp_reward: 200,
        unlocked_by: |ctx| {
            ctx.quiz.map_or(false, |q| {
                q.result.score_percentage >= GAP_CLOSED_SCORE
                    && q.had_gaps_before()
            })
        },
    },
];

/// Look up a badge definition by id
pub fn badge(id: BadgeId) -> Option<&'static BadgeDefinition> {
    BADGES.iter().find(|b| b.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    pub level: u32,
    pub name: &'static str,
    pub min_xp: u64,
}

/// All levels, ascending by threshold. Level 1 starts at 0 XP.
pub static LEVELS: &[LevelDefinition] = &[
    LevelDefinition { level: 1, name: "Beginner", min_xp: 0 },
    LevelDefinition { level: 2, name: "Learner", min_xp: 100 },
    LevelDefinition { level: 3, name: "Student", min_xp: 300 },
    LevelDefinition { level: 4, name: "Scholar", min_xp: 600 },
    LevelDefinition { level: 5, name: "Expert", min_xp: 1000 },
    LevelDefinition { level: 6, name: "Master", min_xp: 1500 },
    LevelDefinition { level: 7, name: "Grandmaster", min_xp: 2200 },
    LevelDefinition { level: 8, name: "Legend", min_xp: 3000 },
    LevelDefinition { level: 9, name: "Mythic", min_xp: 4000 },
    LevelDefinition { level: 10, name: "Transcendent", min_xp: 5500 },
];
