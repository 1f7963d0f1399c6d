//! XP, streak and badge state transitions
//!
//! Every function here takes the current [`ProgressRecord`] and returns a new
//! one. Loading and saving the record is the caller's job, as is making sure
//! the same real-world event is not fed in twice.

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::quiz::QuizResult;

use super::catalog::{BadgeContext, QuizContext, BADGES, LEVELS, LevelDefinition};
use super::models::*;

/// XP for finishing any quiz, before the score bonus
pub const QUIZ_BASE_XP: u64 = 25;

/// Every this many reviews grants [`REVIEW_MILESTONE_XP`]
pub const REVIEW_MILESTONE_EVERY: u32 = 5;

pub const REVIEW_MILESTONE_XP: u64 = 10;

#[derive(Error, Debug, PartialEq)]
pub enum ProgressError {
    #[error("Invalid score percentage {0}, expected 0-100")]
    InvalidScore(u8),
}

pub type Result<T> = std::result::Result<T, ProgressError>;

/// Apply a completed quiz to the record.
///
/// `history` holds the learner's earlier attempts, oldest first, and must not
/// include `result` itself.
pub fn record_quiz_completion(
    record: &ProgressRecord,
    result: &QuizResult,
    history: &[QuizResult],
    today: NaiveDate,
) -> Result<Outcome> {
    if result.score_percentage > 100 {
        return Err(ProgressError::InvalidScore(result.score_percentage));
    }

    let mut next = record.clone();
    let mut rewards = Vec::new();

    let quiz_xp = quiz_reward(result.score_percentage);
    award_xp(&mut next, quiz_xp);
    rewards.push(Reward::Xp {
        amount: quiz_xp,
        reason: "Quiz completed".to_string(),
    });

    if let Some(streak) = apply_streak(&mut next, today) {
        rewards.push(streak);
    }

    if next.completed_categories.insert(result.category.clone()) {
        log::info!("First completion in category {}", result.category);
    }

    let quiz = QuizContext { result, history };
    rewards.extend(unlock_badges(&mut next, Some(quiz)));

    log::info!(
        "Quiz {} in {} scored {}%: xp {} -> {}",
        result.id,
        result.category,
        result.score_percentage,
        record.xp,
        next.xp
    );

    Ok(Outcome {
        record: next,
        rewards,
    })
}

/// Record activity on `today` and re-check the streak badges.
///
/// A second call on the same day changes nothing.
pub fn update_streak(record: &ProgressRecord, today: NaiveDate) -> Outcome {
    let mut next = record.clone();
    let mut rewards = Vec::new();

    if let Some(streak) = apply_streak(&mut next, today) {
        rewards.push(streak);
    }
    rewards.extend(unlock_badges(&mut next, None));

    Outcome {
        record: next,
        rewards,
    }
}

/// Count one graded review item
pub fn record_flashcard_review(record: &ProgressRecord) -> Outcome {
    let mut next = record.clone();
    next.reviewed_item_count += 1;

    let mut rewards = unlock_badges(&mut next, None);

    if next.reviewed_item_count % REVIEW_MILESTONE_EVERY == 0 {
        award_xp(&mut next, REVIEW_MILESTONE_XP);
        rewards.push(Reward::Xp {
            amount: REVIEW_MILESTONE_XP,
            reason: "Flashcard review milestone".to_string(),
        });
        log::debug!("Review milestone at {} items", next.reviewed_item_count);
    }

    Outcome {
        record: next,
        rewards,
    }
}

/// 25 base plus half the score, rounded half up (25-75)
fn quiz_reward(score_percentage: u8) -> u64 {
    QUIZ_BASE_XP + (u64::from(score_percentage) + 1) / 2
}

fn award_xp(record: &mut ProgressRecord, amount: u64) {
    record.xp = record.xp.saturating_add(amount);
    record.total_xp_earned = record.total_xp_earned.saturating_add(amount);
}

/// Advance the streak for `today`. Returns a streak reward when a new day
/// extends a streak past one.
fn apply_streak(record: &mut ProgressRecord, today: NaiveDate) -> Option<Reward> {
    if record.last_activity_date == Some(today) {
        return None;
    }

    let yesterday = today - Duration::days(1);
    let previous = record.streak_count;
    if record.last_activity_date == Some(yesterday) {
        record.streak_count += 1;
    } else {
        record.streak_count = 1;
    }
    record.last_activity_date = Some(today);

    log::debug!("Streak {} -> {} on {}", previous, record.streak_count, today);

    (record.streak_count > 1).then(|| Reward::Streak {
        streak: record.streak_count,
    })
}

/// Walk the badge catalog in order, unlocking anything newly satisfied
fn unlock_badges(record: &mut ProgressRecord, quiz: Option<QuizContext>) -> Vec<Reward> {
    let mut rewards = Vec::new();

    for badge in BADGES {
        if record.has_badge(badge.id) {
            continue;
        }

        let satisfied = (badge.unlocked_by)(&BadgeContext {
            record: &*record,
            quiz,
        });
        if !satisfied {
            continue;
        }

        record.unlocked_badge_ids.insert(badge.id);
        award_xp(record, badge.xp_reward);
        rewards.push(Reward::Badge {
            badge: badge.id,
            xp_earned: badge.xp_reward,
        });
        log::info!("Unlocked badge {} (+{} XP)", badge.id, badge.xp_reward);
    }

    rewards
}

/// Highest level whose threshold `xp` has reached
pub fn current_level(xp: u64) -> &'static LevelDefinition {
    LEVELS
        .iter()
        .take_while(|level| xp >= level.min_xp)
        .last()
        .unwrap_or(&LEVELS[0])
}

/// The next level to reach, or None at max level
pub fn next_level(xp: u64) -> Option<&'static LevelDefinition> {
    LEVELS.iter().find(|level| xp < level.min_xp)
}

/// Percent of the way from the current level to the next
pub fn level_progress(xp: u64) -> u8 {
    let current = current_level(xp);
    let Some(next) = next_level(xp) else {
        return 100;
    };

    let in_level = xp - current.min_xp;
    let needed = next.min_xp - current.min_xp;
    ((in_level * 200 + needed) / (needed * 2)).min(100) as u8
}

pub fn level_summary(xp: u64) -> LevelSummary {
    let level = current_level(xp);
    LevelSummary {
        xp,
        level: level.level,
        name: level.name,
        next_level_xp: next_level(xp).map(|l| l.min_xp),
        progress: level_progress(xp),
    }
}

/// Every catalog badge, flagged with whether the record has it
pub fn badge_statuses(record: &ProgressRecord) -> Vec<BadgeStatus> {
    BADGES
        .iter()
        .map(|b| BadgeStatus {
            id: b.id,
            name: b.name,
            description: b.description,
            icon: b.icon,
            xp_reward: b.xp_reward,
            unlocked: record.has_badge(b.id),
        })
        .collect()
}
