//! SM-2 style review scheduler
//!
//! Quality ratings (0-4):
//! - 0: Blackout, no recall
//! - 1: Wrong answer
//! - 2: Correct with serious difficulty
//! - 3: Correct after hesitation
//! - 4: Easy, perfect recall
//!
//! Ratings below 2 send the item back to daily review. Acceptable ratings
//! grow the interval 1 → 3 → interval × ease factor.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use super::models::{Quality, ReviewItem};

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor given to new items
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Lowest quality that counts as successful recall
pub const PASSING_QUALITY: Quality = Quality::Hard;

/// Interval after the second consecutive successful review
pub const SECOND_INTERVAL_DAYS: u32 = 3;

#[derive(Error, Debug, PartialEq)]
pub enum SchedulerError {
    #[error("Invalid quality rating {0}, expected 0-4")]
    InvalidQuality(i32),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Grade a review and return the rescheduled item.
///
/// The input item is left untouched; persisting the result is up to the
/// caller. An out-of-range `quality` is rejected before anything is computed.
pub fn grade(item: &ReviewItem, quality: i32, now: DateTime<Utc>) -> Result<ReviewItem> {
    let quality = Quality::try_from(quality)?;
    Ok(grade_with(item, quality, now))
}

/// Infallible form of [`grade`] for an already validated rating
pub fn grade_with(item: &ReviewItem, quality: Quality, now: DateTime<Utc>) -> ReviewItem {
    let mut next = item.clone();

    if quality < PASSING_QUALITY {
        next.repetition_count = 0;
        next.interval_days = 1;
    } else {
        next.interval_days = match item.repetition_count {
            0 => 1,
            1 => SECOND_INTERVAL_DAYS,
            // Uses the ease factor from before this review
            _ => scaled_interval(item.interval_days, item.ease_factor),
        };
        next.repetition_count = item.repetition_count + 1;
    }

    next.ease_factor = next_ease_factor(item.ease_factor, quality);
    next.next_review_at = now + Duration::days(i64::from(next.interval_days));
    next.last_reviewed_at = Some(now);

    log::debug!(
        "Graded item {} as {}: interval {}d -> {}d, ease {:.2} -> {:.2}, reps {} -> {}",
        item.id,
        quality,
        item.interval_days,
        next.interval_days,
        item.ease_factor,
        next.ease_factor,
        item.repetition_count,
        next.repetition_count
    );

    next
}

/// EF' = max(1.3, EF + (0.1 - (4-q) * (0.08 + (4-q) * 0.02)))
fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let miss = f64::from(Quality::Easy.value() - quality.value());
    (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR)
}

fn scaled_interval(interval_days: u32, ease_factor: f64) -> u32 {
    let scaled = (f64::from(interval_days) * ease_factor).round();
    if scaled < 1.0 {
        1
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}

/// Items due at `now`, in their stored (creation) order
pub fn due_items(items: &[ReviewItem], now: DateTime<Utc>) -> Vec<&ReviewItem> {
    items.iter().filter(|item| item.is_due(now)).collect()
}

/// Interval each rating would give, indexed by quality value.
/// Used to show users what each rating would do.
pub fn preview_intervals(item: &ReviewItem) -> [u32; 5] {
    let now = Utc::now();
    Quality::ALL.map(|q| grade_with(item, q, now).interval_days)
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
