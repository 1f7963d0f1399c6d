use learnx_lib::flashcards::algorithm::format_interval;
use learnx_lib::flashcards::ReviewItem;
use learnx_lib::gamification::catalog::badge;
use learnx_lib::gamification::{LevelSummary, Reward};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// One line per reward
pub fn render_rewards(rewards: &[Reward], use_color: bool) -> Vec<String> {
    rewards
        .iter()
        .map(|reward| match reward {
            Reward::Xp { amount, reason } => {
                format!("{} {}", paint(&format!("+{} XP", amount), Color::GREEN, use_color), reason)
            }
            Reward::Streak { streak } => {
                paint(&format!("🔥 {}-day streak", streak), Color::YELLOW, use_color)
            }
            Reward::Badge { badge: id, xp_earned } => {
                let (icon, name) = badge(*id).map_or(("", id.as_str()), |b| (b.icon, b.name));
                format!(
                    "{} {} {}",
                    icon,
                    paint(&format!("Badge unlocked: {}", name), Color::BOLD, use_color),
                    paint(&format!("(+{} XP)", xp_earned), Color::GREEN, use_color)
                )
            }
        })
        .collect()
}

/// A text progress bar for the current level
pub fn render_level(level: &LevelSummary, use_color: bool) -> String {
    const WIDTH: usize = 20;
    let filled = usize::from(level.progress) * WIDTH / 100;
    let bar = format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled));

    let next = match level.next_level_xp {
        Some(xp) => format!("{}/{} XP", level.xp, xp),
        None => format!("{} XP (max level)", level.xp),
    };

    format!(
        "{} {} {}%  {}",
        paint(&format!("Level {} {}", level.level, level.name), Color::BOLD, use_color),
        bar,
        level.progress,
        next
    )
}

/// Short one-line summary of a review item
pub fn render_item(item: &ReviewItem, use_color: bool) -> String {
    let short_id: String = item.id.to_string().chars().take(8).collect();
    format!(
        "{} {} {}\n    {}",
        paint(&short_id, Color::GRAY, use_color),
        paint(&item.category, Color::CYAN, use_color),
        paint(&item.concept, Color::DIM, use_color),
        item.question
    )
}

/// Interval and repetition summary for a graded item
pub fn render_schedule(item: &ReviewItem) -> String {
    format!(
        "next review in {} (ease {:.2}, {} in a row)",
        format_interval(item.interval_days),
        item.ease_factor,
        item.repetition_count
    )
}
