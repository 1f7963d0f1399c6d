use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let record = app
        .tracker
        .progress(&app.user)
        .context("Failed to load progress")?;
    let level = app.tracker.level_summary(&app.user)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "progress": record,
                "level": level,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_level(&level, use_color));
            println!("Lifetime XP: {}", record.total_xp_earned);

            let last = record
                .last_activity_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "never".to_string());
            println!("Streak: {} days (last active {})", record.streak_count, last);
            println!("Items reviewed: {}", record.reviewed_item_count);
            println!("Badges: {}", record.unlocked_badge_ids.len());

            if !record.completed_categories.is_empty() {
                let categories = record
                    .completed_categories
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("Categories: {}", categories);
            }
        }
    }

    Ok(())
}

pub fn run_badges(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let badges = app
        .tracker
        .badges(&app.user)
        .context("Failed to load badges")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&badges)?);
        }
        OutputFormat::Plain => {
            let max_name_len = badges.iter().map(|b| b.name.len()).max().unwrap_or(5);

            for b in &badges {
                let line = format!(
                    "{} {:<width$} {:>5} XP  {}",
                    b.icon,
                    b.name,
                    b.xp_reward,
                    b.description,
                    width = max_name_len
                );
                if b.unlocked {
                    println!("{}", terminal::paint(&line, Color::GREEN, use_color));
                } else {
                    println!("{}", terminal::paint(&line, Color::DIM, use_color));
                }
            }

            let unlocked = badges.iter().filter(|b| b.unlocked).count();
            println!("\n{}/{} unlocked", unlocked, badges.len());
        }
    }

    Ok(())
}
