use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::OutputFormat;

pub fn run_cards(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app
        .tracker
        .flashcard_stats(&app.user, Utc::now())
        .context("Failed to load review items")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} items, {} due, {} mastered",
                stats.total, stats.due, stats.mastered
            );
            if stats.by_category.is_empty() {
                return Ok(());
            }

            let max_len = stats.by_category.keys().map(|c| c.len()).max().unwrap_or(8).max(8);
            println!();
            println!("{:<width$} Total Mastered", "Category", width = max_len + 1);
            println!("{} {} {}", "\u{2500}".repeat(max_len + 1), "\u{2500}".repeat(5), "\u{2500}".repeat(8));
            for (category, entry) in &stats.by_category {
                println!(
                    "{:<width$} {:>5} {:>8}",
                    category,
                    entry.total,
                    entry.mastered,
                    width = max_len + 1
                );
            }
        }
    }

    Ok(())
}

pub fn run_quizzes(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app
        .tracker
        .quiz_stats(&app.user)
        .context("Failed to load quiz history")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            if stats.total_quizzes == 0 {
                println!("No quizzes recorded.");
                return Ok(());
            }

            println!(
                "{} quizzes, average {}%, best {}%, {} min total",
                stats.total_quizzes,
                stats.avg_score.unwrap_or_default(),
                stats.best_score.unwrap_or_default(),
                stats.total_time_secs / 60
            );

            for (category, entry) in &stats.by_category {
                println!(
                    "\n{}: {} attempts, avg {}%, best {}%",
                    category, entry.attempts, entry.avg_score, entry.best_score
                );
                if !entry.gaps.is_empty() {
                    let gaps = entry.gaps.iter().cloned().collect::<Vec<_>>().join(", ");
                    println!("  gaps: {}", gaps);
                }
            }
        }
    }

    Ok(())
}
