use anyhow::{Context, Result};
use chrono::Utc;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    id_prefix: &str,
    quality: i32,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let item = app.find_item(id_prefix)?;

    let review = app
        .tracker
        .review_item(&app.user, item.id, quality, Utc::now())
        .context("Failed to grade review item")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&review)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_item(&review.item, use_color));
            println!("    Answer: {}", review.item.answer);
            println!("    {}", terminal::render_schedule(&review.item));
            for line in terminal::render_rewards(&review.rewards, use_color) {
                println!("{}", line);
            }
            println!("{} items reviewed", review.reviewed_item_count);
        }
    }

    Ok(())
}
