use anyhow::{Context, Result};
use chrono::Utc;

use learnx_lib::flashcards::algorithm::{format_interval, preview_intervals};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let due = app
        .tracker
        .due_items(&app.user, Utc::now())
        .context("Failed to load due items")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due for review.");
                return Ok(());
            }

            for item in &due {
                println!("{}", terminal::render_item(item, use_color));
                let preview = preview_intervals(item)
                    .iter()
                    .enumerate()
                    .map(|(q, days)| format!("{}:{}", q, format_interval(*days)))
                    .collect::<Vec<_>>()
                    .join("  ");
                println!("    {}", terminal::paint(&preview, terminal::Color::GRAY, use_color));
            }

            println!("\n{} items due", due.len());
        }
    }

    Ok(())
}

pub fn run_delete(app: &App, id_prefix: &str, format: &OutputFormat) -> Result<()> {
    let item = app.find_item(id_prefix)?;
    app.tracker
        .delete_item(&app.user, item.id)
        .context("Failed to delete review item")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "deleted": item.id.to_string() }));
        }
        OutputFormat::Plain => {
            println!("Deleted review item {}", item.id);
        }
    }

    Ok(())
}
