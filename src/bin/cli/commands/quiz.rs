use anyhow::{bail, Context, Result};
use chrono::Utc;
use uuid::Uuid;

use learnx_lib::flashcards::MissedQuestion;
use learnx_lib::quiz::QuizResult;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub struct QuizArgs {
    pub category: String,
    pub score: u8,
    pub gaps: Vec<String>,
    pub missed: Vec<String>,
    pub time: Option<u32>,
    pub attempt: Option<Uuid>,
}

/// Parse "concept|question|correct answer[|your answer]"
fn parse_missed(raw: &str) -> Result<MissedQuestion> {
    let parts: Vec<&str> = raw.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [concept, question, answer] => Ok(MissedQuestion {
            concept: concept.to_string(),
            question: question.to_string(),
            correct_answer: answer.to_string(),
            user_answer: None,
        }),
        [concept, question, answer, given] => Ok(MissedQuestion {
            concept: concept.to_string(),
            question: question.to_string(),
            correct_answer: answer.to_string(),
            user_answer: Some(given.to_string()),
        }),
        _ => bail!(
            "Invalid --missed value '{}', expected concept|question|answer[|your answer]",
            raw
        ),
    }
}

pub fn run(app: &App, args: QuizArgs, format: &OutputFormat, use_color: bool) -> Result<()> {
    let missed = args
        .missed
        .iter()
        .map(|m| parse_missed(m))
        .collect::<Result<Vec<_>>>()?;

    let now = Utc::now();
    // Missed concepts count as gaps even if not listed separately
    let mut result = QuizResult::new(args.category, args.score, now)
        .with_gaps(args.gaps)
        .with_gaps(missed.iter().map(|m| m.concept.clone()));
    if let Some(secs) = args.time {
        result = result.with_time_spent(secs);
    }
    if let Some(id) = args.attempt {
        result.id = id;
    }

    let submission = app
        .tracker
        .submit_quiz(&app.user, result, &missed, now)
        .context("Failed to record quiz")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&submission)?);
        }
        OutputFormat::Plain => {
            for line in terminal::render_rewards(&submission.rewards, use_color) {
                println!("{}", line);
            }
            if !submission.new_items.is_empty() {
                println!(
                    "{}",
                    terminal::paint(
                        &format!("{} new review items added", submission.new_items.len()),
                        Color::CYAN,
                        use_color
                    )
                );
            }
            println!();
            println!("{}", terminal::render_level(&submission.level, use_color));
        }
    }

    Ok(())
}
