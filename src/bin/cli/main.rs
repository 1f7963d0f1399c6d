mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "learnx-cli", about = "Quiz gap tracking, review and progress", version)]
struct Cli {
    /// Learner email, used as the storage key
    #[arg(long, global = true)]
    user: Option<String>,

    /// Data directory (default: platform local data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Record a completed quiz
    Quiz {
        /// Quiz category, e.g. "DBMS"
        #[arg(long)]
        category: String,
        /// Score percentage (0-100)
        #[arg(long)]
        score: u8,
        /// Concept the learner got wrong (repeatable)
        #[arg(long = "gap")]
        gaps: Vec<String>,
        /// Missed question as "concept|question|correct answer[|your answer]" (repeatable)
        #[arg(long = "missed")]
        missed: Vec<String>,
        /// Time spent in seconds
        #[arg(long)]
        time: Option<u32>,
        /// Attempt id; resubmitting the same id is rejected
        #[arg(long)]
        attempt: Option<uuid::Uuid>,
    },

    /// Grade a review item
    Review {
        /// Review item id (unique prefix is enough)
        id: String,
        /// 0 blackout, 1 wrong, 2 hard, 3 good, 4 easy
        quality: i32,
    },

    /// List review items due now
    Due,

    /// Delete a review item
    DeleteCard {
        /// Review item id (unique prefix is enough)
        id: String,
    },

    /// Review item statistics
    Cards,

    /// XP, level and streak
    Progress,

    /// Badge catalog with unlock state
    Badges,

    /// Quiz history statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.data_dir, cli.user.as_deref())?;

    match cli.command {
        Command::Quiz { category, score, gaps, missed, time, attempt } => {
            commands::quiz::run(
                &app,
                commands::quiz::QuizArgs {
                    category,
                    score,
                    gaps,
                    missed,
                    time,
                    attempt,
                },
                &cli.format,
                use_color,
            )?;
        }
        Command::Review { id, quality } => {
            commands::review::run(&app, &id, quality, &cli.format, use_color)?;
        }
        Command::Due => {
            commands::due::run(&app, &cli.format, use_color)?;
        }
        Command::DeleteCard { id } => {
            commands::due::run_delete(&app, &id, &cli.format)?;
        }
        Command::Cards => {
            commands::stats::run_cards(&app, &cli.format)?;
        }
        Command::Progress => {
            commands::progress::run(&app, &cli.format, use_color)?;
        }
        Command::Badges => {
            commands::progress::run_badges(&app, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run_quizzes(&app, &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
