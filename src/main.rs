use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "frisian-progress")]
#[command(about = "XP levels, daily streaks and achievements for the Frisian course")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.frisian/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the progress database (overrides the config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the level, progress and XP to the next level for an XP total
    Level {
        /// Lifetime XP
        xp: u64,
    },

    /// Print the XP thresholds of the first levels
    Curve {
        /// Number of levels to show
        #[arg(long, default_value_t = 10)]
        levels: u32,
    },

    /// Compute the next streak value for a practice event
    Streak {
        /// Last practice date (YYYY-MM-DD) or "none"
        last: String,

        /// Current streak count
        current: u32,

        /// Date of the practice event (defaults to today)
        #[arg(long)]
        today: Option<String>,
    },

    /// Evaluate achievements for a JSON stats snapshot
    Achievements {
        /// JSON file with the snapshot, "-" for stdin (defaults to the local store)
        #[arg(long)]
        stats: Option<PathBuf>,
    },

    /// List all achievements by category
    Catalog {
        /// Show details for one achievement
        id: Option<String>,
    },

    /// Record a finished lesson in the local store
    Record {
        /// Lesson identifier
        #[arg(long)]
        lesson: String,

        /// XP awarded by the lesson
        #[arg(long)]
        xp: u64,

        /// No mistakes in the lesson
        #[arg(long)]
        perfect: bool,

        /// Word practiced in the lesson (repeatable)
        #[arg(long = "word")]
        words: Vec<String>,

        /// Skill finished by this lesson
        #[arg(long)]
        skill: Option<String>,
    },

    /// Show the stored profile, streak and unlocked achievements
    Status,

    /// Initialize ~/.frisian/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Delete all stored progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = cli::Context {
        config_path: cli.config,
        db_path: cli.db,
    };

    match cli.command {
        Commands::Level { xp } => cli::level::level_command(&ctx, xp)?,
        Commands::Curve { levels } => cli::level::curve_command(&ctx, levels)?,
        Commands::Streak {
            last,
            current,
            today,
        } => cli::streak::streak_command(&ctx, &last, current, today.as_deref())?,
        Commands::Achievements { stats } => {
            cli::achievements::achievements_command(&ctx, stats.as_deref())?
        }
        Commands::Catalog { id } => cli::achievements::catalog_command(id.as_deref())?,
        Commands::Record {
            lesson,
            xp,
            perfect,
            words,
            skill,
        } => cli::record::record_command(&ctx, lesson, xp, perfect, words, skill)?,
        Commands::Status => cli::status::status_command(&ctx)?,
        Commands::Init { force } => cli::init::init_command(&ctx, force)?,
        Commands::Reset { yes } => cli::status::reset_command(&ctx, yes)?,
    }

    Ok(())
}
