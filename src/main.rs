use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finsight::cli::{
    handle_budget_report, handle_categorize_command, handle_config_command, handle_goals_report,
    handle_habit_command, handle_habits_report, handle_health_report, handle_mood_command,
    handle_prompt_command, handle_recurring_report, handle_spending_report, handle_summary_report,
    parse_as_of, CategorizeArgs, CliContext, ConfigArgs, HabitCommands, HealthArgs, MoodArgs,
    OutputArgs, PromptArgs, RecurringArgs, SpendingArgs, SummaryArgs,
};
use finsight::config::{FinsightPaths, Settings};

#[derive(Parser)]
#[command(
    name = "finsight",
    version,
    about = "Personal finance metrics from the command line",
    long_about = "Finsight reads a snapshot of your transactions, budgets, savings goals, \
                  habits and recurring payments, and reports the numbers behind them: \
                  spending windows, budget utilization, goal progress, habit streaks \
                  and an overall financial health score."
)]
struct Cli {
    /// Snapshot file to read (defaults to snapshot.json in the data directory)
    #[arg(long, global = true, env = "FINSIGHT_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Evaluate as of a date (YYYY-MM-DD) or RFC 3339 timestamp instead of now
    #[arg(long, global = true, value_parser = parse_as_of)]
    as_of: Option<DateTime<Utc>>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Income, expenses and balance
    Summary(SummaryArgs),

    /// Spending over a recent window
    Spending(SpendingArgs),

    /// Budget utilization by category
    Budget(OutputArgs),

    /// Savings goal progress
    Goals(OutputArgs),

    /// Habit streaks for today
    Habits(OutputArgs),

    /// Habit commands
    #[command(subcommand)]
    Habit(HabitCommands),

    /// Upcoming recurring transactions
    #[command(alias = "upcoming")]
    Recurring(RecurringArgs),

    /// Financial health score
    Health(HealthArgs),

    /// Print a language-model prompt for the current snapshot
    Prompt(PromptArgs),

    /// Emotional tone of recent decisions from a saved model reply
    Mood(MoodArgs),

    /// Suggest a category for a transaction
    Categorize(CategorizeArgs),

    /// Show current configuration and paths
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = FinsightPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let ctx = CliContext::new(paths, settings, cli.snapshot, cli.as_of);

    match cli.command {
        Some(Commands::Summary(args)) => handle_summary_report(&ctx, args)?,
        Some(Commands::Spending(args)) => handle_spending_report(&ctx, args)?,
        Some(Commands::Budget(args)) => handle_budget_report(&ctx, args)?,
        Some(Commands::Goals(args)) => handle_goals_report(&ctx, args)?,
        Some(Commands::Habits(args)) => handle_habits_report(&ctx, args)?,
        Some(Commands::Habit(cmd)) => handle_habit_command(&ctx, cmd)?,
        Some(Commands::Recurring(args)) => handle_recurring_report(&ctx, args)?,
        Some(Commands::Health(args)) => handle_health_report(&ctx, args)?,
        Some(Commands::Prompt(args)) => handle_prompt_command(&ctx, args)?,
        Some(Commands::Mood(args)) => handle_mood_command(&ctx, args)?,
        Some(Commands::Categorize(args)) => handle_categorize_command(&ctx, args)?,
        Some(Commands::Config(args)) => handle_config_command(&ctx, args)?,
        None => {
            println!("Finsight - personal finance metrics");
            println!();
            println!("Run 'finsight --help' for usage information.");
            println!("Run 'finsight summary' for an overview of your snapshot.");
        }
    }

    Ok(())
}
