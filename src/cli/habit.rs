//! Habit CLI commands

use clap::Subcommand;

use super::CliContext;
use crate::error::FinsightResult;
use crate::metrics::toggle_habit_completion;

/// Habit subcommands
#[derive(Subcommand, Debug)]
pub enum HabitCommands {
    /// Mark a habit done for today, or undo today's completion
    Toggle {
        /// Habit ID or name
        habit: String,
        /// Show the result without saving the snapshot
        #[arg(long)]
        dry_run: bool,
    },
}

pub fn handle_habit_command(ctx: &CliContext, cmd: HabitCommands) -> FinsightResult<()> {
    match cmd {
        HabitCommands::Toggle { habit, dry_run } => {
            let mut snapshot = ctx.load_snapshot()?;
            let today = ctx.today();
            let current = snapshot.find_habit(&habit)?;
            let updated = toggle_habit_completion(current, today, ctx.settings.streak_rule)?;

            let mark = if updated.is_completed_on(today) {
                "Completed"
            } else {
                "Unmarked"
            };
            println!(
                "{}: {} (streak {} of {} days, {})",
                mark,
                updated.name,
                updated.streak,
                updated.target,
                updated.tier()
            );

            if dry_run {
                println!("Dry run: snapshot not saved.");
                return Ok(());
            }

            snapshot.replace_habit(updated)?;
            snapshot.save(&ctx.snapshot_path)?;
        }
    }
    Ok(())
}
