//! Show or initialize configuration

use clap::Args;

use super::CliContext;
use crate::error::FinsightResult;

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Write the current settings to the config file
    #[arg(long)]
    pub init: bool,
}

pub fn handle_config_command(ctx: &CliContext, args: ConfigArgs) -> FinsightResult<()> {
    let paths = &ctx.paths;
    let settings = &ctx.settings;

    if args.init {
        settings.save(paths)?;
        println!("Settings written to: {}", paths.settings_file().display());
        println!();
    }

    println!("Finsight Configuration");
    println!("======================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Snapshot file:  {}", ctx.snapshot_path.display());
    println!();
    println!("Settings:");
    println!("  Spending window:    {} days", settings.window_days);
    println!("  Top categories:     {}", settings.top_categories);
    println!("  Streak rule:        {}", settings.streak_rule);
    println!("  Recurring horizon:  {} days", settings.recurring_horizon_days);
    println!("  Currency symbol:    {}", settings.currency_symbol);
    println!("  Date format:        {}", settings.date_format);
    let w = &settings.score_weights;
    println!(
        "  Score weights:      spending {:.2}, savings {:.2}, budgeting {:.2}, goals {:.2}",
        w.spending, w.savings, w.budgeting, w.goals
    );
    Ok(())
}
