//! CLI commands for reports
//!
//! Every report prints to the terminal by default. `--output` writes an
//! export file instead; `--format` alone writes the export to stdout.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Args;

use super::{saved_reply, CliContext};
use crate::error::{FinsightError, FinsightResult};
use crate::metrics::HealthContext;
use crate::models::Period;
use crate::reports::{
    export_report, BudgetReport, ExportFormat, GoalsReport, HabitsReport, HealthReport,
    RecurringReport, Report, SpendingReport, SummaryReport,
};
use crate::scoring::{HealthScorer, HeuristicScorer, LlmScorer};

/// Output options shared by every report
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Export to a file instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format (defaults to the output file extension, then CSV)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    /// Restrict to a period ("2025-03", "2025-W10" or "2025-03-01..2025-03-15")
    #[arg(short, long)]
    pub period: Option<String>,

    /// Number of top categories to show
    #[arg(long)]
    pub top: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SpendingArgs {
    /// Window length in days
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Number of top categories to show
    #[arg(long)]
    pub top: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RecurringArgs {
    /// How many days ahead to list
    #[arg(short, long)]
    pub days: Option<u32>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct HealthArgs {
    /// Score from a saved language-model response instead of the local heuristic
    #[arg(long, value_name = "FILE")]
    pub llm_response: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Print or export a report
fn emit<R: Report>(ctx: &CliContext, report: &R, args: &OutputArgs) -> FinsightResult<()> {
    match (&args.output, args.format) {
        (Some(path), format) => {
            let format = format
                .or_else(|| ExportFormat::from_path(path))
                .unwrap_or(ExportFormat::Csv);
            let file = File::create(path).map_err(|e| {
                FinsightError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            export_report(report, format, BufWriter::new(file))?;
            println!("{} exported to: {}", report.title(), path.display());
        }
        (None, Some(format)) => {
            export_report(report, format, io::stdout().lock())?;
        }
        (None, None) => {
            print!("{}", report.format_terminal(&ctx.style()));
        }
    }
    Ok(())
}

pub fn handle_summary_report(ctx: &CliContext, args: SummaryArgs) -> FinsightResult<()> {
    let period = args
        .period
        .as_deref()
        .map(Period::parse)
        .transpose()
        .map_err(|e| {
            FinsightError::InvalidInput(format!(
                "{}. Use YYYY-MM, YYYY-Www or YYYY-MM-DD..YYYY-MM-DD",
                e
            ))
        })?;

    let snapshot = ctx.load_snapshot()?;
    let top = args.top.unwrap_or(ctx.settings.top_categories);
    let report = SummaryReport::generate(&snapshot.transactions, period.as_ref(), top)?;
    emit(ctx, &report, &args.output)
}

pub fn handle_spending_report(ctx: &CliContext, args: SpendingArgs) -> FinsightResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let report = SpendingReport::generate(
        &snapshot.transactions,
        ctx.now,
        args.days.unwrap_or(ctx.settings.window_days),
        args.top.unwrap_or(ctx.settings.top_categories),
    )?;
    emit(ctx, &report, &args.output)
}

pub fn handle_budget_report(ctx: &CliContext, args: OutputArgs) -> FinsightResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let report = BudgetReport::generate(&snapshot.budget_categories)?;
    emit(ctx, &report, &args)
}

pub fn handle_goals_report(ctx: &CliContext, args: OutputArgs) -> FinsightResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let report = GoalsReport::generate(&snapshot.goals, ctx.now)?;
    emit(ctx, &report, &args)
}

pub fn handle_habits_report(ctx: &CliContext, args: OutputArgs) -> FinsightResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let report = HabitsReport::generate(&snapshot.habits, ctx.today())?;
    emit(ctx, &report, &args)
}

pub fn handle_recurring_report(ctx: &CliContext, args: RecurringArgs) -> FinsightResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let report = RecurringReport::generate(
        &snapshot.recurring,
        ctx.today(),
        args.days.unwrap_or(ctx.settings.recurring_horizon_days),
    )?;
    emit(ctx, &report, &args.output)
}

pub fn handle_health_report(ctx: &CliContext, args: HealthArgs) -> FinsightResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let context = HealthContext {
        transactions: &snapshot.transactions,
        budget_categories: &snapshot.budget_categories,
        goals: &snapshot.goals,
        now: ctx.now,
    };

    let scorer: Box<dyn HealthScorer + '_> = match &args.llm_response {
        Some(path) => Box::new(LlmScorer::new(saved_reply(path.clone())).with_records(
            &snapshot.transactions,
            &snapshot.budget_categories,
            &snapshot.goals,
        )),
        None => Box::new(HeuristicScorer::new(ctx.settings.score_weights)),
    };

    let report = HealthReport::generate(&context, scorer.as_ref())?;
    emit(ctx, &report, &args.output)
}
