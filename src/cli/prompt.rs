//! Print language-model prompts built from the current snapshot
//!
//! The output can be piped to any model; a saved reply to the `health`
//! prompt is accepted by `finsight health --llm-response`, and a reply to
//! the `emotional` prompt by `finsight mood --llm-response`.

use clap::Args;

use super::CliContext;
use crate::error::FinsightResult;
use crate::metrics::{
    compute_health_score_inputs, compute_window_spending_with_top, HealthContext,
};
use crate::scoring::prompts::{PromptContext, PromptKind, WEEKLY_WINDOW_DAYS};

#[derive(Args, Debug, Clone)]
pub struct PromptArgs {
    /// Which prompt to build
    #[arg(value_enum)]
    pub kind: PromptKind,
}

pub fn handle_prompt_command(ctx: &CliContext, args: PromptArgs) -> FinsightResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let inputs = compute_health_score_inputs(&HealthContext {
        transactions: &snapshot.transactions,
        budget_categories: &snapshot.budget_categories,
        goals: &snapshot.goals,
        now: ctx.now,
    })?;
    let week = compute_window_spending_with_top(
        &snapshot.transactions,
        ctx.now,
        WEEKLY_WINDOW_DAYS,
        ctx.settings.top_categories,
    )?;

    let prompt = PromptContext {
        inputs: &inputs,
        transactions: &snapshot.transactions,
        budget_categories: &snapshot.budget_categories,
        goals: &snapshot.goals,
        week: Some(&week),
    }
    .build(args.kind)?;

    println!("{}", prompt);
    Ok(())
}
