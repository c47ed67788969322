//! Emotional analysis and transaction categorization from saved model replies

use std::path::PathBuf;

use clap::Args;

use super::{saved_reply, CliContext};
use crate::error::FinsightResult;
use crate::metrics::{compute_health_score_inputs, HealthContext};
use crate::models::Money;
use crate::scoring::prompts::{category_prompt, PromptContext};
use crate::scoring::FinanceAssistant;

#[derive(Args, Debug, Clone)]
pub struct MoodArgs {
    /// Saved reply to `finsight prompt emotional`
    #[arg(long, value_name = "FILE")]
    pub llm_response: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CategorizeArgs {
    /// Transaction description
    pub description: String,

    /// Transaction amount
    #[arg(value_parser = parse_amount)]
    pub amount: Money,

    /// Saved reply to the categorization prompt; without it the prompt is printed
    #[arg(long, value_name = "FILE")]
    pub llm_response: Option<PathBuf>,
}

/// Parse a non-negative decimal amount
pub fn parse_amount(value: &str) -> Result<Money, String> {
    let decimal: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount '{}'", value))?;
    if decimal < 0.0 {
        return Err(format!("amount must not be negative (got {})", value));
    }
    Money::from_decimal(decimal).map_err(|e| e.to_string())
}

pub fn handle_mood_command(ctx: &CliContext, args: MoodArgs) -> FinsightResult<()> {
    let snapshot = ctx.load_snapshot()?;
    let inputs = compute_health_score_inputs(&HealthContext {
        transactions: &snapshot.transactions,
        budget_categories: &snapshot.budget_categories,
        goals: &snapshot.goals,
        now: ctx.now,
    })?;

    let assistant = FinanceAssistant::new(saved_reply(args.llm_response));
    let analysis = assistant.emotional_impact(&PromptContext {
        inputs: &inputs,
        transactions: &snapshot.transactions,
        budget_categories: &snapshot.budget_categories,
        goals: &snapshot.goals,
        week: None,
    })?;

    println!("Tone:      {}", analysis.tone);
    println!("Sentiment: {:+.2}", analysis.sentiment);
    println!();
    println!("{}", analysis.message);
    Ok(())
}

pub fn handle_categorize_command(_ctx: &CliContext, args: CategorizeArgs) -> FinsightResult<()> {
    match args.llm_response {
        Some(path) => {
            let assistant = FinanceAssistant::new(saved_reply(path));
            println!("{}", assistant.categorize(&args.description, args.amount));
        }
        None => println!("{}", category_prompt(&args.description, args.amount)),
    }
    Ok(())
}
