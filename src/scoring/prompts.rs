//! Prompt builders for language-model backends
//!
//! Prompts embed the engine's own numbers so the model never has to do
//! arithmetic over raw records. Only the most recent transactions are
//! included, serialized as JSON.

use serde::Serialize;

use crate::error::{FinsightError, FinsightResult};
use crate::metrics::{HealthScoreInputs, WindowSpending};
use crate::models::{BudgetCategory, FinancialGoal, Money, Transaction};

/// How many of the latest transactions a prompt includes
pub const RECENT_TRANSACTION_LIMIT: usize = 10;

/// Window covered by the weekly summary
pub const WEEKLY_WINDOW_DAYS: u32 = 7;

/// Categories a model may assign to a transaction
pub const TRANSACTION_CATEGORIES: [&str; 11] = [
    "Food & Dining",
    "Transportation",
    "Housing",
    "Utilities",
    "Entertainment",
    "Shopping",
    "Health & Medical",
    "Education",
    "Personal Care",
    "Income",
    "Other",
];

/// Data shared by every prompt
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub inputs: &'a HealthScoreInputs,
    pub transactions: &'a [Transaction],
    pub budget_categories: &'a [BudgetCategory],
    pub goals: &'a [FinancialGoal],
    /// Spending over the last [`WEEKLY_WINDOW_DAYS`]; only the weekly
    /// summary needs it
    pub week: Option<&'a WindowSpending>,
}

/// Which prompt to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PromptKind {
    /// Spending patterns and observations
    Insights,
    /// Concrete next steps
    Advice,
    /// Structured JSON health score
    #[value(name = "health")]
    HealthScore,
    /// Review of the last seven days
    #[value(name = "weekly")]
    WeeklySummary,
    /// Structured JSON emotional tone and supportive message
    #[value(name = "emotional")]
    EmotionalImpact,
}

impl PromptContext<'_> {
    pub fn build(&self, kind: PromptKind) -> FinsightResult<String> {
        match kind {
            PromptKind::Insights => insights_prompt(self),
            PromptKind::Advice => advice_prompt(self),
            PromptKind::HealthScore => health_score_prompt(self),
            PromptKind::WeeklySummary => weekly_summary_prompt(self),
            PromptKind::EmotionalImpact => emotional_impact_prompt(self),
        }
    }
}

/// Latest transactions first, capped at [`RECENT_TRANSACTION_LIMIT`]
fn recent_transactions(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(RECENT_TRANSACTION_LIMIT);
    sorted
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> FinsightResult<String> {
    Ok(serde_json::to_string(value)?)
}

fn optional_percent(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.1}%", v * 100.0))
}

fn numbers_block(context: &PromptContext<'_>) -> String {
    let inputs = context.inputs;
    format!(
        "Monthly Income: {}\n\
         Monthly Expenses: {}\n\
         Spending Ratio: {}\n\
         Savings Rate: {}\n\
         Budget Utilization: {:.1}%\n\
         Budget Adherence: {}\n\
         Average Goal Progress: {}",
        inputs.monthly_income,
        inputs.monthly_expenses,
        optional_percent(inputs.spending_ratio),
        optional_percent(inputs.savings_rate),
        inputs.budget_utilization_percent,
        optional_percent(inputs.budget_adherence),
        optional_percent(inputs.goal_progress_average),
    )
}

fn records_block(context: &PromptContext<'_>) -> FinsightResult<String> {
    Ok(format!(
        "Recent Transactions: {}\nBudget Categories: {}\nFinancial Goals: {}",
        to_json(&recent_transactions(context.transactions))?,
        to_json(context.budget_categories)?,
        to_json(context.goals)?,
    ))
}

/// Free-text analysis of spending patterns and goals
pub fn insights_prompt(context: &PromptContext<'_>) -> FinsightResult<String> {
    Ok(format!(
        "Analyze the following financial data and provide insights.\n\n\
         {}\n{}\n\n\
         Please provide:\n\
         1. Spending patterns and trends\n\
         2. Budget utilization analysis\n\
         3. Progress towards financial goals\n\
         4. Recommendations for improvement\n\
         5. Potential savings opportunities\n\n\
         Use a friendly, encouraging tone.",
        numbers_block(context),
        records_block(context)?,
    ))
}

/// Personalized short- and long-term advice
pub fn advice_prompt(context: &PromptContext<'_>) -> FinsightResult<String> {
    Ok(format!(
        "Based on the following financial data, provide personalized advice.\n\n\
         {}\n{}\n\n\
         Please provide:\n\
         1. Short-term actionable advice\n\
         2. Long-term financial planning suggestions\n\
         3. Specific steps to reach each financial goal\n\
         4. Potential risks and how to mitigate them\n\n\
         Use a warm, supportive tone.",
        numbers_block(context),
        records_block(context)?,
    ))
}

/// Structured health score; the response is parsed by
/// [`super::parse_health_score`]
pub fn health_score_prompt(context: &PromptContext<'_>) -> FinsightResult<String> {
    Ok(format!(
        "Calculate a financial health score based on the following data.\n\n\
         {}\n{}\n\n\
         Provide an overall score (0-100), a 0-100 score for each of spending habits, \
         savings rate, budget adherence and goal progress, and specific recommendations.\n\n\
         Respond with JSON only, using this structure:\n\
         {{\n  \"score\": number,\n  \"breakdown\": {{\n    \"spending\": number,\n    \
         \"savings\": number,\n    \"budgeting\": number,\n    \"goals\": number\n  }},\n  \
         \"recommendations\": string[]\n}}",
        numbers_block(context),
        records_block(context)?,
    ))
}

fn week_block(week: &WindowSpending) -> FinsightResult<String> {
    Ok(format!(
        "Spent in the last {} days: {}\nDaily Average: {:.2}\nTop Categories: {}",
        week.window_days,
        week.total_spent,
        week.daily_average,
        to_json(&week.top_categories)?,
    ))
}

/// Friendly review of the past week
pub fn weekly_summary_prompt(context: &PromptContext<'_>) -> FinsightResult<String> {
    let week = context.week.ok_or_else(|| {
        FinsightError::InvalidInput(format!(
            "weekly summary needs spending for the last {} days",
            WEEKLY_WINDOW_DAYS
        ))
    })?;

    Ok(format!(
        "Generate a weekly financial summary based on the following data.\n\n\
         {}\n{}\n{}\n\n\
         Include:\n\
         1. Weekly spending overview\n\
         2. Budget progress\n\
         3. Goal achievements\n\
         4. Positive highlights\n\
         5. Areas for improvement\n\
         6. An encouraging message\n\n\
         Use a friendly, motivational tone.",
        numbers_block(context),
        week_block(week)?,
        records_block(context)?,
    ))
}

/// Emotional tone of recent decisions; the response is parsed by
/// [`super::assistant::parse_emotional_analysis`]
pub fn emotional_impact_prompt(context: &PromptContext<'_>) -> FinsightResult<String> {
    Ok(format!(
        "Analyze the emotional impact of these financial decisions.\n\n\
         {}\n{}\n\n\
         Provide the overall emotional tone (positive, neutral or concerned), \
         a sentiment score from -1 to 1, and a short supportive message.\n\n\
         Respond with JSON only, using this structure:\n\
         {{\n  \"tone\": \"positive\" | \"neutral\" | \"concerned\",\n  \
         \"sentiment\": number,\n  \"message\": string\n}}",
        numbers_block(context),
        records_block(context)?,
    ))
}

/// Ask for one category from [`TRANSACTION_CATEGORIES`]
pub fn category_prompt(description: &str, amount: Money) -> String {
    let choices: Vec<String> = TRANSACTION_CATEGORIES
        .iter()
        .map(|c| format!("- {}", c))
        .collect();
    format!(
        "Categorize this transaction.\n\
         Description: {}\n\
         Amount: {}\n\n\
         Answer with exactly one of these categories and nothing else:\n{}",
        description.trim(),
        amount,
        choices.join("\n")
    )
}
