//! Language-model scoring adapter
//!
//! No vendor client lives in this crate. The caller injects a
//! [`TextGenerator`]; the scorer builds the prompt, calls it, and parses the
//! reply. Models tend to wrap JSON in prose or code fences, so the first
//! `{` through the last `}` is taken as the payload.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::prompts::{health_score_prompt, PromptContext};
use super::{HealthScore, HealthScorer, ScoreBreakdown};
use crate::error::{FinsightError, FinsightResult};
use crate::metrics::HealthScoreInputs;
use crate::models::{BudgetCategory, FinancialGoal, Transaction};

/// Longest slice of a raw response quoted in an error message
const RAW_EXCERPT_LEN: usize = 200;

/// Anything that turns a prompt into text
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> FinsightResult<String>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> FinsightResult<String>,
{
    fn generate(&self, prompt: &str) -> FinsightResult<String> {
        self(prompt)
    }
}

/// Scores through an injected text generator
pub struct LlmScorer<'a, G: TextGenerator> {
    generator: G,
    transactions: &'a [Transaction],
    budget_categories: &'a [BudgetCategory],
    goals: &'a [FinancialGoal],
}

impl<G: TextGenerator> LlmScorer<'static, G> {
    /// A scorer whose prompts carry only the computed numbers
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            transactions: &[],
            budget_categories: &[],
            goals: &[],
        }
    }
}

impl<'a, G: TextGenerator> LlmScorer<'a, G> {
    /// Include the raw records alongside the numbers in the prompt
    pub fn with_records<'b>(
        self,
        transactions: &'b [Transaction],
        budget_categories: &'b [BudgetCategory],
        goals: &'b [FinancialGoal],
    ) -> LlmScorer<'b, G> {
        LlmScorer {
            generator: self.generator,
            transactions,
            budget_categories,
            goals,
        }
    }
}

impl<G: TextGenerator> HealthScorer for LlmScorer<'_, G> {
    fn name(&self) -> &str {
        "llm"
    }

    fn score_from_inputs(&self, inputs: &HealthScoreInputs) -> FinsightResult<HealthScore> {
        inputs.validate()?;

        let prompt = health_score_prompt(&PromptContext {
            inputs,
            transactions: self.transactions,
            budget_categories: self.budget_categories,
            goals: self.goals,
            week: None,
        })?;
        tracing::debug!(len = prompt.len(), "requesting health score");

        let response = self.generator.generate(&prompt)?;
        let score = parse_health_score(&response)?;

        tracing::debug!(score = score.score, "parsed health score");
        Ok(score)
    }
}

/// Wire shape before range checks; models sometimes answer with decimals
#[derive(Debug, Deserialize)]
struct RawBreakdown {
    spending: f64,
    savings: f64,
    budgeting: f64,
    goals: f64,
}

#[derive(Debug, Deserialize)]
struct RawHealthScore {
    score: f64,
    breakdown: RawBreakdown,
    #[serde(default)]
    recommendations: Vec<String>,
}

pub(crate) fn excerpt(text: &str) -> String {
    if text.chars().count() > RAW_EXCERPT_LEN {
        let cut: String = text.chars().take(RAW_EXCERPT_LEN).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn to_score(field: &str, value: f64) -> FinsightResult<u8> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(FinsightError::Scoring(format!(
            "'{}' must be between 0 and 100 (got {})",
            field, value
        )));
    }
    Ok(value.round() as u8)
}

/// Deserialize the first `{` through the last `}` of a model reply
pub(crate) fn parse_json_reply<T: DeserializeOwned>(response: &str) -> FinsightResult<T> {
    let response = response.trim();
    let start = response.find('{');
    let end = response.rfind('}');

    let json_str = match (start, end) {
        (Some(s), Some(e)) if s < e => &response[s..=e],
        _ => {
            return Err(FinsightError::Scoring(format!(
                "No JSON found in response | Raw: {}",
                excerpt(response)
            )))
        }
    };

    serde_json::from_str(json_str).map_err(|e| {
        FinsightError::Scoring(format!("Invalid JSON: {} | Raw: {}", e, excerpt(json_str)))
    })
}

/// Extract and validate a health score from free-form model output
pub fn parse_health_score(response: &str) -> FinsightResult<HealthScore> {
    let raw: RawHealthScore = parse_json_reply(response)?;

    let recommendations = raw
        .recommendations
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();

    Ok(HealthScore {
        score: to_score("score", raw.score)?,
        breakdown: ScoreBreakdown {
            spending: to_score("breakdown.spending", raw.breakdown.spending)?,
            savings: to_score("breakdown.savings", raw.breakdown.savings)?,
            budgeting: to_score("breakdown.budgeting", raw.breakdown.budgeting)?,
            goals: to_score("breakdown.goals", raw.breakdown.goals)?,
        },
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use std::cell::RefCell;

    const VALID: &str = r#"{"score": 72, "breakdown": {"spending": 60, "savings": 80,
        "budgeting": 70, "goals": 78}, "recommendations": ["Cut dining out", "  "]}"#;

    fn inputs() -> HealthScoreInputs {
        HealthScoreInputs {
            monthly_income: Money::from_dollars(4000),
            monthly_expenses: Money::from_dollars(3000),
            spending_ratio: Some(0.75),
            savings_rate: Some(0.25),
            budget_adherence: Some(1.0),
            budget_utilization_percent: 50.0,
            goal_progress_average: None,
        }
    }

    #[test]
    fn test_parse_wrapped_json() {
        let response = format!("Here is your score:\n```json\n{}\n```\nGood luck!", VALID);
        let score = parse_health_score(&response).unwrap();
        assert_eq!(score.score, 72);
        assert_eq!(score.breakdown.savings, 80);
        assert_eq!(score.recommendations, vec!["Cut dining out".to_string()]);
    }

    #[test]
    fn test_parse_rounds_decimals() {
        let score = parse_health_score(
            r#"{"score": 64.6, "breakdown": {"spending": 50, "savings": 50.4, "budgeting": 0, "goals": 100}}"#,
        )
        .unwrap();
        assert_eq!(score.score, 65);
        assert_eq!(score.breakdown.savings, 50);
        assert!(score.recommendations.is_empty());
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        let err = parse_health_score(
            r#"{"score": 140, "breakdown": {"spending": 50, "savings": 50, "budgeting": 50, "goals": 50}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FinsightError::Scoring(_)));
    }

    #[test]
    fn test_parse_rejects_missing_json() {
        let err = parse_health_score("I cannot help with that.").unwrap_err();
        assert!(err.to_string().contains("No JSON found"));

        let err = parse_health_score(r#"{"score": 50}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }

    #[test]
    fn test_scorer_calls_generator_with_prompt() {
        let seen = RefCell::new(String::new());
        let generator = |prompt: &str| -> FinsightResult<String> {
            *seen.borrow_mut() = prompt.to_string();
            Ok(VALID.to_string())
        };

        let score = LlmScorer::new(generator).score_from_inputs(&inputs()).unwrap();
        assert_eq!(score.score, 72);
        assert!(seen.borrow().contains("Monthly Income: $4000.00"));
    }

    #[test]
    fn test_generator_error_propagates() {
        let generator =
            |_: &str| -> FinsightResult<String> { Err(FinsightError::Scoring("offline".into())) };
        let err = LlmScorer::new(generator).score_from_inputs(&inputs()).unwrap_err();
        assert!(err.to_string().contains("offline"));
    }
}
