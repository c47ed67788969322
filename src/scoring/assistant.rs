//! Free-text coaching and transaction categorization
//!
//! Like [`super::LlmScorer`], the assistant never talks to a vendor
//! directly; every request goes through an injected [`TextGenerator`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::llm::{excerpt, parse_json_reply};
use super::prompts::{category_prompt, PromptContext, PromptKind, TRANSACTION_CATEGORIES};
use super::TextGenerator;
use crate::error::{FinsightError, FinsightResult};
use crate::models::Money;

/// Category used when the model fails or answers off-list
pub const FALLBACK_CATEGORY: &str = "Other";

/// Overall emotional tone of recent financial decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalTone {
    Positive,
    Neutral,
    Concerned,
}

impl fmt::Display for EmotionalTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmotionalTone::Positive => write!(f, "positive"),
            EmotionalTone::Neutral => write!(f, "neutral"),
            EmotionalTone::Concerned => write!(f, "concerned"),
        }
    }
}

impl FromStr for EmotionalTone {
    type Err = FinsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(EmotionalTone::Positive),
            "neutral" => Ok(EmotionalTone::Neutral),
            "concerned" => Ok(EmotionalTone::Concerned),
            other => Err(FinsightError::Scoring(format!(
                "'tone' must be positive, neutral or concerned (got '{}')",
                other
            ))),
        }
    }
}

/// Validated reply to the emotional impact prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionalAnalysis {
    pub tone: EmotionalTone,
    /// -1 (distressing) to 1 (encouraging)
    pub sentiment: f64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct RawEmotionalAnalysis {
    tone: String,
    sentiment: f64,
    message: String,
}

/// Extract and validate an emotional analysis from free-form model output
pub fn parse_emotional_analysis(response: &str) -> FinsightResult<EmotionalAnalysis> {
    let raw: RawEmotionalAnalysis = parse_json_reply(response)?;

    if !raw.sentiment.is_finite() || !(-1.0..=1.0).contains(&raw.sentiment) {
        return Err(FinsightError::Scoring(format!(
            "'sentiment' must be between -1 and 1 (got {})",
            raw.sentiment
        )));
    }

    let message = raw.message.trim();
    if message.is_empty() {
        return Err(FinsightError::Scoring("'message' must not be empty".into()));
    }

    Ok(EmotionalAnalysis {
        tone: raw.tone.parse()?,
        sentiment: raw.sentiment,
        message: message.to_string(),
    })
}

/// Map a model reply onto one of [`TRANSACTION_CATEGORIES`]
///
/// An exact (case-insensitive) answer wins; otherwise the first listed
/// category named anywhere in the reply.
pub fn match_category(response: &str) -> Option<&'static str> {
    let cleaned = response
        .trim()
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '`' | '*' | '.'))
        .to_lowercase();
    if cleaned.is_empty() {
        return None;
    }

    TRANSACTION_CATEGORIES
        .iter()
        .find(|c| c.to_lowercase() == cleaned)
        .or_else(|| {
            TRANSACTION_CATEGORIES
                .iter()
                .find(|c| cleaned.contains(&c.to_lowercase()))
        })
        .copied()
}

/// Insights, advice, weekly summaries, emotional analysis and
/// categorization through one generator
pub struct FinanceAssistant<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> FinanceAssistant<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn insights(&self, context: &PromptContext<'_>) -> FinsightResult<String> {
        self.text_reply(context, PromptKind::Insights)
    }

    pub fn advice(&self, context: &PromptContext<'_>) -> FinsightResult<String> {
        self.text_reply(context, PromptKind::Advice)
    }

    /// Requires `context.week`
    pub fn weekly_summary(&self, context: &PromptContext<'_>) -> FinsightResult<String> {
        self.text_reply(context, PromptKind::WeeklySummary)
    }

    pub fn emotional_impact(
        &self,
        context: &PromptContext<'_>,
    ) -> FinsightResult<EmotionalAnalysis> {
        let prompt = context.build(PromptKind::EmotionalImpact)?;
        let response = self.generator.generate(&prompt)?;
        parse_emotional_analysis(&response)
    }

    /// Never fails: generator errors and off-list answers become
    /// [`FALLBACK_CATEGORY`]
    pub fn categorize(&self, description: &str, amount: Money) -> &'static str {
        let response = match self.generator.generate(&category_prompt(description, amount)) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "categorization failed, using fallback");
                return FALLBACK_CATEGORY;
            }
        };

        match match_category(&response) {
            Some(category) => {
                tracing::debug!(category, "categorized transaction");
                category
            }
            None => {
                tracing::warn!(reply = %excerpt(response.trim()), "unrecognized category");
                FALLBACK_CATEGORY
            }
        }
    }

    fn text_reply(&self, context: &PromptContext<'_>, kind: PromptKind) -> FinsightResult<String> {
        let prompt = context.build(kind)?;
        tracing::debug!(?kind, len = prompt.len(), "requesting text reply");

        let response = self.generator.generate(&prompt)?;
        let response = response.trim();
        if response.is_empty() {
            return Err(FinsightError::Scoring(format!(
                "Empty response to {:?} prompt",
                kind
            )));
        }
        Ok(response.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::HealthScoreInputs;
    use std::cell::RefCell;

    fn inputs() -> HealthScoreInputs {
        HealthScoreInputs {
            monthly_income: Money::from_dollars(4000),
            monthly_expenses: Money::from_dollars(3000),
            spending_ratio: Some(0.75),
            savings_rate: Some(0.25),
            budget_adherence: None,
            budget_utilization_percent: 0.0,
            goal_progress_average: None,
        }
    }

    fn context(inputs: &HealthScoreInputs) -> PromptContext<'_> {
        PromptContext {
            inputs,
            transactions: &[],
            budget_categories: &[],
            goals: &[],
            week: None,
        }
    }

    #[test]
    fn test_parse_emotional_analysis() {
        let analysis = parse_emotional_analysis(
            "```json\n{\"tone\": \"Positive\", \"sentiment\": 0.6, \
             \"message\": \"  Nice work saving this month.  \"}\n```",
        )
        .unwrap();
        assert_eq!(analysis.tone, EmotionalTone::Positive);
        assert!((analysis.sentiment - 0.6).abs() < 1e-9);
        assert_eq!(analysis.message, "Nice work saving this month.");
    }

    #[test]
    fn test_parse_emotional_analysis_rejects_out_of_range() {
        let err = parse_emotional_analysis(
            r#"{"tone": "concerned", "sentiment": -1.5, "message": "Hang in there"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("between -1 and 1"));

        let err = parse_emotional_analysis(
            r#"{"tone": "anxious", "sentiment": -0.2, "message": "Hang in there"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("'tone'"));

        let err = parse_emotional_analysis(
            r#"{"tone": "neutral", "sentiment": 0, "message": "   "}"#,
        )
        .unwrap_err();
        assert!(matches!(err, FinsightError::Scoring(_)));
    }

    #[test]
    fn test_parse_emotional_analysis_rejects_missing_json() {
        let err = parse_emotional_analysis("You're doing fine!").unwrap_err();
        assert!(err.to_string().contains("No JSON found"));
    }

    #[test]
    fn test_match_category() {
        assert_eq!(match_category("Transportation"), Some("Transportation"));
        assert_eq!(match_category("  \"food & dining\".\n"), Some("Food & Dining"));
        assert_eq!(
            match_category("Category: **Health & Medical**"),
            Some("Health & Medical")
        );
        assert_eq!(match_category("Groceries"), None);
        assert_eq!(match_category("   "), None);
    }

    #[test]
    fn test_categorize_uses_listed_category() {
        let seen = RefCell::new(String::new());
        let generator = |prompt: &str| -> FinsightResult<String> {
            *seen.borrow_mut() = prompt.to_string();
            Ok("Utilities\n".to_string())
        };
        let assistant = FinanceAssistant::new(generator);

        assert_eq!(
            assistant.categorize("Electric bill", Money::from_dollars(80)),
            "Utilities"
        );
        assert!(seen.borrow().contains("Description: Electric bill"));
    }

    #[test]
    fn test_categorize_falls_back_to_other() {
        let off_list = FinanceAssistant::new(|_: &str| -> FinsightResult<String> {
            Ok("Groceries".to_string())
        });
        assert_eq!(off_list.categorize("Market", Money::from_dollars(20)), FALLBACK_CATEGORY);

        let offline = FinanceAssistant::new(|_: &str| -> FinsightResult<String> {
            Err(FinsightError::Scoring("offline".into()))
        });
        assert_eq!(offline.categorize("Market", Money::from_dollars(20)), "Other");
    }

    #[test]
    fn test_text_replies_are_trimmed() {
        let assistant = FinanceAssistant::new(|prompt: &str| -> FinsightResult<String> {
            Ok(format!("  {} words  ", prompt.split_whitespace().count()))
        });
        let inputs = inputs();
        let advice = assistant.advice(&context(&inputs)).unwrap();
        assert!(advice.ends_with("words"));
        assert!(!advice.starts_with(' '));
    }

    #[test]
    fn test_weekly_summary_without_week_fails_before_generating() {
        let calls = RefCell::new(0);
        let assistant = FinanceAssistant::new(|_: &str| -> FinsightResult<String> {
            *calls.borrow_mut() += 1;
            Ok("summary".to_string())
        });
        let inputs = inputs();
        let err = assistant.weekly_summary(&context(&inputs)).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_empty_reply_is_an_error() {
        let assistant =
            FinanceAssistant::new(|_: &str| -> FinsightResult<String> { Ok("\n  ".to_string()) });
        let inputs = inputs();
        let err = assistant.insights(&context(&inputs)).unwrap_err();
        assert!(err.to_string().contains("Empty response"));
    }

    #[test]
    fn test_emotional_impact_through_generator() {
        let assistant = FinanceAssistant::new(|prompt: &str| -> FinsightResult<String> {
            assert!(prompt.contains("emotional impact"));
            Ok(r#"{"tone": "neutral", "sentiment": 0.1, "message": "Steady month."}"#.to_string())
        });
        let inputs = inputs();
        let analysis = assistant.emotional_impact(&context(&inputs)).unwrap();
        assert_eq!(analysis.tone, EmotionalTone::Neutral);
        assert_eq!(analysis.tone.to_string(), "neutral");
    }
}
