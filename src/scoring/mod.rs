//! Pluggable health scoring
//!
//! The metrics engine produces [`HealthScoreInputs`]; a [`HealthScorer`]
//! turns them into a 0-100 score with a per-area breakdown and
//! recommendations. Backends are swappable without touching the engine:
//!
//! - [`HeuristicScorer`]: local weighted formula, no external calls
//! - [`LlmScorer`]: builds a prompt, hands it to an injected
//!   [`TextGenerator`] and validates the JSON that comes back
//!
//! [`FinanceAssistant`] reuses the same generator seam for free-text
//! insights, advice and weekly summaries, emotional analysis and
//! transaction categorization.
//!
//! # Usage
//!
//! ```rust,ignore
//! let inputs = compute_health_score_inputs(&context)?;
//! let score = HeuristicScorer::default().score_from_inputs(&inputs)?;
//! println!("{} / 100", score.score);
//! ```

pub mod assistant;
pub mod heuristic;
pub mod llm;
pub mod prompts;

pub use assistant::{
    parse_emotional_analysis, EmotionalAnalysis, EmotionalTone, FinanceAssistant,
    FALLBACK_CATEGORY,
};
pub use heuristic::HeuristicScorer;
pub use llm::{parse_health_score, LlmScorer, TextGenerator};

use serde::{Deserialize, Serialize};

use crate::error::{FinsightError, FinsightResult};
use crate::metrics::HealthScoreInputs;

/// Per-area scores, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub spending: u8,
    pub savings: u8,
    pub budgeting: u8,
    pub goals: u8,
}

/// A scored financial health assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    /// Overall score, 0-100
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub recommendations: Vec<String>,
}

/// Relative weight of each area in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub spending: f64,
    pub savings: f64,
    pub budgeting: f64,
    pub goals: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            spending: 0.25,
            savings: 0.25,
            budgeting: 0.25,
            goals: 0.25,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.spending + self.savings + self.budgeting + self.goals
    }

    /// Weights must be finite, non-negative and not all zero
    pub fn validate(&self) -> FinsightResult<()> {
        let all = [self.spending, self.savings, self.budgeting, self.goals];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(FinsightError::Config(
                "score weights must be finite and non-negative".into(),
            ));
        }
        if self.total() <= 0.0 {
            return Err(FinsightError::Config(
                "at least one score weight must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// A backend that scores health inputs
pub trait HealthScorer {
    /// Short backend name for logs and reports
    fn name(&self) -> &str;

    /// Score validated inputs
    fn score_from_inputs(&self, inputs: &HealthScoreInputs) -> FinsightResult<HealthScore>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoreWeights::default();
        assert_eq!(weights.total(), 1.0);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_invalid_weights() {
        let negative = ScoreWeights {
            spending: -1.0,
            ..ScoreWeights::default()
        };
        assert!(negative.validate().is_err());

        let zero = ScoreWeights {
            spending: 0.0,
            savings: 0.0,
            budgeting: 0.0,
            goals: 0.0,
        };
        assert!(zero.validate().is_err());
    }
}
