//! Local heuristic scorer
//!
//! Each area maps its ratio onto 0-100 linearly; an area with no data
//! scores a neutral 50. The overall score is the weighted mean.

use super::{HealthScore, HealthScorer, ScoreBreakdown, ScoreWeights};
use crate::error::FinsightResult;
use crate::metrics::HealthScoreInputs;

const NEUTRAL: f64 = 50.0;

/// Savings rate that earns a full savings score
const TARGET_SAVINGS_RATE: f64 = 0.2;

/// Weighted formula scorer
#[derive(Debug, Clone, Default)]
pub struct HeuristicScorer {
    weights: ScoreWeights,
}

impl HeuristicScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    fn spending_score(ratio: Option<f64>) -> f64 {
        // 50% of income spent or less is perfect, 100% or more is zero
        ratio.map_or(NEUTRAL, |r| ((1.0 - r) * 200.0).clamp(0.0, 100.0))
    }

    fn savings_score(rate: Option<f64>) -> f64 {
        rate.map_or(NEUTRAL, |s| (s / TARGET_SAVINGS_RATE * 100.0).clamp(0.0, 100.0))
    }

    fn unit_score(value: Option<f64>) -> f64 {
        value.map_or(NEUTRAL, |v| (v * 100.0).clamp(0.0, 100.0))
    }

    fn recommendations(inputs: &HealthScoreInputs) -> Vec<String> {
        let mut out = Vec::new();

        match inputs.spending_ratio {
            None => out.push(
                "Record your income so spending and savings can be measured against it."
                    .to_string(),
            ),
            Some(r) if r > 0.9 => out.push(
                "Your expenses are close to or above your income. Look for recurring costs you can cut."
                    .to_string(),
            ),
            _ => {}
        }
        if let Some(s) = inputs.savings_rate {
            if s < 0.1 {
                out.push("Aim to set aside at least 10% of your income each month.".to_string());
            }
        }
        if let Some(a) = inputs.budget_adherence {
            if a < 1.0 {
                out.push(
                    "Some budget categories are over their limit. Revisit those limits or trim spending there."
                        .to_string(),
                );
            }
        }
        if let Some(g) = inputs.goal_progress_average {
            if g < 0.5 {
                out.push(
                    "Your goals are less than halfway funded on average. An automatic transfer after payday helps."
                        .to_string(),
                );
            }
        }
        if out.is_empty() {
            out.push("Great work. Keep your current habits going.".to_string());
        }
        out
    }
}

impl HealthScorer for HeuristicScorer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn score_from_inputs(&self, inputs: &HealthScoreInputs) -> FinsightResult<HealthScore> {
        inputs.validate()?;
        self.weights.validate()?;

        let spending = Self::spending_score(inputs.spending_ratio);
        let savings = Self::savings_score(inputs.savings_rate);
        let budgeting = Self::unit_score(inputs.budget_adherence);
        let goals = Self::unit_score(inputs.goal_progress_average);

        let w = &self.weights;
        let overall = (spending * w.spending
            + savings * w.savings
            + budgeting * w.budgeting
            + goals * w.goals)
            / w.total();

        Ok(HealthScore {
            score: overall.round() as u8,
            breakdown: ScoreBreakdown {
                spending: spending.round() as u8,
                savings: savings.round() as u8,
                budgeting: budgeting.round() as u8,
                goals: goals.round() as u8,
            },
            recommendations: Self::recommendations(inputs),
        })
    }
}
