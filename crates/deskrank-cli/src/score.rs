//! `score` command handler.

use deskrank_core::{EngagementFactors, NormalizedFactors, Tuning};
use deskrank_scoring::{CompositeScore, ScoreCalculator};
use serde::Serialize;

/// Where the factors for a `score` run come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScoreInput {
    Raw(EngagementFactors),
    /// Stored per-source scores, re-inflated into pseudo-raw factors.
    Composite { mention_source: u8, view_source: u8 },
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) factors: EngagementFactors,
    pub(crate) normalized: NormalizedFactors,
    pub(crate) score: u8,
}

pub(crate) fn compute(calculator: &ScoreCalculator, input: ScoreInput) -> ScoreReport {
    let factors = match input {
        ScoreInput::Raw(factors) => factors,
        ScoreInput::Composite {
            mention_source,
            view_source,
        } => calculator.factors_from_composite_score(CompositeScore {
            mention_source,
            view_source,
        }),
    };
    let normalized = calculator.normalize(&factors);
    ScoreReport {
        factors,
        normalized,
        score: calculator.score_normalized(&normalized),
    }
}

/// Prints the score report for one product as JSON.
///
/// # Errors
///
/// Returns an error if the scoring tuning is invalid.
pub(crate) fn run_score(tuning: &Tuning, input: ScoreInput) -> anyhow::Result<()> {
    let calculator = ScoreCalculator::new(tuning.scoring.clone())?;
    let report = compute(&calculator, input);
    tracing::debug!(score = report.score, "scored");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
