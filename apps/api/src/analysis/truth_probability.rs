//! Truth-probability aggregation.
//!
//! The returned number is always the local equal-weight average:
//! `clamp(0, 100, (content + fact + source) / 3 × 100)`.
//! An advisory model call with the same framing may run alongside; its
//! answer is logged and never returned.

use tracing::{debug, warn};

use crate::analysis::models::{check_unit_score, AggregateScoreInput, AggregateScoreOutput};
use crate::analysis::prompts::TRUTH_PROBABILITY;
use crate::errors::AppError;
use crate::llm_client::{complete_as, StructuredCompletion};

/// Advisory answers further than this from the local score get a warning.
const ADVISORY_TOLERANCE: f64 = 1.0;

/// Equal-weight average scaled to a percentage, clamped into [0, 100].
/// Total over finite inputs; range checks happen in `calculate_truth_probability`.
pub fn truth_probability_score(input: &AggregateScoreInput) -> f64 {
    let sum = input.content_analysis_score
        + input.fact_verification_score
        + input.source_credibility_score;
    (sum * 100.0 / 3.0).clamp(0.0, 100.0)
}

/// Rejects non-finite or out-of-[0, 1] scores instead of clamping them.
pub fn validate_score_input(input: &AggregateScoreInput) -> Result<(), AppError> {
    [
        ("contentAnalysisScore", input.content_analysis_score),
        ("factVerificationScore", input.fact_verification_score),
        ("sourceCredibilityScore", input.source_credibility_score),
    ]
    .into_iter()
    .try_for_each(|(field, value)| check_unit_score(field, value))
    .map_err(AppError::InvalidScoreInput)
}

/// Validates, computes the local score, then (if `advisor` is set) asks the
/// model for its own figure purely for the log.
pub async fn calculate_truth_probability(
    advisor: Option<&dyn StructuredCompletion>,
    input: AggregateScoreInput,
) -> Result<AggregateScoreOutput, AppError> {
    validate_score_input(&input)?;

    let local = truth_probability_score(&input);

    if let Some(llm) = advisor {
        log_advisory_score(llm, &input, local).await;
    }

    Ok(AggregateScoreOutput {
        truth_probability_score: local,
    })
}

async fn log_advisory_score(llm: &dyn StructuredCompletion, input: &AggregateScoreInput, local: f64) {
    let content = input.content_analysis_score.to_string();
    let fact = input.fact_verification_score.to_string();
    let source = input.source_credibility_score.to_string();

    let advisory = complete_as::<AggregateScoreOutput>(
        llm,
        &TRUTH_PROBABILITY,
        &[
            ("content_analysis_score", content.as_str()),
            ("fact_verification_score", fact.as_str()),
            ("source_credibility_score", source.as_str()),
        ],
    )
    .await;

    match advisory {
        Ok(advice) if (advice.truth_probability_score - local).abs() > ADVISORY_TOLERANCE => {
            warn!(
                local,
                advisory = advice.truth_probability_score,
                "Advisory truth probability disagrees with local score"
            );
        }
        Ok(advice) => {
            debug!(
                local,
                advisory = advice.truth_probability_score,
                "Advisory truth probability agrees with local score"
            );
        }
        Err(e) => warn!("Advisory truth probability call failed: {e}"),
    }
}
