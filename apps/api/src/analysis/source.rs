//! Source credibility analyzer. The reliability verdict is an open string.

use tracing::info;

use crate::analysis::models::{SourceCredibilityInput, SourceCredibilityResult};
use crate::analysis::prompts::SOURCE_CREDIBILITY;
use crate::errors::AppError;
use crate::llm_client::{complete_as, StructuredCompletion};

pub async fn assess_source_credibility(
    llm: &dyn StructuredCompletion,
    input: &SourceCredibilityInput,
) -> Result<SourceCredibilityResult, AppError> {
    let source_name = input.source_name.trim();
    if source_name.is_empty() {
        return Err(AppError::field("sourceName", "Source name is required."));
    }

    let result: SourceCredibilityResult =
        complete_as(llm, &SOURCE_CREDIBILITY, &[("source_name", source_name)]).await?;

    info!(
        source = source_name,
        score = result.credibility_score,
        verdict = %result.reliability_verdict,
        "Source credibility assessed"
    );

    Ok(result)
}
