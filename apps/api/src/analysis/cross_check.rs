//! Cross-check analyzer. The model reasons as if it had consulted fact-check
//! references; no external lookup is made here.

use tracing::info;

use crate::analysis::models::{ArticleInput, CrossCheckResult};
use crate::analysis::prompts::CROSS_CHECK;
use crate::errors::AppError;
use crate::llm_client::{complete_as, StructuredCompletion};

pub async fn cross_check_content(
    llm: &dyn StructuredCompletion,
    input: &ArticleInput,
) -> Result<CrossCheckResult, AppError> {
    let result: CrossCheckResult = complete_as(
        llm,
        &CROSS_CHECK,
        &[
            ("headline", input.headline.as_str()),
            ("content", input.content.as_str()),
        ],
    )
    .await?;

    info!(
        confidence = result.confidence_level,
        red_flags = result.red_flags.len(),
        "Cross-check complete"
    );

    Ok(result)
}
