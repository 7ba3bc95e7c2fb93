//! Content-integrity analyzer: clickbait, emotional exaggeration and
//! semantic incoherence. Independent of the article analyzer.

use tracing::info;

use crate::analysis::models::{ArticleInput, ContentIntegrityResult};
use crate::analysis::prompts::CONTENT_INTEGRITY;
use crate::errors::AppError;
use crate::llm_client::{complete_as, StructuredCompletion};

pub async fn assess_content_integrity(
    llm: &dyn StructuredCompletion,
    input: &ArticleInput,
) -> Result<ContentIntegrityResult, AppError> {
    let result: ContentIntegrityResult = complete_as(
        llm,
        &CONTENT_INTEGRITY,
        &[
            ("headline", input.headline.as_str()),
            ("content", input.content.as_str()),
        ],
    )
    .await?;

    info!(
        clickbait = result.clickbait_score,
        exaggeration = result.emotional_exaggeration_score,
        incoherence = result.semantic_incoherence_score,
        "Content integrity assessed"
    );

    Ok(result)
}
