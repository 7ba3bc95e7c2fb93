//! Article analyzer: one structured completion per submitted article.

use tracing::info;

use crate::analysis::models::{AnalysisResult, ArticleInput};
use crate::analysis::prompts::ARTICLE_ANALYSIS;
use crate::errors::AppError;
use crate::llm_client::{complete_as, StructuredCompletion};

/// Scores an article. The headline and content are embedded verbatim.
/// No retry here; provider-level retries live in the client.
pub async fn analyze_article(
    llm: &dyn StructuredCompletion,
    input: &ArticleInput,
) -> Result<AnalysisResult, AppError> {
    let result: AnalysisResult = complete_as(
        llm,
        &ARTICLE_ANALYSIS,
        &[
            ("headline", input.headline.as_str()),
            ("content", input.content.as_str()),
        ],
    )
    .await?;

    info!(
        truth_score = result.truth_score,
        red_flags = result.red_flags.len(),
        "Article analysis complete"
    );

    Ok(result)
}
