//! Axum route handlers for the analyzer API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::analysis::article::analyze_article;
use crate::analysis::cross_check::cross_check_content;
use crate::analysis::integrity::assess_content_integrity;
use crate::analysis::models::{
    AggregateScoreInput, AggregateScoreOutput, AnalysisResult, ContentIntegrityResult,
    CrossCheckResult, SourceCredibilityInput, SourceCredibilityResult,
};
use crate::analysis::source::assess_source_credibility;
use crate::analysis::truth_probability::calculate_truth_probability;
use crate::errors::AppError;
use crate::state::AppState;
use crate::submission::RawArticle;

/// POST /api/v1/analysis/article
pub async fn handle_analyze_article(
    State(state): State<AppState>,
    payload: Result<Json<RawArticle>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let Json(raw) = payload?;
    let input = raw.validate()?;
    Ok(Json(analyze_article(state.llm.as_ref(), &input).await?))
}

/// POST /api/v1/analysis/content-integrity
pub async fn handle_content_integrity(
    State(state): State<AppState>,
    payload: Result<Json<RawArticle>, JsonRejection>,
) -> Result<Json<ContentIntegrityResult>, AppError> {
    let Json(raw) = payload?;
    let input = raw.validate()?;
    Ok(Json(
        assess_content_integrity(state.llm.as_ref(), &input).await?,
    ))
}

/// POST /api/v1/analysis/source-credibility
pub async fn handle_source_credibility(
    State(state): State<AppState>,
    payload: Result<Json<SourceCredibilityInput>, JsonRejection>,
) -> Result<Json<SourceCredibilityResult>, AppError> {
    let Json(input) = payload?;
    Ok(Json(
        assess_source_credibility(state.llm.as_ref(), &input).await?,
    ))
}

/// POST /api/v1/analysis/cross-check
pub async fn handle_cross_check(
    State(state): State<AppState>,
    payload: Result<Json<RawArticle>, JsonRejection>,
) -> Result<Json<CrossCheckResult>, AppError> {
    let Json(raw) = payload?;
    let input = raw.validate()?;
    Ok(Json(cross_check_content(state.llm.as_ref(), &input).await?))
}

/// POST /api/v1/analysis/truth-probability
///
/// A body whose scores are missing or not numbers is reported as
/// `INVALID_SCORE_INPUT`, same as an out-of-range score.
pub async fn handle_truth_probability(
    State(state): State<AppState>,
    payload: Result<Json<AggregateScoreInput>, JsonRejection>,
) -> Result<Json<AggregateScoreOutput>, AppError> {
    let Json(input) = payload.map_err(|e| AppError::InvalidScoreInput(e.body_text()))?;

    let advisor = state
        .config
        .enable_advisory_aggregate
        .then_some(state.llm.as_ref());

    Ok(Json(calculate_truth_probability(advisor, input).await?))
}
