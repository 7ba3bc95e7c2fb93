//! Serializable projections of a session for the client.

use serde::Serialize;
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::analysis::verdict::{to_percentage, VerdictDisplay};
use crate::errors::FieldErrors;
use crate::translation::TranslatedContent;

/// The displayed form of one `AnalysisResult`.
///
/// Text fields come from the translated copy when `translated` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub headline: String,
    pub truth_percentage: u8,
    pub verdict: VerdictDisplay,
    pub red_flags: Vec<String>,
    pub source_credibility_percentage: u8,
    pub fact_check: String,
    pub explanation: String,
    pub translated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ResultView {
    pub fn build(
        headline: &str,
        result: &AnalysisResult,
        translation: Option<&TranslatedContent>,
    ) -> Self {
        let (red_flags, fact_check, explanation) = match translation {
            Some(t) => (t.red_flags.clone(), t.fact_check.clone(), t.explanation.clone()),
            None => (
                result.red_flags.clone(),
                result.fact_check.clone(),
                result.explanation.clone(),
            ),
        };

        Self {
            headline: headline.to_string(),
            truth_percentage: to_percentage(result.truth_score),
            verdict: VerdictDisplay::new(result.truth_score, Some(&result.verdict)),
            red_flags,
            source_credibility_percentage: to_percentage(result.source_credibility),
            fact_check,
            explanation,
            translated: translation.is_some(),
            language: translation.map(|t| t.language.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    Idle,
    Loading,
    Success,
    Error,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: Uuid,
    pub status: ViewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}
