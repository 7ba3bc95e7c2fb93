//! Form submission: raw field validation, the single article-analysis call,
//! and mapping of failures onto field- or form-level messages.

pub mod gate;
pub mod handlers;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::article::analyze_article;
use crate::analysis::models::{AnalysisResult, ArticleInput};
use crate::errors::{AppError, FieldErrors, ANALYSIS_FAILED_MESSAGE, FORM_ERROR_KEY};
use crate::llm_client::StructuredCompletion;

pub const HEADLINE_MIN_CHARS: usize = 5;
pub const CONTENT_MIN_CHARS: usize = 100;

const HEADLINE_TOO_SHORT: &str = "Headline must be at least 5 characters.";
const CONTENT_TOO_SHORT: &str = "Article content must be at least 100 characters.";

/// Untyped form fields as posted. Missing fields validate as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    pub headline: Option<String>,
    pub content: Option<String>,
    /// Identifies one submission event so repeated clicks can be told apart
    /// from a genuinely new submission.
    pub submission_id: Option<Uuid>,
}

/// Article fields posted to the individual analyzer endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticle {
    pub headline: Option<String>,
    pub content: Option<String>,
}

impl RawArticle {
    pub fn validate(self) -> Result<ArticleInput, AppError> {
        validate_article(self.headline, self.content)
    }
}

/// What the form receives back: either data or keyed errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

impl FormState {
    pub fn success(data: AnalysisResult) -> Self {
        Self {
            data: Some(data),
            errors: FieldErrors::new(),
        }
    }

    pub fn field_errors(errors: FieldErrors) -> Self {
        Self { data: None, errors }
    }

    pub fn form_error(message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(FORM_ERROR_KEY.to_string(), vec![message.to_string()]);
        Self { data: None, errors }
    }

    #[cfg(test)]
    pub fn form_message(&self) -> Option<String> {
        self.errors.get(FORM_ERROR_KEY).map(|m| m.join(", "))
    }
}

/// Checks both fields and reports every failure at once.
/// Lengths are counted in characters, not bytes.
pub fn validate_article(
    headline: Option<String>,
    content: Option<String>,
) -> Result<ArticleInput, AppError> {
    let headline = headline.unwrap_or_default();
    let content = content.unwrap_or_default();

    let mut errors = FieldErrors::new();
    if headline.chars().count() < HEADLINE_MIN_CHARS {
        errors.insert("headline".to_string(), vec![HEADLINE_TOO_SHORT.to_string()]);
    }
    if content.chars().count() < CONTENT_MIN_CHARS {
        errors.insert("content".to_string(), vec![CONTENT_TOO_SHORT.to_string()]);
    }

    if errors.is_empty() {
        Ok(ArticleInput { headline, content })
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Outcome of one submission before it is rendered as a `FormState`.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Analyzed(AnalysisResult),
    Invalid(FieldErrors),
    Failed(AppError),
}

impl SubmissionOutcome {
    pub fn form_state(&self) -> FormState {
        match self {
            SubmissionOutcome::Analyzed(result) => FormState::success(result.clone()),
            SubmissionOutcome::Invalid(errors) => FormState::field_errors(errors.clone()),
            SubmissionOutcome::Failed(_) => FormState::form_error(ANALYSIS_FAILED_MESSAGE),
        }
    }

    pub fn into_form_state(self) -> FormState {
        match self {
            SubmissionOutcome::Analyzed(result) => FormState::success(result),
            SubmissionOutcome::Invalid(errors) => FormState::field_errors(errors),
            SubmissionOutcome::Failed(_) => FormState::form_error(ANALYSIS_FAILED_MESSAGE),
        }
    }
}

/// Runs the analyzer on validated input. Failures are logged with their
/// specific kind; callers only ever show the generic form message.
pub async fn run_analysis(llm: &dyn StructuredCompletion, input: &ArticleInput) -> SubmissionOutcome {
    match analyze_article(llm, input).await {
        Ok(result) => SubmissionOutcome::Analyzed(result),
        Err(e) => {
            e.log_analysis_failure("Analysis error");
            SubmissionOutcome::Failed(e)
        }
    }
}

/// Validate, then analyze. No provider call happens on validation failure.
pub async fn handle_submission(
    llm: &dyn StructuredCompletion,
    headline: Option<String>,
    content: Option<String>,
) -> SubmissionOutcome {
    match validate_article(headline, content) {
        Ok(input) => run_analysis(llm, &input).await,
        Err(AppError::Validation(errors)) => SubmissionOutcome::Invalid(errors),
        Err(other) => SubmissionOutcome::Failed(other),
    }
}
