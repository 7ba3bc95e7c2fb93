//! Axum route handler for the stateless form submission endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::state::AppState;
use crate::submission::{handle_submission, FormState, RawSubmission, SubmissionOutcome};

/// POST /api/v1/analyze
///
/// 200 with `data`, 400 with field errors, 502 with a `_form` error.
/// A second request carrying a `submissionId` that is still running gets 409.
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<RawSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<FormState>), AppError> {
    let Json(raw) = payload?;
    let _in_flight = match raw.submission_id {
        Some(id) => Some(state.submissions.try_begin(id).ok_or_else(|| {
            AppError::Conflict(format!("Submission {id} is already being analyzed"))
        })?),
        None => None,
    };

    let outcome = handle_submission(state.llm.as_ref(), raw.headline, raw.content).await;

    let status = match &outcome {
        SubmissionOutcome::Analyzed(_) => StatusCode::OK,
        SubmissionOutcome::Invalid(_) => StatusCode::BAD_REQUEST,
        SubmissionOutcome::Failed(e) if e.is_analysis_failure() => StatusCode::BAD_GATEWAY,
        SubmissionOutcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    Ok((status, Json(outcome.into_form_state())))
}
