//! Axum route handlers for presentation sessions.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::presentation::session::ToggleStep;
use crate::presentation::view::SessionView;
use crate::state::AppState;
use crate::submission::{handle_submission, FormState, RawSubmission};
use crate::translation::translate_content;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    /// False when a newer submission had already replaced this one.
    pub applied: bool,
    pub form: FormState,
    pub view: SessionView,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTranslationRequest {
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleTranslationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub view: SessionView,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.read(id, |s| s.view()).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/submissions
///
/// Flow: begin (loading, display cleared) → validate + analyze without the
/// lock → complete, applied only if no newer submission started meanwhile.
/// A `submissionId` whose analysis is still running, superseded or not,
/// gets 409.
pub async fn handle_session_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<RawSubmission>, JsonRejection>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let Json(raw) = payload?;
    let _in_flight = match raw.submission_id {
        Some(submission_id) => Some(state.submissions.try_begin(submission_id).ok_or_else(|| {
            AppError::Conflict(format!("Submission {submission_id} is already being analyzed"))
        })?),
        None => None,
    };

    let headline = raw.headline.clone().unwrap_or_default();
    let ticket = state
        .sessions
        .update(id, |s| s.begin_submission(raw.submission_id, &headline))
        .await??;

    let outcome = handle_submission(state.llm.as_ref(), raw.headline, raw.content).await;
    let form = outcome.form_state();

    let (applied, view) = state
        .sessions
        .update(id, |s| {
            let applied = s.complete_submission(ticket, outcome);
            (applied, s.view())
        })
        .await?;

    Ok(Json(SubmissionResponse {
        applied,
        form,
        view,
    }))
}

/// POST /api/v1/sessions/:id/translation
///
/// Toggles between the original and translated view of the displayed result.
/// The first toggle for a result translates and caches; later toggles reuse
/// the cache until the result is replaced. A toggle while that pass is
/// still running gets 409.
pub async fn handle_toggle_translation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<ToggleTranslationRequest>>,
) -> Result<Json<ToggleTranslationResponse>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let language = request
        .target_language
        .unwrap_or_else(|| state.config.translate_target_language.clone());

    let step = state
        .sessions
        .update(id, |s| s.begin_toggle(&language))
        .await??;

    let notice = match step {
        ToggleStep::ShowOriginal | ToggleStep::ShowCached => None,
        ToggleStep::Translate {
            result,
            result_ticket,
        } => {
            let report = translate_content(state.translator.as_ref(), &result, &language).await;
            let notice = report.notice();
            let installed = state
                .sessions
                .update(id, |s| s.install_translation(result_ticket, report.content))
                .await?;
            installed.then_some(notice)
        }
    };

    let view = state.sessions.read(id, |s| s.view()).await?;
    Ok(Json(ToggleTranslationResponse { notice, view }))
}
