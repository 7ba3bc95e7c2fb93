//! Axum route handler for one-off text translation.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::translation::translate_text;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Missing translates as empty.
    #[serde(default)]
    pub text: String,
    /// Defaults to the configured target language.
    pub target_language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub text: String,
}

/// POST /api/v1/translate
///
/// Translation errors never fail the request: the original text comes back.
/// Only a body that is not JSON is rejected.
pub async fn handle_translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, AppError> {
    let Json(request) = payload?;
    let target = request
        .target_language
        .as_deref()
        .unwrap_or(&state.config.translate_target_language);

    let text = translate_text(state.translator.as_ref(), &request.text, target).await;
    Ok(Json(TranslateResponse { text }))
}
