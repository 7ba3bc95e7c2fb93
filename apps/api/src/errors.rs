use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Field name → messages. The form-level key is `_form`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const FORM_ERROR_KEY: &str = "_form";

/// The only text a user ever sees when an analysis fails, whatever the cause.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "An unexpected error occurred during analysis. Please try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error on {} field(s)", .0.len())]
    Validation(FieldErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid score input: {0}")]
    InvalidScoreInput(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Model output invalid: {0}")]
    ModelOutputInvalid(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(errors)
    }

    /// True for failures that reach the user as the generic analysis message.
    pub fn is_analysis_failure(&self) -> bool {
        matches!(
            self,
            AppError::ProviderUnavailable(_) | AppError::ModelOutputInvalid(_)
        )
    }

    /// Logs provider and schema failures under distinct codes.
    pub fn log_analysis_failure(&self, context: &str) {
        match self {
            AppError::ProviderUnavailable(msg) => {
                tracing::error!(code = "PROVIDER_UNAVAILABLE", "{context}: {msg}");
            }
            AppError::ModelOutputInvalid(msg) => {
                tracing::error!(
                    code = "MODEL_OUTPUT_INVALID",
                    "{context}: model output did not match schema: {msg}"
                );
            }
            other => tracing::error!("{context}: {other}"),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        if err.is_output_invalid() {
            AppError::ModelOutputInvalid(err.to_string())
        } else {
            AppError::ProviderUnavailable(err.to_string())
        }
    }
}

/// A body axum could not read as JSON is a form-level validation error, so
/// it gets the same error envelope as every other failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::field(FORM_ERROR_KEY, rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_analysis_failure() {
            self.log_analysis_failure("Analysis request failed");
        }

        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "One or more fields are invalid".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::InvalidScoreInput(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_SCORE_INPUT",
                msg.clone(),
            ),
            AppError::ProviderUnavailable(_) => (
                StatusCode::BAD_GATEWAY,
                "PROVIDER_UNAVAILABLE",
                ANALYSIS_FAILED_MESSAGE.to_string(),
            ),
            AppError::ModelOutputInvalid(_) => (
                StatusCode::BAD_GATEWAY,
                "MODEL_OUTPUT_INVALID",
                ANALYSIS_FAILED_MESSAGE.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let AppError::Validation(fields) = &self {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_schema_errors_map_to_model_output_invalid() {
        let err: AppError = LlmError::Schema("truthScore out of range".into()).into();
        assert!(matches!(err, AppError::ModelOutputInvalid(_)));
        assert!(err.is_analysis_failure());
    }

    #[test]
    fn test_llm_transport_errors_map_to_provider_unavailable() {
        let err: AppError = LlmError::RateLimited { retries: 3 }.into();
        assert!(matches!(err, AppError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_provider_failure_hides_raw_provider_text() {
        let err = AppError::ProviderUnavailable("upstream said: secret stack trace".into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains(ANALYSIS_FAILED_MESSAGE));
        assert!(!body.contains("secret stack trace"));
    }

    #[tokio::test]
    async fn test_validation_error_carries_field_map() {
        let response = AppError::field("sourceName", "Source name is required.").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body["error"]["fields"]["sourceName"][0],
            "Source name is required."
        );
    }
}
