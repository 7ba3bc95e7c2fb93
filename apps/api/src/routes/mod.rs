pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::presentation::handlers as sessions;
use crate::state::AppState;
use crate::submission::handlers as submission;
use crate::translation::handlers as translation;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form submission
        .route("/api/v1/analyze", post(submission::handle_analyze))
        // Individual analyzers
        .route(
            "/api/v1/analysis/article",
            post(analysis::handle_analyze_article),
        )
        .route(
            "/api/v1/analysis/content-integrity",
            post(analysis::handle_content_integrity),
        )
        .route(
            "/api/v1/analysis/source-credibility",
            post(analysis::handle_source_credibility),
        )
        .route(
            "/api/v1/analysis/cross-check",
            post(analysis::handle_cross_check),
        )
        .route(
            "/api/v1/analysis/truth-probability",
            post(analysis::handle_truth_probability),
        )
        .route("/api/v1/translate", post(translation::handle_translate))
        // Presentation sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/submissions",
            post(sessions::handle_session_submit),
        )
        .route(
            "/api/v1/sessions/:id/translation",
            post(sessions::handle_toggle_translation),
        )
        .with_state(state)
}
