use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::StructuredCompletion;
use crate::presentation::store::SessionStore;
use crate::submission::gate::SubmissionGate;
use crate::translation::TextTranslator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Structured-completion provider used by every analyzer.
    pub llm: Arc<dyn StructuredCompletion>,
    pub translator: Arc<dyn TextTranslator>,
    pub sessions: SessionStore,
    /// Submission ids with an analysis running on the stateless endpoint.
    pub submissions: SubmissionGate,
    pub config: Config,
}

impl AppState {
    pub fn new(
        config: Config,
        llm: Arc<dyn StructuredCompletion>,
        translator: Arc<dyn TextTranslator>,
    ) -> Self {
        Self {
            llm,
            translator,
            sessions: SessionStore::new(chrono::Duration::seconds(config.session_ttl_secs)),
            submissions: SubmissionGate::default(),
            config,
        }
    }
}
