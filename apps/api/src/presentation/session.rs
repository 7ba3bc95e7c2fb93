//! One presentation session: start → loading → success/error → display.
//!
//! Invariants:
//! - only the most recent submission ticket may change what is displayed
//! - replacing or clearing the displayed result drops its translation cache
//! - a translation produced for an older result is never installed
//! - at most one translation pass runs per displayed result

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::errors::{AppError, FieldErrors, ANALYSIS_FAILED_MESSAGE};
use crate::presentation::view::{ResultView, SessionView, ViewStatus};
use crate::submission::SubmissionOutcome;
use crate::translation::TranslatedContent;

/// Identity of one submission within a session. Increases monotonically.
pub type SubmissionTicket = u64;

/// A translation pass older than this is treated as abandoned.
const TRANSLATION_PASS_TIMEOUT_SECS: i64 = 30;

#[derive(Debug, Clone)]
struct PendingSubmission {
    ticket: SubmissionTicket,
    submission_id: Option<Uuid>,
    headline: String,
}

#[derive(Debug, Clone)]
struct DisplayedResult {
    ticket: SubmissionTicket,
    headline: String,
    result: AnalysisResult,
    translation: Option<TranslatedContent>,
    show_translated: bool,
    translation_started: Option<DateTime<Utc>>,
}

impl DisplayedResult {
    fn translation_in_flight(&self) -> bool {
        self.translation_started
            .is_some_and(|t| Utc::now() - t < Duration::seconds(TRANSLATION_PASS_TIMEOUT_SECS))
    }
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Loading,
    Displaying(Box<DisplayedResult>),
    Failed(String),
    Invalid(FieldErrors),
}

/// What a translation toggle request has to do next.
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleStep {
    /// Was showing the translation; now showing the original.
    ShowOriginal,
    /// A cached translation for this result is now showing.
    ShowCached,
    /// No usable cache: translate `result`, then `install_translation`.
    Translate {
        result: AnalysisResult,
        result_ticket: SubmissionTicket,
    },
}

#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    last_active: DateTime<Utc>,
    latest_ticket: SubmissionTicket,
    pending: Option<PendingSubmission>,
    phase: Phase,
}

impl Session {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            last_active: Utc::now(),
            latest_ticket: 0,
            pending: None,
            phase: Phase::Idle,
        }
    }

    #[cfg(test)]
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a submission and moves to loading, clearing the displayed
    /// result (and with it, any translated copy).
    ///
    /// A repeat of the submission that is still pending is refused so one
    /// submission event never runs two analyses. A different submission
    /// supersedes the pending one.
    pub fn begin_submission(
        &mut self,
        submission_id: Option<Uuid>,
        headline: &str,
    ) -> Result<SubmissionTicket, AppError> {
        if let (Some(pending), Some(id)) = (&self.pending, submission_id) {
            if pending.submission_id == Some(id) {
                return Err(AppError::Conflict(format!(
                    "Submission {id} is already being analyzed"
                )));
            }
        }

        if let Some(superseded) = &self.pending {
            debug!(
                session = %self.id,
                superseded = superseded.ticket,
                "New submission supersedes pending one"
            );
        }

        self.latest_ticket += 1;
        self.pending = Some(PendingSubmission {
            ticket: self.latest_ticket,
            submission_id,
            headline: headline.to_string(),
        });
        self.phase = Phase::Loading;

        Ok(self.latest_ticket)
    }

    /// Applies an outcome if `ticket` is still the latest submission.
    /// Returns false (and changes nothing) for a stale response.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: SubmissionOutcome,
    ) -> bool {
        let pending = match self.pending.take() {
            Some(p) if p.ticket == ticket => p,
            other => {
                self.pending = other;
                warn!(
                    session = %self.id,
                    ticket,
                    latest = self.latest_ticket,
                    "Ignoring stale analysis response"
                );
                return false;
            }
        };

        self.phase = match outcome {
            SubmissionOutcome::Analyzed(result) => Phase::Displaying(Box::new(DisplayedResult {
                ticket,
                headline: pending.headline,
                result,
                translation: None,
                show_translated: false,
                translation_started: None,
            })),
            SubmissionOutcome::Invalid(errors) => Phase::Invalid(errors),
            SubmissionOutcome::Failed(_) => Phase::Failed(ANALYSIS_FAILED_MESSAGE.to_string()),
        };

        true
    }

    /// First half of the translate button: decides whether a network pass is
    /// needed. Only valid while a result is displayed and no pass for it is
    /// still running.
    pub fn begin_toggle(&mut self, language: &str) -> Result<ToggleStep, AppError> {
        let Phase::Displaying(displayed) = &mut self.phase else {
            return Err(AppError::Conflict(
                "No analysis result is displayed".to_string(),
            ));
        };

        if displayed.translation_in_flight() {
            return Err(AppError::Conflict(
                "A translation is already in progress".to_string(),
            ));
        }

        if displayed.show_translated {
            displayed.show_translated = false;
            return Ok(ToggleStep::ShowOriginal);
        }

        match &displayed.translation {
            Some(cached) if cached.language == language => {
                displayed.show_translated = true;
                Ok(ToggleStep::ShowCached)
            }
            _ => {
                displayed.translation_started = Some(Utc::now());
                Ok(ToggleStep::Translate {
                    result: displayed.result.clone(),
                    result_ticket: displayed.ticket,
                })
            }
        }
    }

    /// Second half: caches and shows `content` if the result it was built
    /// for is still the one displayed. Returns false if it was discarded.
    pub fn install_translation(
        &mut self,
        result_ticket: SubmissionTicket,
        content: TranslatedContent,
    ) -> bool {
        match &mut self.phase {
            Phase::Displaying(displayed) if displayed.ticket == result_ticket => {
                displayed.translation = Some(content);
                displayed.show_translated = true;
                displayed.translation_started = None;
                true
            }
            _ => {
                warn!(
                    session = %self.id,
                    result_ticket,
                    "Discarding translation for a result that is no longer displayed"
                );
                false
            }
        }
    }

    pub fn view(&self) -> SessionView {
        let mut view = SessionView {
            session_id: self.id,
            status: ViewStatus::Idle,
            result: None,
            error: None,
            errors: FieldErrors::new(),
        };

        match &self.phase {
            Phase::Idle => {}
            Phase::Loading => view.status = ViewStatus::Loading,
            Phase::Displaying(displayed) => {
                view.status = ViewStatus::Success;
                let translation = displayed
                    .translation
                    .as_ref()
                    .filter(|_| displayed.show_translated);
                view.result = Some(ResultView::build(
                    &displayed.headline,
                    &displayed.result,
                    translation,
                ));
            }
            Phase::Failed(message) => {
                view.status = ViewStatus::Error;
                view.error = Some(message.clone());
            }
            Phase::Invalid(errors) => {
                view.status = ViewStatus::Invalid;
                view.errors = errors.clone();
            }
        }

        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::verdict::VerdictBucket;

    fn result(truth_score: f64, explanation: &str) -> AnalysisResult {
        AnalysisResult {
            truth_score,
            verdict: String::new(),
            red_flags: vec!["Sensational wording".to_string()],
            source_credibility: 0.3,
            fact_check: "No matching records".to_string(),
            explanation: explanation.to_string(),
        }
    }

    fn translation(language: &str) -> TranslatedContent {
        TranslatedContent {
            language: language.to_string(),
            explanation: "अनुवादित".to_string(),
            fact_check: "तथ्य".to_string(),
            red_flags: vec!["झंडा".to_string()],
        }
    }

    fn displaying(session: &mut Session, r: AnalysisResult) -> SubmissionTicket {
        let ticket = session.begin_submission(None, "Headline").unwrap();
        assert!(session.complete_submission(ticket, SubmissionOutcome::Analyzed(r)));
        ticket
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new(Uuid::new_v4());
        assert_eq!(session.view().status, ViewStatus::Idle);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_submission_moves_through_loading_to_success() {
        let mut session = Session::new(Uuid::new_v4());
        let ticket = session.begin_submission(None, "Headline").unwrap();
        assert_eq!(session.view().status, ViewStatus::Loading);

        assert!(session.complete_submission(ticket, SubmissionOutcome::Analyzed(result(0.2, "a"))));
        let view = session.view();
        assert_eq!(view.status, ViewStatus::Success);
        let shown = view.result.unwrap();
        assert_eq!(shown.verdict.bucket, VerdictBucket::Negative);
        assert_eq!(shown.verdict.label, "Likely False");
        assert_eq!(shown.headline, "Headline");
    }

    #[test]
    fn test_stale_response_does_not_overwrite_newer_result() {
        let mut session = Session::new(Uuid::new_v4());
        let a = session.begin_submission(None, "A").unwrap();
        let b = session.begin_submission(None, "B").unwrap();

        assert!(session.complete_submission(b, SubmissionOutcome::Analyzed(result(0.9, "from B"))));
        assert!(!session.complete_submission(a, SubmissionOutcome::Analyzed(result(0.1, "from A"))));

        let shown = session.view().result.unwrap();
        assert_eq!(shown.explanation, "from B");
        assert_eq!(shown.headline, "B");
    }

    #[test]
    fn test_stale_response_while_newer_pending_keeps_loading() {
        let mut session = Session::new(Uuid::new_v4());
        let a = session.begin_submission(None, "A").unwrap();
        let _b = session.begin_submission(None, "B").unwrap();

        assert!(!session.complete_submission(a, SubmissionOutcome::Analyzed(result(0.1, "A"))));
        assert_eq!(session.view().status, ViewStatus::Loading);
        assert!(session.is_loading());
    }

    #[test]
    fn test_repeat_of_pending_submission_is_refused() {
        let mut session = Session::new(Uuid::new_v4());
        let id = Uuid::new_v4();
        session.begin_submission(Some(id), "A").unwrap();

        let err = session.begin_submission(Some(id), "A").unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(session.begin_submission(Some(Uuid::new_v4()), "B").is_ok());
    }

    #[test]
    fn test_failure_shows_generic_message() {
        let mut session = Session::new(Uuid::new_v4());
        let ticket = session.begin_submission(None, "A").unwrap();
        session.complete_submission(
            ticket,
            SubmissionOutcome::Failed(AppError::ProviderUnavailable("timeout".into())),
        );

        let view = session.view();
        assert_eq!(view.status, ViewStatus::Error);
        assert_eq!(view.error.as_deref(), Some(ANALYSIS_FAILED_MESSAGE));
    }

    #[test]
    fn test_toggle_translates_then_uses_cache() {
        let mut session = Session::new(Uuid::new_v4());
        let ticket = displaying(&mut session, result(0.5, "original"));

        let step = session.begin_toggle("hi").unwrap();
        assert!(matches!(step, ToggleStep::Translate { result_ticket, .. } if result_ticket == ticket));
        assert!(session.install_translation(ticket, translation("hi")));
        assert!(session.view().result.unwrap().translated);

        assert_eq!(session.begin_toggle("hi").unwrap(), ToggleStep::ShowOriginal);
        assert_eq!(session.view().result.unwrap().explanation, "original");

        assert_eq!(session.begin_toggle("hi").unwrap(), ToggleStep::ShowCached);
        assert_eq!(session.view().result.unwrap().explanation, "अनुवादित");
    }

    #[test]
    fn test_cache_for_other_language_is_not_reused() {
        let mut session = Session::new(Uuid::new_v4());
        let ticket = displaying(&mut session, result(0.5, "original"));
        session.begin_toggle("hi").unwrap();
        session.install_translation(ticket, translation("hi"));
        session.begin_toggle("hi").unwrap(); // back to original

        assert!(matches!(
            session.begin_toggle("ta").unwrap(),
            ToggleStep::Translate { .. }
        ));
    }

    #[test]
    fn test_new_result_invalidates_translation_cache() {
        let mut session = Session::new(Uuid::new_v4());
        let first = displaying(&mut session, result(0.5, "first"));
        session.begin_toggle("hi").unwrap();
        session.install_translation(first, translation("hi"));

        displaying(&mut session, result(0.8, "second"));
        let shown = session.view().result.unwrap();
        assert!(!shown.translated);
        assert_eq!(shown.explanation, "second");
        assert!(matches!(
            session.begin_toggle("hi").unwrap(),
            ToggleStep::Translate { .. }
        ));
    }

    #[test]
    fn test_toggle_refused_while_translation_runs() {
        let mut session = Session::new(Uuid::new_v4());
        let ticket = displaying(&mut session, result(0.5, "original"));
        assert!(matches!(
            session.begin_toggle("hi").unwrap(),
            ToggleStep::Translate { .. }
        ));

        let err = session.begin_toggle("hi").unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        assert!(session.install_translation(ticket, translation("hi")));
        assert_eq!(session.begin_toggle("hi").unwrap(), ToggleStep::ShowOriginal);
    }

    #[test]
    fn test_abandoned_translation_pass_expires() {
        let mut session = Session::new(Uuid::new_v4());
        displaying(&mut session, result(0.5, "original"));
        session.begin_toggle("hi").unwrap();

        if let Phase::Displaying(displayed) = &mut session.phase {
            displayed.translation_started =
                Some(Utc::now() - Duration::seconds(TRANSLATION_PASS_TIMEOUT_SECS + 1));
        }
        assert!(matches!(
            session.begin_toggle("hi").unwrap(),
            ToggleStep::Translate { .. }
        ));
    }

    #[test]
    fn test_translation_for_replaced_result_is_discarded() {
        let mut session = Session::new(Uuid::new_v4());
        let first = displaying(&mut session, result(0.5, "first"));
        session.begin_toggle("hi").unwrap();

        displaying(&mut session, result(0.8, "second"));
        assert!(!session.install_translation(first, translation("hi")));
        assert!(!session.view().result.unwrap().translated);
    }

    #[test]
    fn test_toggle_without_result_is_conflict() {
        let mut session = Session::new(Uuid::new_v4());
        assert!(matches!(
            session.begin_toggle("hi"),
            Err(AppError::Conflict(_))
        ));
    }
}
