//! Best-effort translation of already-produced analysis text.
//!
//! Nothing in here returns an error to the display flow: every failure is
//! logged and the original text is used instead.

pub mod handlers;

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::models::AnalysisResult;

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation endpoint returned status {0}")]
    Status(u16),

    #[error("Unexpected translation payload: {0}")]
    Payload(String),

    #[error("Unsupported target language '{0}'")]
    Language(String),
}

/// One string in, one translated string out. May fail; callers go through
/// `translate_text` to get the fallback behaviour.
#[async_trait]
pub trait TextTranslator: Send + Sync {
    async fn try_translate(&self, text: &str, target_language: &str)
        -> Result<String, TranslateError>;
}

/// Client for the public `translate_a/single` endpoint.
#[derive(Clone)]
pub struct TranslationClient {
    client: Client,
    base_url: String,
}

impl TranslationClient {
    pub fn new(base_url: String) -> Result<Self, TranslateError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url,
        })
    }
}

#[async_trait]
impl TextTranslator for TranslationClient {
    async fn try_translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslateError> {
        if !is_language_code(target_language) {
            return Err(TranslateError::Language(target_language.to_string()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Payload(e.to_string()))?;

        parse_translation_payload(&payload)
    }
}

/// Language codes look like `hi`, `pt-BR` or `zh-TW`.
fn is_language_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 12
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// The payload is `[[[segment, source, ...], ...], ...]`. The translation is
/// the first element of each inner tuple, concatenated in order. Tuples whose
/// first element is null (transliteration rows) contribute nothing.
pub fn parse_translation_payload(payload: &Value) -> Result<String, TranslateError> {
    let segments = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Payload("first element is not an array".to_string()))?;

    let mut translated = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let tuple = segment
            .as_array()
            .ok_or_else(|| TranslateError::Payload(format!("segment {i} is not an array")))?;
        match tuple.first() {
            Some(Value::String(s)) => translated.push_str(s),
            Some(Value::Null) => {}
            _ => {
                return Err(TranslateError::Payload(format!(
                    "segment {i} has no translated text"
                )))
            }
        }
    }

    if translated.is_empty() {
        return Err(TranslateError::Payload("no translated text".to_string()));
    }
    Ok(translated)
}

/// Translates `text`, or returns it unchanged if anything goes wrong.
/// Empty input returns empty output without a network call.
pub async fn translate_text(
    translator: &dyn TextTranslator,
    text: &str,
    target_language: &str,
) -> String {
    translate_or_original(translator, text, target_language)
        .await
        .0
}

/// The bool is true when the original had to be used.
async fn translate_or_original(
    translator: &dyn TextTranslator,
    text: &str,
    target_language: &str,
) -> (String, bool) {
    if text.is_empty() {
        return (String::new(), false);
    }

    match translator.try_translate(text, target_language).await {
        Ok(translated) => (translated, false),
        Err(e) => {
            warn!("Translation to '{target_language}' failed, keeping original: {e}");
            (text.to_string(), true)
        }
    }
}

/// Language-shifted copy of the displayed fields of one `AnalysisResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedContent {
    pub language: String,
    pub explanation: String,
    pub fact_check: String,
    pub red_flags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TranslationReport {
    pub content: TranslatedContent,
    /// Strings that fell back to the original language.
    pub fallbacks: usize,
    pub total: usize,
}

impl TranslationReport {
    pub fn notice(&self) -> String {
        if self.fallbacks == 0 {
            format!("Translation complete ({}).", self.content.language)
        } else if self.fallbacks == self.total {
            "Could not translate the results. Showing the original text.".to_string()
        } else {
            format!(
                "Translation partially complete: {} of {} passages kept in the original language.",
                self.fallbacks, self.total
            )
        }
    }
}

/// Translates explanation, fact check and each red flag independently and
/// concurrently. A failure degrades only the string it happened on.
pub async fn translate_content(
    translator: &dyn TextTranslator,
    result: &AnalysisResult,
    target_language: &str,
) -> TranslationReport {
    let (explanation, fact_check, red_flags) = tokio::join!(
        translate_or_original(translator, &result.explanation, target_language),
        translate_or_original(translator, &result.fact_check, target_language),
        join_all(
            result
                .red_flags
                .iter()
                .map(|flag| translate_or_original(translator, flag, target_language)),
        ),
    );

    let fallbacks = usize::from(explanation.1)
        + usize::from(fact_check.1)
        + red_flags.iter().filter(|(_, fell_back)| *fell_back).count();
    let total = 2 + red_flags.len();

    debug!(
        target_language,
        fallbacks, total, "Structured translation finished"
    );

    TranslationReport {
        content: TranslatedContent {
            language: target_language.to_string(),
            explanation: explanation.0,
            fact_check: fact_check.0,
            red_flags: red_flags.into_iter().map(|(text, _)| text).collect(),
        },
        fallbacks,
        total,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeTranslator;
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn result_with_flags(flags: &[&str]) -> AnalysisResult {
        AnalysisResult {
            truth_score: 0.2,
            verdict: String::new(),
            red_flags: flags.iter().map(|f| f.to_string()).collect(),
            source_credibility: 0.3,
            fact_check: "No matching records".to_string(),
            explanation: "Sensational claim".to_string(),
        }
    }

    async fn client_for(server: &MockServer) -> TranslationClient {
        TranslationClient::new(format!("{}/translate_a/single", server.uri())).unwrap()
    }

    #[test]
    fn test_payload_segments_are_concatenated_in_order() {
        let payload = json!([
            [["नमस्ते ", "Hello ", null, null], ["दुनिया", "world", null, null], [null, null, "duniya"]],
            null,
            "en"
        ]);
        assert_eq!(parse_translation_payload(&payload).unwrap(), "नमस्ते दुनिया");
    }

    #[test]
    fn test_unexpected_payload_shapes_are_errors() {
        assert!(parse_translation_payload(&json!({"text": "x"})).is_err());
        assert!(parse_translation_payload(&json!([])).is_err());
        assert!(parse_translation_payload(&json!(["flat string"])).is_err());
        assert!(parse_translation_payload(&json!([["not a tuple"]])).is_err());
        assert!(parse_translation_payload(&json!([[[42]]])).is_err());
        assert!(parse_translation_payload(&json!([[]])).is_err());
    }

    #[tokio::test]
    async fn test_client_sends_expected_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "auto"))
            .and(query_param("tl", "hi"))
            .and(query_param("dt", "t"))
            .and(query_param("q", "abc & def"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["एबीसी", "abc & def"]]])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(translate_text(&client, "abc & def", "hi").await, "एबीसी");
    }

    #[tokio::test]
    async fn test_endpoint_error_returns_original_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(translate_text(&client, "abc", "hi").await, "abc");
    }

    #[tokio::test]
    async fn test_malformed_body_returns_original_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(translate_text(&client, "abc", "hi").await, "abc");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_original_text() {
        let client = TranslationClient::new("http://127.0.0.1:9/translate".to_string()).unwrap();
        assert_eq!(translate_text(&client, "abc", "hi").await, "abc");
    }

    #[tokio::test]
    async fn test_empty_text_skips_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["x", "y"]]])))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(translate_text(&client, "", "hi").await, "");
    }

    #[tokio::test]
    async fn test_bad_language_code_falls_back_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["x", "y"]]])))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        assert_eq!(translate_text(&client, "abc", "hi&q=evil").await, "abc");
    }

    #[tokio::test]
    async fn test_structured_translation_degrades_per_string() {
        let translator = FakeTranslator::failing_on(&["Unverified source"]);
        let result = result_with_flags(&["Sensational wording", "Unverified source"]);

        let report = translate_content(&translator, &result, "hi").await;
        assert_eq!(report.content.explanation, "[hi] Sensational claim");
        assert_eq!(report.content.fact_check, "[hi] No matching records");
        assert_eq!(
            report.content.red_flags,
            vec![
                "[hi] Sensational wording".to_string(),
                "Unverified source".to_string()
            ]
        );
        assert_eq!(report.fallbacks, 1);
        assert_eq!(report.total, 4);
        assert_eq!(translator.calls(), 4);
        assert!(report.notice().contains("1 of 4"));
    }

    #[tokio::test]
    async fn test_structured_translation_over_http_keeps_flag_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "second"))
            .respond_with(ResponseTemplate::new(503))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["अनुवाद", "x"]]])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = result_with_flags(&["first", "second", "third"]);
        let report = translate_content(&client, &result, "hi").await;

        assert_eq!(
            report.content.red_flags,
            vec!["अनुवाद".to_string(), "second".to_string(), "अनुवाद".to_string()]
        );
        assert_eq!(report.fallbacks, 1);
    }

    #[tokio::test]
    async fn test_total_failure_notice() {
        let translator = FakeTranslator::failing_on(&["Sensational claim", "No matching records"]);
        let report = translate_content(&translator, &result_with_flags(&[]), "hi").await;
        assert_eq!(report.fallbacks, report.total);
        assert!(report.notice().starts_with("Could not translate"));
    }
}
