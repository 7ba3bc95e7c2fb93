//! Value objects exchanged with the analyzers. All of them are transient.
//!
//! Output types implement `ValidateOutput`: the declared [0, 1] ranges are a
//! hard contract at the model boundary, not a hint.

use serde::{Deserialize, Serialize};

use crate::llm_client::ValidateOutput;

/// A submitted news article. Built only from input that passed form validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleInput {
    pub headline: String,
    pub content: String,
}

/// Output of the article analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0.0 – 1.0, 1 = most likely accurate
    pub truth_score: f64,
    /// Free text, conventionally "Likely True" / "Unverified" / "Likely False"
    pub verdict: String,
    pub red_flags: Vec<String>,
    /// 0.0 – 1.0
    pub source_credibility: f64,
    pub fact_check: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIntegrityResult {
    pub clickbait_score: f64,
    pub emotional_exaggeration_score: f64,
    pub semantic_incoherence_score: f64,
    pub red_flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCredibilityInput {
    /// Missing validates as blank.
    #[serde(default)]
    pub source_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCredibilityResult {
    pub credibility_score: f64,
    /// Open vocabulary: "Highly Reliable", "Generally Reliable", "Mixed", "Unreliable", ...
    pub reliability_verdict: String,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossCheckResult {
    pub fact_check_result: String,
    pub red_flags: Vec<String>,
    pub confidence_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateScoreInput {
    pub content_analysis_score: f64,
    pub fact_verification_score: f64,
    pub source_credibility_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateScoreOutput {
    /// 0 – 100
    pub truth_probability_score: f64,
}

/// Fails unless `value` is finite and inside [0, 1].
pub fn check_unit_score(field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{field} must be within [0, 1], got {value}"))
    }
}

impl ValidateOutput for AnalysisResult {
    fn validate(&self) -> Result<(), String> {
        check_unit_score("truthScore", self.truth_score)?;
        check_unit_score("sourceCredibility", self.source_credibility)
    }
}

impl ValidateOutput for ContentIntegrityResult {
    fn validate(&self) -> Result<(), String> {
        check_unit_score("clickbaitScore", self.clickbait_score)?;
        check_unit_score(
            "emotionalExaggerationScore",
            self.emotional_exaggeration_score,
        )?;
        check_unit_score("semanticIncoherenceScore", self.semantic_incoherence_score)
    }
}

impl ValidateOutput for SourceCredibilityResult {
    fn validate(&self) -> Result<(), String> {
        check_unit_score("credibilityScore", self.credibility_score)
    }
}

impl ValidateOutput for CrossCheckResult {
    fn validate(&self) -> Result<(), String> {
        check_unit_score("confidenceLevel", self.confidence_level)
    }
}

/// The advisory aggregate reply: a 0–100 number the caller only logs.
impl ValidateOutput for AggregateScoreOutput {
    fn validate(&self) -> Result<(), String> {
        let v = self.truth_probability_score;
        if v.is_finite() && (0.0..=100.0).contains(&v) {
            Ok(())
        } else {
            Err(format!("truthProbabilityScore must be within [0, 100], got {v}"))
        }
    }
}
