//! Scoring utilities: score → percentage, score → verdict bucket.
//!
//! Thresholds (strict greater-than, boundaries fall to the lower bucket):
//! - s > 0.7        → positive, default label "Likely True"
//! - 0.4 < s ≤ 0.7  → neutral,  default label "Unverified"
//! - s ≤ 0.4        → negative, default label "Likely False"

use serde::{Deserialize, Serialize};

const POSITIVE_THRESHOLD: f64 = 0.7;
const NEUTRAL_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictBucket {
    Positive,
    Neutral,
    Negative,
}

impl VerdictBucket {
    /// The bucket is derived from the number only, never from a label.
    pub fn for_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            VerdictBucket::Positive
        } else if score > NEUTRAL_THRESHOLD {
            VerdictBucket::Neutral
        } else {
            VerdictBucket::Negative
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            VerdictBucket::Positive => "Likely True",
            VerdictBucket::Neutral => "Unverified",
            VerdictBucket::Negative => "Likely False",
        }
    }
}

/// What the dashboard shows next to the gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictDisplay {
    pub bucket: VerdictBucket,
    pub label: String,
    pub percentage: u8,
}

impl VerdictDisplay {
    /// A non-blank model label replaces the bucket's default label.
    pub fn new(score: f64, model_label: Option<&str>) -> Self {
        let bucket = VerdictBucket::for_score(score);
        let label = model_label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(bucket.default_label())
            .to_string();

        Self {
            bucket,
            label,
            percentage: to_percentage(score),
        }
    }
}

/// round(score × 100), clamped to 0..=100. Non-finite scores map to 0.
pub fn to_percentage(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
