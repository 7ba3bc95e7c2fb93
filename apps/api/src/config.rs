use anyhow::{Context, Result};

use crate::llm_client::ANTHROPIC_API_URL;
use crate::translation::DEFAULT_TRANSLATE_URL;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub translate_url: String,
    /// Language the translate button targets when the request names none.
    pub translate_target_language: String,
    /// Issue the advisory model call when aggregating truth probability.
    pub enable_advisory_aggregate: bool,
    pub session_ttl_secs: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: env_or("ANTHROPIC_BASE_URL", ANTHROPIC_API_URL),
            translate_url: env_or("TRANSLATE_URL", DEFAULT_TRANSLATE_URL),
            translate_target_language: env_or("TRANSLATE_TARGET_LANGUAGE", "hi"),
            enable_advisory_aggregate: parse_bool(&env_or("ENABLE_ADVISORY_AGGREGATE", "true"))
                .context("ENABLE_ADVISORY_AGGREGATE must be true or false")?,
            session_ttl_secs: env_or("SESSION_TTL_SECS", "3600")
                .parse::<i64>()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: '{other}'"),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            anthropic_api_key: "test-key".to_string(),
            anthropic_api_url: ANTHROPIC_API_URL.to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            translate_target_language: "hi".to_string(),
            enable_advisory_aggregate: true,
            session_ttl_secs: 3600,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
