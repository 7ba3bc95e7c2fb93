//! In-process `StructuredCompletion` fake for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{LlmError, StructuredCompletion};

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    /// Behaves like a 503 from the provider.
    Unavailable,
    /// The provider answered with something that is not JSON.
    NotJson,
}

/// Plays back `replies` in order; the last one repeats once exhausted.
pub struct FakeCompletion {
    replies: Vec<(Reply, Duration)>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeCompletion {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self::with_delays(replies.into_iter().map(|r| (r, Duration::ZERO)).collect())
    }

    pub fn with_delays(replies: Vec<(Reply, Duration)>) -> Self {
        assert!(!replies.is_empty(), "FakeCompletion needs at least one reply");
        Self {
            replies,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn json(value: Value) -> Self {
        Self::new(vec![Reply::Json(value)])
    }

    pub fn unavailable() -> Self {
        Self::new(vec![Reply::Unavailable])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredCompletion for FakeCompletion {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<Value, LlmError> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        let (reply, delay) = self.replies[idx.min(self.replies.len() - 1)].clone();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Json(value) => Ok(value),
            Reply::Unavailable => Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
            Reply::NotJson => Err(LlmError::Parse(
                serde_json::from_str::<Value>("not json").unwrap_err(),
            )),
        }
    }
}
