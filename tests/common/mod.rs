//! Shared collaborators for the integration tests.

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use clause_roster::agent::{AgentConfig, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use clause_roster::error::{AgentError, RetrievalError};
use clause_roster::retrieval::{Passage, RetrievalGateway};

/// Provider that echoes the call index and counts calls.
#[derive(Default)]
pub struct CountingProvider {
    calls: AtomicUsize,
    fail_on: Option<usize>,
    delay: Option<Duration>,
}

impl CountingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for CountingProvider {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_on == Some(n) {
            return Err(AgentError::ApiRequest {
                message: "upstream overloaded".to_string(),
                status: Some(529),
            });
        }
        Ok(ChatResponse {
            content: format!("finding {n}"),
            usage: TokenUsage {
                prompt_tokens: 20,
                completion_tokens: 8,
                total_tokens: 28,
            },
            finish_reason: Some("stop".to_string()),
        })
    }
}

/// Gateway returning the same passages for every query, except queries
/// containing `blind_spot`, which get nothing.
pub struct StubGateway {
    passages: Vec<Passage>,
    blind_spot: Option<String>,
    queries: Mutex<Vec<String>>,
}

impl StubGateway {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            passages: texts.iter().map(|t| Passage::new(*t)).collect(),
            blind_spot: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn blind_to(mut self, needle: &str) -> Self {
        self.blind_spot = Some(needle.to_lowercase());
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RetrievalGateway for StubGateway {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<Passage>, RetrievalError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        if let Some(ref needle) = self.blind_spot
            && query.to_lowercase().contains(needle.as_str())
        {
            return Ok(Vec::new());
        }
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}

/// Config that never touches the environment.
pub fn config() -> AgentConfig {
    AgentConfig::builder()
        .api_key("sk-test")
        .model("test-model")
        .build()
        .unwrap_or_else(|_| unreachable!())
}
