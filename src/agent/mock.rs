//! Scripted collaborators for unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::message::{ChatRequest, ChatResponse, TokenUsage};
use super::provider::LlmProvider;
use crate::error::{AgentError, RetrievalError};
use crate::retrieval::{Passage, RetrievalGateway};

/// Provider that answers every call with `"<reply> #<n>"` and records the
/// system prompt it was given.
pub struct MockProvider {
    pub calls: AtomicUsize,
    reply: String,
    fail_on: Option<usize>,
    delay: Option<Duration>,
    pub system_prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
            fail_on: None,
            delay: None,
            system_prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails the call with the given zero-based index.
    pub const fn failing_on(mut self, call: usize) -> Self {
        self.fail_on = Some(call);
        self
    }

    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Ok(mut prompts) = self.system_prompts.lock() {
            prompts.push(
                request
                    .messages
                    .first()
                    .map(|m| m.content.clone())
                    .unwrap_or_default(),
            );
        }
        if self.fail_on == Some(n) {
            return Err(AgentError::ApiRequest {
                message: "service unavailable".to_string(),
                status: Some(503),
            });
        }
        let content = if self.reply.is_empty() {
            String::new()
        } else {
            format!("{} #{n}", self.reply)
        };
        Ok(ChatResponse {
            content,
            usage: TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            },
            finish_reason: Some("stop".to_string()),
        })
    }
}

/// Gateway that returns a fixed passage list for every query.
pub struct MockGateway {
    pub calls: AtomicUsize,
    passages: Vec<Passage>,
    fail: bool,
    delay: Option<Duration>,
    pub queries: Mutex<Vec<(String, usize)>>,
}

impl MockGateway {
    pub fn with_passages(texts: &[&str]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            passages: texts.iter().map(|t| Passage::new(*t)).collect(),
            fail: false,
            delay: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::with_passages(&[])
    }

    pub fn failing() -> Self {
        let mut gateway = Self::empty();
        gateway.fail = true;
        gateway
    }

    pub const fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RetrievalGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<Passage>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((query.to_string(), k));
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(RetrievalError::Backend {
                message: "index offline".to_string(),
            });
        }
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}
