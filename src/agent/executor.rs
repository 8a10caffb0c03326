//! Single-task execution: retrieve, prompt, generate.
//!
//! The executor owns the shared collaborators (gateway, provider, config,
//! prompts) and bounds every call with the configured timeouts. It holds no
//! per-run state, so one instance serves any number of runs.

use std::sync::Arc;

use tracing::debug;

use super::config::AgentConfig;
use super::message::TokenUsage;
use super::prompt::{NOT_FOUND_FINDING, PromptSet, build_context_prompt};
use super::provider::LlmProvider;
use super::specialist::SpecialistAgent;
use super::traits::{Agent, AgentResponse};
use crate::core::TaskProfile;
use crate::error::{AgentError, Result, RetrievalError};
use crate::retrieval::{Passage, RetrievalGateway, build_context_block};

/// What one executed task produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    /// Finding text for the task's role.
    pub finding: String,
    /// Number of passages retrieved.
    pub passages: usize,
    /// Whether the generation collaborator was called.
    pub generated: bool,
    /// Tokens spent, zero when nothing was generated.
    pub usage: TokenUsage,
}

/// Runs one planned task against the retrieval and generation collaborators.
#[derive(Clone)]
pub struct TaskExecutor {
    gateway: Arc<dyn RetrievalGateway>,
    provider: Arc<dyn LlmProvider>,
    config: Arc<AgentConfig>,
    prompts: Arc<PromptSet>,
}

impl TaskExecutor {
    /// Creates an executor, loading prompts from [`AgentConfig::prompt_dir`]
    /// with compiled-in fallbacks.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn RetrievalGateway>,
        provider: Arc<dyn LlmProvider>,
        config: Arc<AgentConfig>,
    ) -> Self {
        let prompts = PromptSet::load(config.prompt_dir.as_deref());
        Self {
            gateway,
            provider,
            config,
            prompts: Arc::new(prompts),
        }
    }

    /// Creates an executor around an already-loaded prompt set.
    #[must_use]
    pub fn from_parts(
        gateway: Arc<dyn RetrievalGateway>,
        provider: Arc<dyn LlmProvider>,
        config: Arc<AgentConfig>,
        prompts: Arc<PromptSet>,
    ) -> Self {
        Self {
            gateway,
            provider,
            config,
            prompts,
        }
    }

    /// Replaces the prompt set.
    #[must_use]
    pub fn with_prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = Arc::new(prompts);
        self
    }

    /// Shared configuration.
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Active prompt set.
    #[must_use]
    pub fn prompts(&self) -> &PromptSet {
        &self.prompts
    }

    /// Retrieves up to `k` passages, bounded by the retrieval timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Timeout`] when the gateway is too slow, or
    /// the gateway's own error.
    pub async fn retrieve(
        &self,
        query: &str,
        k: usize,
    ) -> std::result::Result<Vec<Passage>, RetrievalError> {
        let limit = self.config.retrieval_timeout;
        match tokio::time::timeout(limit, self.gateway.similarity_search(query, k)).await {
            Ok(result) => result,
            Err(_) => Err(RetrievalError::Timeout {
                query: query.to_string(),
                timeout_ms: millis(limit),
            }),
        }
    }

    /// Runs an agent once, bounded by the generation timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Timeout`] when the provider is too slow, or the
    /// agent's own error (including an empty reply).
    pub async fn generate(
        &self,
        agent: &dyn Agent,
        user_msg: &str,
    ) -> std::result::Result<AgentResponse, AgentError> {
        let limit = self.config.timeout;
        match tokio::time::timeout(limit, agent.execute(&*self.provider, user_msg)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout {
                agent: agent.name().to_string(),
                timeout_ms: millis(limit),
            }),
        }
    }

    /// Executes one task: the objective is the retrieval query, the passages
    /// become the context, and the role-scoped analyst writes the finding.
    ///
    /// With no passages (and `skip_empty_context` on) the finding is
    /// [`NOT_FOUND_FINDING`] and the provider is not called.
    ///
    /// # Errors
    ///
    /// Returns the retrieval or generation failure, unwrapped.
    pub async fn execute(&self, task: &TaskProfile) -> Result<TaskOutcome> {
        let passages = self
            .retrieve(&task.objective, self.config.roster_top_k)
            .await?;
        let context = build_context_block(&passages);

        debug!(
            task_id = %task.id,
            role = %task.role,
            passages = passages.len(),
            gateway = self.gateway.name(),
            "retrieved context"
        );

        if context.trim().is_empty() && self.config.skip_empty_context {
            return Ok(TaskOutcome {
                finding: NOT_FOUND_FINDING.to_string(),
                passages: passages.len(),
                generated: false,
                usage: TokenUsage::default(),
            });
        }

        let agent = SpecialistAgent::for_task(&self.config, &self.prompts, task);
        let response = self
            .generate(&agent, &build_context_prompt(&context))
            .await?;

        Ok(TaskOutcome {
            finding: response.content,
            passages: passages.len(),
            generated: true,
            usage: response.usage,
        })
    }
}

fn millis(limit: std::time::Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}

impl std::fmt::Debug for TaskExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskExecutor")
            .field("gateway", &self.gateway.name())
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
