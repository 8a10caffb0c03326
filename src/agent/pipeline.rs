//! Interactive single-question pipeline.
//!
//! One retrieval per question; the passages are shared by the fixed
//! specialist panel (finance, legal, operations), which runs in order.

use serde::Serialize;
use tracing::info;

use super::executor::TaskExecutor;
use super::message::TokenUsage;
use super::prompt::{NO_DATA_FOUND, NOT_SPECIFIED, build_context_prompt};
use super::report::Findings;
use super::specialist::SpecialistAgent;
use super::traits::Agent;
use crate::error::{InputError, Result};
use crate::retrieval::build_context_block;

/// Answers from the specialist panel for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    /// The question as asked.
    pub question: String,
    /// Passages retrieved for it.
    pub passages: usize,
    /// Report per specialist, in panel order.
    pub reports: Findings,
    /// Tokens spent across the panel.
    pub usage: TokenUsage,
}

impl QueryReport {
    /// Reports that say something: those not marked `Not specified`.
    pub fn informative(&self) -> impl Iterator<Item = (&str, &str)> {
        self.reports
            .iter()
            .filter(|(_, report)| !report.contains(NOT_SPECIFIED))
    }
}

/// Question-answering front end over a single document.
#[derive(Debug, Clone)]
pub struct QueryPipeline {
    executor: TaskExecutor,
}

impl QueryPipeline {
    /// Creates a pipeline sharing the executor's collaborators.
    #[must_use]
    pub const fn new(executor: TaskExecutor) -> Self {
        Self { executor }
    }

    /// Retrieves context for `question` and runs every specialist on it.
    ///
    /// With no passages every specialist reports [`NO_DATA_FOUND`] and the
    /// provider is not called.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::EmptyQuestion`] for a blank question, or the
    /// first retrieval or generation failure.
    pub async fn ask(&self, question: &str) -> Result<QueryReport> {
        let question = question.trim();
        if question.is_empty() {
            return Err(InputError::EmptyQuestion.into());
        }

        let config = self.executor.config();
        let passages = self.executor.retrieve(question, config.query_top_k).await?;
        let context = build_context_block(&passages);
        let panel = SpecialistAgent::panel(config, self.executor.prompts());

        let mut reports = Findings::default();
        let mut usage = TokenUsage::default();

        if context.trim().is_empty() && config.skip_empty_context {
            for agent in &panel {
                reports.insert(agent.name(), NO_DATA_FOUND);
            }
        } else {
            let user_msg = build_context_prompt(&context);
            for agent in &panel {
                info!(agent = agent.name(), "specialist analyzing");
                let response = self.executor.generate(agent, &user_msg).await?;
                usage = usage.saturating_add(response.usage);
                reports.insert(agent.name(), response.content);
            }
        }

        Ok(QueryReport {
            question: question.to_string(),
            passages: passages.len(),
            reports,
            usage,
        })
    }
}
