//! End-to-end contract analysis.
//!
//! Document → planning sample → roster → coordinator run → response.
//! Retrieval runs over an in-memory [`LexicalIndex`] of the full text,
//! built per document.

use std::sync::Arc;

use tracing::info;

use super::config::AgentConfig;
use super::coordinator::Coordinator;
use super::executor::TaskExecutor;
use super::pipeline::QueryPipeline;
use super::prompt::PromptSet;
use super::provider::LlmProvider;
use super::report::{AnalysisReport, AnalysisResponse};
use crate::core::{DEFAULT_SAMPLE_PAGES, Document, RosterPlanner, TaskProfile};
use crate::error::Result;
use crate::retrieval::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, LexicalIndex};

/// Long-lived analysis service: shared planner, provider, config, prompts.
///
/// Cheap to clone; every clone shares the same read-only state.
#[derive(Clone)]
pub struct ContractAnalyzer {
    planner: RosterPlanner,
    provider: Arc<dyn LlmProvider>,
    config: Arc<AgentConfig>,
    prompts: Arc<PromptSet>,
    sample_pages: usize,
}

impl ContractAnalyzer {
    /// Creates an analyzer, loading prompts from the configured directory.
    #[must_use]
    pub fn new(planner: RosterPlanner, provider: Arc<dyn LlmProvider>, config: AgentConfig) -> Self {
        let prompts = PromptSet::load(config.prompt_dir.as_deref());
        Self {
            planner,
            provider,
            config: Arc::new(config),
            prompts: Arc::new(prompts),
            sample_pages: DEFAULT_SAMPLE_PAGES,
        }
    }

    /// Replaces the prompt set.
    #[must_use]
    pub fn with_prompts(mut self, prompts: PromptSet) -> Self {
        self.prompts = Arc::new(prompts);
        self
    }

    /// Planner in use.
    #[must_use]
    pub const fn planner(&self) -> &RosterPlanner {
        &self.planner
    }

    /// Plans a document from its opening pages.
    #[must_use]
    pub fn plan(&self, document: &Document) -> Vec<TaskProfile> {
        self.planner
            .generate_roster(&document.sample(self.sample_pages))
    }

    /// Coordinator over an index of `document`.
    #[must_use]
    pub fn coordinator(&self, document: &Document) -> Coordinator {
        Coordinator::new(self.executor(document))
    }

    /// Question pipeline over an index of `document`.
    #[must_use]
    pub fn pipeline(&self, document: &Document) -> QueryPipeline {
        QueryPipeline::new(self.executor(document))
    }

    /// Plans and runs a full analysis, returning the report with its
    /// audit trail alongside the plan.
    ///
    /// # Errors
    ///
    /// Returns the coordinator's failure.
    pub async fn run(&self, document: &Document) -> Result<(Vec<TaskProfile>, AnalysisReport)> {
        let plan = self.plan(document);
        info!(
            document = document.name(),
            pages = document.pages().len(),
            agents = plan.len(),
            "analyzing contract"
        );
        let report = self.coordinator(document).run_plan(&plan).await?;
        Ok((plan, report))
    }

    /// Plans and runs a full analysis.
    ///
    /// # Errors
    ///
    /// Returns the coordinator's failure.
    pub async fn analyze_document(&self, document: &Document) -> Result<AnalysisResponse> {
        let (plan, report) = self.run(document).await?;
        let strategy = plan.into_iter().map(|t| t.role).collect();
        Ok(AnalysisResponse::new(strategy, report))
    }

    fn executor(&self, document: &Document) -> TaskExecutor {
        let index = LexicalIndex::from_text(
            &document.full_text(),
            DEFAULT_CHUNK_SIZE,
            DEFAULT_CHUNK_OVERLAP,
        );
        TaskExecutor::from_parts(
            Arc::new(index),
            Arc::clone(&self.provider),
            Arc::clone(&self.config),
            Arc::clone(&self.prompts),
        )
    }
}

impl std::fmt::Debug for ContractAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractAnalyzer")
            .field("planner", &self.planner)
            .field("provider", &self.provider.name())
            .field("sample_pages", &self.sample_pages)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::mock::MockProvider;
    use crate::core::{Priority, ProfileTable};
    use crate::core::sample::SAMPLE_CONTRACT;

    fn analyzer(provider: Arc<MockProvider>) -> ContractAnalyzer {
        let config = AgentConfig::builder()
            .api_key("test")
            .build()
            .unwrap_or_else(|_| unreachable!());
        ContractAnalyzer::new(
            RosterPlanner::new(Arc::new(ProfileTable::default())),
            provider,
            config,
        )
        .with_prompts(PromptSet::defaults())
    }

    #[tokio::test]
    async fn test_analyze_sample_contract() {
        let provider = Arc::new(MockProvider::new("finding"));
        let doc = Document::from_text("msa", SAMPLE_CONTRACT).unwrap_or_else(|_| unreachable!());

        let response = analyzer(Arc::clone(&provider))
            .analyze_document(&doc)
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(response.status, "Success");
        assert_eq!(response.strategy_used.len(), 4);
        assert_eq!(response.executive_summary.len(), 4);
        for role in &response.strategy_used {
            assert!(response.executive_summary.get(role).is_some());
        }
        assert_eq!(provider.call_count(), 4);
    }

    #[tokio::test]
    async fn test_plan_uses_leading_pages_only() {
        let provider = Arc::new(MockProvider::new("finding"));
        let text = "intro\x0cterms\x0cdefinitions\x0cpayment fee invoice cost price";
        let doc = Document::from_text("late-money", text).unwrap_or_else(|_| unreachable!());

        let plan = analyzer(provider).plan(&doc);
        let roles: Vec<&str> = plan.iter().map(|t| t.role.as_str()).collect();
        assert_eq!(roles, ["Legal_Agent", "Compliance_Agent"]);
        assert!(plan.iter().all(|t| t.priority == Priority::Standard));
    }
}
