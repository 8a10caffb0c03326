//! Role-scoped analysis agent.
//!
//! A specialist is a role name plus a system prompt. Planned tasks get one
//! rendered from the analyst template; the query pipeline uses a fixed
//! finance/legal/operations panel.

use super::config::AgentConfig;
use super::prompt::{PromptSet, build_task_prompt};
use super::traits::Agent;
use crate::core::TaskProfile;

/// Agent that analyzes retrieved contract context for one role.
#[derive(Debug, Clone)]
pub struct SpecialistAgent {
    role: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    system_prompt: String,
}

impl SpecialistAgent {
    /// Creates a specialist with the given role and system prompt.
    #[must_use]
    pub fn new(config: &AgentConfig, role: impl Into<String>, system_prompt: String) -> Self {
        Self {
            role: role.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            system_prompt,
        }
    }

    /// Creates the analyst for a planned task from the analyst template.
    #[must_use]
    pub fn for_task(config: &AgentConfig, prompts: &PromptSet, task: &TaskProfile) -> Self {
        let system_prompt = build_task_prompt(&prompts.analyst, &task.role, &task.objective);
        Self::new(config, task.role.clone(), system_prompt)
    }

    /// The fixed question panel, in reporting order.
    #[must_use]
    pub fn panel(config: &AgentConfig, prompts: &PromptSet) -> Vec<Self> {
        vec![
            Self::new(config, "Finance", prompts.finance.clone()),
            Self::new(config, "Legal", prompts.legal.clone()),
            Self::new(config, "Operations", prompts.operations.clone()),
        ]
    }
}

impl Agent for SpecialistAgent {
    fn name(&self) -> &str {
        &self.role
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Priority;

    fn test_config() -> AgentConfig {
        AgentConfig::builder()
            .api_key("test")
            .model("test-model")
            .build()
            .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn test_for_task_renders_role_and_objective() {
        let task = TaskProfile {
            id: "abcd1234".to_string(),
            role: "Compliance_Agent".to_string(),
            objective: "Check GDPR clauses.".to_string(),
            priority: Priority::Standard,
            relevance_score: 0,
        };
        let agent = SpecialistAgent::for_task(&test_config(), &PromptSet::defaults(), &task);
        assert_eq!(agent.name(), "Compliance_Agent");
        assert_eq!(agent.model(), "test-model");
        assert!(agent.system_prompt().contains("You are the Compliance_Agent."));
        assert!(agent.system_prompt().contains("Check GDPR clauses."));
    }

    #[test]
    fn test_panel_order() {
        let panel = SpecialistAgent::panel(&test_config(), &PromptSet::defaults());
        let names: Vec<&str> = panel.iter().map(Agent::name).collect();
        assert_eq!(names, ["Finance", "Legal", "Operations"]);
    }
}
