//! Agentic analysis for clause-roster.
//!
//! Runs a planned roster of role-scoped analysts over retrieved contract
//! context, one task at a time. Uses a pluggable provider abstraction backed
//! by OpenAI-compatible APIs.
//!
//! # Architecture
//!
//! ```text
//! Document → ContractAnalyzer
//!   ├── RosterPlanner (keyword scores → ordered TaskProfiles)
//!   ├── LexicalIndex (RetrievalGateway over the full text)
//!   └── Coordinator (sequential fold over the plan)
//!       └── TaskExecutor per task
//!           ├── similarity_search(objective, k)
//!           └── SpecialistAgent → finding
//!
//! Question → QueryPipeline
//!   ├── similarity_search(question, k)
//!   └── Finance / Legal / Operations specialists → QueryReport
//! ```

pub mod analyzer;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod executor;
pub mod message;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod report;
pub mod specialist;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

// Re-export key types
pub use analyzer::ContractAnalyzer;
pub use client::create_provider;
pub use config::AgentConfig;
pub use coordinator::{Coordinator, DEGRADED_PREFIX, FailurePolicy};
pub use executor::{TaskExecutor, TaskOutcome};
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use pipeline::{QueryPipeline, QueryReport};
pub use prompt::{NO_DATA_FOUND, NOT_FOUND_FINDING, PromptSet};
pub use provider::LlmProvider;
pub use report::{AnalysisReport, AnalysisResponse, Findings, TaskRecord};
pub use specialist::SpecialistAgent;
pub use traits::{Agent, AgentResponse};
