//! # clause-roster
//!
//! Retrieval-augmented analysis of legal contracts.
//!
//! A document is scored against a table of domain profiles (finance, legal,
//! operations, compliance, ...). The [`RosterPlanner`] turns the scores into
//! an ordered list of analysis tasks, always including the mandatory
//! categories. The [`Coordinator`] then runs the tasks one by one: each
//! task's objective is the retrieval query, the retrieved passages become
//! the context, and a role-scoped agent writes the finding.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use clause_roster::agent::{AgentConfig, ContractAnalyzer, create_provider};
//! use clause_roster::core::{Document, ProfileTable, RosterPlanner};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AgentConfig::from_env()?;
//! let provider = create_provider(&config)?;
//! let planner = RosterPlanner::new(Arc::new(ProfileTable::default()));
//! let analyzer = ContractAnalyzer::new(planner, Arc::from(provider), config);
//!
//! let document = Document::load("contract.txt".as_ref())?;
//! let response = analyzer.analyze_document(&document).await?;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: domain profiles, relevance scoring, roster planning, documents
//! - [`retrieval`]: the retrieval gateway trait and the in-memory lexical index
//! - [`agent`]: providers, prompts, task execution, coordination, pipelines
//! - [`cli`]: command-line interface
//! - [`server`]: HTTP API
//! - [`error`]: error types

pub mod agent;
pub mod cli;
pub mod core;
pub mod error;
pub mod retrieval;
pub mod server;

pub use agent::{AnalysisReport, AnalysisResponse, ContractAnalyzer, Coordinator, QueryPipeline};
pub use crate::core::{Document, Priority, ProfileTable, RosterPlanner, ScoreMap, TaskProfile, score};
pub use error::{Error, Result};
pub use retrieval::{LexicalIndex, Passage, RetrievalGateway};
