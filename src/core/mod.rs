//! Planning core: domain profiles, relevance scoring, roster planning and
//! document loading. Nothing here talks to the network.

pub mod document;
pub mod profile;
pub mod relevance;
pub mod roster;
pub mod sample;

pub use document::{DEFAULT_SAMPLE_PAGES, Document};
pub use profile::{Category, DomainProfile, ProfileTable};
pub use relevance::{CategoryScore, ScoreMap, score};
pub use roster::{Priority, RosterPlanner, RosterPolicy, TaskProfile};
