//! Retrieval gateway abstraction.
//!
//! The coordinator only needs "top-k passages for a query". Anything that
//! can answer that (a vector store client, a search service, the in-memory
//! [`LexicalIndex`]) implements [`RetrievalGateway`].

pub mod chunking;
pub mod lexical;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::RetrievalError;

pub use chunking::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, chunk_text};
pub use lexical::LexicalIndex;

/// A passage returned by a gateway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passage {
    /// Passage text.
    pub text: String,
    /// Gateway-specific relevance score (higher is better).
    pub score: f64,
    /// Position of the passage in its source, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<usize>,
}

impl Passage {
    /// Creates a passage with no score or position metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            score: 0.0,
            chunk_index: None,
        }
    }
}

/// Source of passages relevant to a query.
///
/// Implementations must be safe to share across concurrent analysis runs;
/// the core only ever reads through this trait.
#[async_trait]
pub trait RetrievalGateway: Send + Sync {
    /// Gateway name for logging.
    fn name(&self) -> &'static str;

    /// Returns up to `k` passages, most relevant first by the gateway's
    /// own metric.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] if the backend fails.
    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<Passage>, RetrievalError>;
}

/// Joins passages into a context block, in gateway order, separated by a
/// blank line. No passages gives an empty block.
#[must_use]
pub fn build_context_block(passages: &[Passage]) -> String {
    passages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
