//! In-memory lexical retrieval over a chunked document.
//!
//! Ranks chunks by query-term overlap weighted with inverse document
//! frequency: each distinct query term present in a chunk contributes
//! `(1 + ln tf) * ln(1 + N / df)`. Chunks with no shared term are never
//! returned. Ties keep document order.
//!
//! A small stand-in for a vector store, built per document and discarded
//! with it.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use super::chunking::chunk_text;
use super::{Passage, RetrievalGateway};
use crate::error::RetrievalError;

/// Words too common in contracts and objectives to carry signal.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "in", "is", "it", "of", "on",
    "or", "shall", "that", "the", "this", "to", "will", "with",
];

/// Chunk index with per-chunk term frequencies.
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    chunks: Vec<String>,
    term_counts: Vec<HashMap<String, u32>>,
    doc_freq: HashMap<String, u32>,
}

impl LexicalIndex {
    /// Chunks `text` and indexes every chunk.
    #[must_use]
    pub fn from_text(text: &str, chunk_size: usize, overlap: usize) -> Self {
        Self::from_chunks(chunk_text(text, chunk_size, overlap))
    }

    /// Indexes pre-split chunks, preserving their order.
    #[must_use]
    pub fn from_chunks(chunks: Vec<String>) -> Self {
        let term_counts: Vec<HashMap<String, u32>> = chunks
            .iter()
            .map(|chunk| {
                let mut counts = HashMap::new();
                for term in tokenize(chunk) {
                    *counts.entry(term).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        for counts in &term_counts {
            for term in counts.keys() {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        Self {
            chunks,
            term_counts,
            doc_freq,
        }
    }

    /// Number of indexed chunks.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Ranks chunks against `query` and returns the best `k`.
    #[must_use]
    pub fn search(&self, query: &str, k: usize) -> Vec<Passage> {
        let query_terms: HashSet<String> = tokenize(query).collect();
        if query_terms.is_empty() || k == 0 {
            return Vec::new();
        }

        #[allow(clippy::cast_precision_loss)]
        let n = self.chunks.len() as f64;

        let mut scored: Vec<(usize, f64)> = self
            .term_counts
            .iter()
            .enumerate()
            .filter_map(|(idx, counts)| {
                let score: f64 = query_terms
                    .iter()
                    .filter_map(|term| {
                        let tf = f64::from(*counts.get(term)?);
                        let df = f64::from(self.doc_freq.get(term).copied().unwrap_or(1));
                        Some((1.0 + tf.ln()) * (1.0 + n / df).ln())
                    })
                    .sum();
                (score > 0.0).then_some((idx, score))
            })
            .collect();

        // Stable sort: equal scores stay in document order.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);

        scored
            .into_iter()
            .map(|(idx, score)| Passage {
                text: self.chunks[idx].clone(),
                score,
                chunk_index: Some(idx),
            })
            .collect()
    }
}

#[async_trait]
impl RetrievalGateway for LexicalIndex {
    fn name(&self) -> &'static str {
        "lexical"
    }

    async fn similarity_search(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<Passage>, RetrievalError> {
        let passages = self.search(query, k);
        debug!(
            query,
            k,
            found = passages.len(),
            chunks = self.len(),
            "lexical search"
        );
        Ok(passages)
    }
}

/// Lowercased Unicode words, minus stopwords and single characters.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.unicode_words()
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() > 1 && !STOPWORDS.contains(&w.as_str()))
}
