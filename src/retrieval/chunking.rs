//! Overlapping text chunking on word boundaries.
//!
//! Chunks are measured in characters and never split a word: the text is
//! segmented with Unicode word boundaries and segments are packed greedily.
//! Consecutive chunks share roughly `overlap` characters of trailing text.

use unicode_segmentation::UnicodeSegmentation;

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
/// Default overlap between consecutive chunks in characters.
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Splits `text` into overlapping chunks of at most `chunk_size` characters.
///
/// A single segment longer than `chunk_size` becomes its own chunk. Blank
/// chunks are dropped; blank input gives no chunks.
#[must_use]
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let overlap = overlap.min(chunk_size.saturating_sub(1));

    // (byte offset, char length) per word-boundary segment
    let segments: Vec<(usize, usize)> = text
        .split_word_bound_indices()
        .map(|(offset, seg)| (offset, seg.chars().count()))
        .collect();

    let byte_end = |idx: usize| {
        segments
            .get(idx + 1)
            .map_or(text.len(), |&(offset, _)| offset)
    };

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < segments.len() {
        // Extend to the last segment that still fits.
        let mut end = start;
        let mut len = segments[start].1;
        while end + 1 < segments.len() && len + segments[end + 1].1 <= chunk_size {
            end += 1;
            len += segments[end].1;
        }

        let chunk = text[segments[start].0..byte_end(end)].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        if end + 1 >= segments.len() {
            break;
        }

        // Step back from the end while the tail fits in the overlap.
        let mut next = end + 1;
        let mut tail = 0;
        while next > start + 1 && tail + segments[next - 1].1 <= overlap {
            next -= 1;
            tail += segments[next].1;
        }
        start = next;
    }

    chunks
}
