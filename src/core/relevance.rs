//! Keyword relevance scoring.
//!
//! Scores are raw counts of non-overlapping keyword occurrences in the
//! lowercased text. Matching is by substring, not by word: `"law"` also
//! counts inside `"lawful"` and `"data"` inside `"database"`. Short keywords
//! therefore over-match.

use serde::Serialize;
use serde::ser::SerializeMap;

use super::profile::ProfileTable;

/// Relevance score for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    /// Category name.
    pub category: String,
    /// Total keyword occurrences.
    pub score: u32,
}

/// Per-category scores for one document, in profile-table order.
///
/// Every category in the table has an entry; zero means "scored, nothing
/// found", never "missing".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreMap {
    entries: Vec<CategoryScore>,
}

impl ScoreMap {
    /// Score for `category`, or `None` if the category is unknown.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.score)
    }

    /// Entries in profile-table order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        self.entries.iter()
    }

    /// Number of categories scored.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no categories were scored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all category scores.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.score).sum()
    }
}

impl Serialize for ScoreMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &entry.score)?;
        }
        map.end()
    }
}

impl std::fmt::Display for ScoreMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", entry.category, entry.score)?;
        }
        f.write_str("}")
    }
}

/// Scores `text` against every category in `profiles`.
///
/// Pure: lowercases the text once, then counts each keyword with
/// non-overlapping substring matching. Empty text scores zero everywhere.
#[must_use]
pub fn score(text: &str, profiles: &ProfileTable) -> ScoreMap {
    let normalised = text.to_lowercase();

    let entries = profiles
        .iter()
        .map(|category| {
            let hits: usize = category
                .profile
                .keywords
                .iter()
                .map(|keyword| count_occurrences(&normalised, keyword))
                .sum();
            CategoryScore {
                category: category.name.clone(),
                score: u32::try_from(hits).unwrap_or(u32::MAX),
            }
        })
        .collect();

    ScoreMap { entries }
}

/// Non-overlapping occurrences of `needle` in `haystack`.
fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
