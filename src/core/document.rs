//! Contract documents as plain text.
//!
//! Pages are separated by form feeds (`\x0c`), which is what most PDF text
//! exporters emit. Planning only looks at the opening pages; retrieval
//! indexes the whole text.

use std::path::Path;

use crate::error::InputError;

/// Page separator in exported text.
pub const PAGE_BREAK: char = '\x0c';

/// Number of leading pages used as the planning sample.
pub const DEFAULT_SAMPLE_PAGES: usize = 3;

/// A loaded contract document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    pages: Vec<String>,
}

impl Document {
    /// Builds a document from in-memory text.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Empty`] if the text is blank.
    pub fn from_text(name: impl Into<String>, text: &str) -> Result<Self, InputError> {
        let name = name.into();
        if text.trim().is_empty() {
            return Err(InputError::Empty { name });
        }

        let pages = text.split(PAGE_BREAK).map(str::to_string).collect();
        Ok(Self { name, pages })
    }

    /// Reads a UTF-8 text document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NotFound`] for a missing path,
    /// [`InputError::Unreadable`] for other I/O or encoding failures, and
    /// [`InputError::Empty`] for a blank file.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        if !path.exists() {
            return Err(InputError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let text = std::fs::read_to_string(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_text(path.display().to_string(), &text)
    }

    /// Document name (path or upload label).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Page texts in order.
    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Concatenation of the first `pages` pages, used for planning.
    #[must_use]
    pub fn sample(&self, pages: usize) -> String {
        self.pages.iter().take(pages).map(String::as_str).collect()
    }

    /// Full text with page breaks removed.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }
}
