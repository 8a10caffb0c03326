//! Request and error body types for the HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /analyze_contract`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeParams {
    /// Contract text. Pages may be separated by form feeds; the first three
    /// pages are used for planning.
    pub document: String,

    /// Label for logs and error messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Error body: `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable cause.
    pub detail: String,
}
