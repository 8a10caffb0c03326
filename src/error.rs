//! Error types for clause-roster.
//!
//! Each failure domain has its own enum so callers can tell an unreadable
//! document from a misconfigured provider without string matching. The
//! top-level [`Error`] wraps them all and adds [`Error::Task`], the single
//! aggregate failure a coordinator run surfaces when a task aborts it.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error for planning and analysis runs.
#[derive(Debug, Error)]
pub enum Error {
    /// The source document is missing, unreadable, or empty.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// The retrieval gateway failed or timed out.
    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    /// The text-generation collaborator failed, timed out, or returned nothing.
    #[error("generation error: {0}")]
    Generation(#[from] AgentError),

    /// Required configuration is absent or invalid.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A planned task failed and aborted the run.
    #[error("task {task_id} ({role}) failed: {source}")]
    Task {
        /// Short identifier of the failing task.
        task_id: String,
        /// Category the task was analysing.
        role: String,
        /// Underlying cause.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Returns the innermost error, unwrapping any [`Error::Task`] layers.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Task { source, .. } => source.root(),
            other => other,
        }
    }

    /// Returns `true` if the failure was caused by bad input rather than
    /// by a collaborator or configuration.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self.root(), Self::Input(_))
    }
}

/// Problems with the document or question supplied by the caller.
#[derive(Debug, Error)]
pub enum InputError {
    /// The document path does not exist.
    #[error("document not found: {}", path.display())]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The document exists but could not be read as UTF-8 text.
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        /// Requested path.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// The document contains no text.
    #[error("document is empty: {name}")]
    Empty {
        /// Document name (path or upload label).
        name: String,
    },

    /// An interactive question was blank.
    #[error("question cannot be empty")]
    EmptyQuestion,
}

/// Failures from the retrieval gateway.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The backend reported an error.
    #[error("similarity search failed: {message}")]
    Backend {
        /// Backend error message.
        message: String,
    },

    /// The search did not finish within the configured timeout.
    #[error("similarity search for {query:?} timed out after {timeout_ms}ms")]
    Timeout {
        /// Query that timed out.
        query: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },
}

/// Failures from the text-generation collaborator.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The provider API call failed.
    #[error("API request failed: {message}")]
    ApiRequest {
        /// Provider error message.
        message: String,
        /// HTTP status, when the provider exposes one.
        status: Option<u16>,
    },

    /// The provider answered with no usable text.
    #[error("empty response from {agent}")]
    EmptyResponse {
        /// Agent (role) that received the empty reply.
        agent: String,
    },

    /// The call did not finish within the configured timeout.
    #[error("{agent} timed out after {timeout_ms}ms")]
    Timeout {
        /// Agent (role) whose call timed out.
        agent: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was configured for the provider.
    #[error("API key missing: set OPENAI_API_KEY or CLAUSE_API_KEY")]
    ApiKeyMissing,

    /// The provider name is not recognised.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider {
        /// Requested provider name.
        name: String,
    },

    /// A setting is outside its allowed range.
    #[error("invalid {field}: {message}")]
    InvalidValue {
        /// Setting name.
        field: &'static str,
        /// What was wrong.
        message: String,
    },

    /// The domain profile table failed validation.
    #[error("invalid domain profiles: {message}")]
    InvalidProfiles {
        /// What was wrong.
        message: String,
    },

    /// The domain profile file could not be read or parsed.
    #[error("failed to load profiles from {}: {message}", path.display())]
    ProfileFile {
        /// Profile file path.
        path: PathBuf,
        /// Read or parse error.
        message: String,
    },
}
