//! Agent configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.
//! A missing API key is a startup error: no analysis runs without a
//! reachable text-generation collaborator.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

/// Default passages retrieved per planned task.
pub const DEFAULT_ROSTER_TOP_K: usize = 4;
/// Default passages retrieved for an interactive question.
pub const DEFAULT_QUERY_TOP_K: usize = 3;
/// Default generation model.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f32 = 0.1;
/// Default maximum tokens per finding.
const DEFAULT_MAX_TOKENS: u32 = 1024;
/// Default generation timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// Default retrieval timeout in seconds.
const DEFAULT_RETRIEVAL_TIMEOUT_SECS: u64 = 30;

/// Configuration for the analysis agents.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// LLM provider name (e.g., "openai").
    pub provider: String,
    /// API key for the provider.
    pub api_key: String,
    /// Optional base URL override (for proxies or compatible APIs).
    pub base_url: Option<String>,
    /// Model used by every specialist.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens for a finding.
    pub max_tokens: u32,
    /// Passages retrieved per planned task.
    pub roster_top_k: usize,
    /// Passages retrieved for an interactive question.
    pub query_top_k: usize,
    /// Generation call timeout.
    pub timeout: Duration,
    /// Retrieval call timeout.
    pub retrieval_timeout: Duration,
    /// Report a placeholder instead of calling the model when retrieval
    /// finds nothing.
    pub skip_empty_context: bool,
    /// Record a degraded finding for a failed task and keep going, instead
    /// of aborting the run.
    pub isolate_failures: bool,
    /// Directory containing prompt template files.
    ///
    /// Missing files fall back to compiled-in defaults.
    pub prompt_dir: Option<PathBuf>,
}

impl AgentConfig {
    /// Creates a new builder for `AgentConfig`.
    #[must_use]
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ApiKeyMissing`] if no API key is found.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().from_env().build()
    }
}

/// Builder for [`AgentConfig`].
#[derive(Debug, Clone, Default)]
pub struct AgentConfigBuilder {
    provider: Option<String>,
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    roster_top_k: Option<usize>,
    query_top_k: Option<usize>,
    timeout: Option<Duration>,
    retrieval_timeout: Option<Duration>,
    skip_empty_context: Option<bool>,
    isolate_failures: Option<bool>,
    prompt_dir: Option<PathBuf>,
}

impl AgentConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.provider.is_none() {
            self.provider = std::env::var("CLAUSE_PROVIDER").ok();
        }
        if self.api_key.is_none() {
            self.api_key = std::env::var("OPENAI_API_KEY")
                .or_else(|_| std::env::var("CLAUSE_API_KEY"))
                .ok();
        }
        if self.base_url.is_none() {
            self.base_url = std::env::var("OPENAI_BASE_URL")
                .or_else(|_| std::env::var("CLAUSE_BASE_URL"))
                .ok();
        }
        if self.model.is_none() {
            self.model = std::env::var("CLAUSE_MODEL").ok();
        }
        if self.roster_top_k.is_none() {
            self.roster_top_k = env_parse("CLAUSE_ROSTER_TOP_K");
        }
        if self.query_top_k.is_none() {
            self.query_top_k = env_parse("CLAUSE_QUERY_TOP_K");
        }
        if self.timeout.is_none() {
            self.timeout = env_parse("CLAUSE_TIMEOUT_SECS").map(Duration::from_secs);
        }
        if self.retrieval_timeout.is_none() {
            self.retrieval_timeout =
                env_parse("CLAUSE_RETRIEVAL_TIMEOUT_SECS").map(Duration::from_secs);
        }
        if self.isolate_failures.is_none() {
            self.isolate_failures = env_flag("CLAUSE_ISOLATE_FAILURES");
        }
        if self.prompt_dir.is_none() {
            self.prompt_dir = std::env::var("CLAUSE_PROMPT_DIR").ok().map(PathBuf::from);
        }
        self
    }

    /// Sets the LLM provider name.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL override.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the generation model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    /// Sets the max tokens per finding.
    #[must_use]
    pub const fn max_tokens(mut self, n: u32) -> Self {
        self.max_tokens = Some(n);
        self
    }

    /// Sets the passages retrieved per planned task.
    #[must_use]
    pub const fn roster_top_k(mut self, k: usize) -> Self {
        self.roster_top_k = Some(k);
        self
    }

    /// Sets the passages retrieved per interactive question.
    #[must_use]
    pub const fn query_top_k(mut self, k: usize) -> Self {
        self.query_top_k = Some(k);
        self
    }

    /// Sets the generation timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the retrieval timeout.
    #[must_use]
    pub const fn retrieval_timeout(mut self, duration: Duration) -> Self {
        self.retrieval_timeout = Some(duration);
        self
    }

    /// Enables or disables the empty-context placeholder shortcut.
    #[must_use]
    pub const fn skip_empty_context(mut self, skip: bool) -> Self {
        self.skip_empty_context = Some(skip);
        self
    }

    /// Enables or disables per-task failure isolation.
    #[must_use]
    pub const fn isolate_failures(mut self, isolate: bool) -> Self {
        self.isolate_failures = Some(isolate);
        self
    }

    /// Sets the prompt template directory.
    #[must_use]
    pub fn prompt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompt_dir = Some(dir.into());
        self
    }

    /// Builds the [`AgentConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ApiKeyMissing`] if no API key was set, or
    /// [`ConfigError::InvalidValue`] if a top-k is zero.
    pub fn build(self) -> Result<AgentConfig, ConfigError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::ApiKeyMissing)?;
        let roster_top_k = positive("roster_top_k", self.roster_top_k, DEFAULT_ROSTER_TOP_K)?;
        let query_top_k = positive("query_top_k", self.query_top_k, DEFAULT_QUERY_TOP_K)?;

        Ok(AgentConfig {
            provider: self.provider.unwrap_or_else(|| "openai".to_string()),
            api_key,
            base_url: self.base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            roster_top_k,
            query_top_k,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            retrieval_timeout: self
                .retrieval_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_RETRIEVAL_TIMEOUT_SECS)),
            skip_empty_context: self.skip_empty_context.unwrap_or(true),
            isolate_failures: self.isolate_failures.unwrap_or(false),
            prompt_dir: self.prompt_dir,
        })
    }
}

/// Resolves a top-k setting, rejecting zero.
fn positive(field: &'static str, value: Option<usize>, default: usize) -> Result<usize, ConfigError> {
    match value.unwrap_or(default) {
        0 => Err(ConfigError::InvalidValue {
            field,
            message: "must be at least 1".to_string(),
        }),
        k => Ok(k),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(variable = key, value = %raw, "ignoring unparsable environment value");
    }
    parsed
}

fn env_flag(key: &str) -> Option<bool> {
    let raw = std::env::var(key).ok()?;
    let parsed = parse_flag(&raw);
    if parsed.is_none() {
        warn!(variable = key, value = %raw, "ignoring unrecognised boolean value");
    }
    parsed
}

/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`, in any case.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_builder_defaults() {
        let config = AgentConfig::builder()
            .api_key("test-key")
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.provider, "openai");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.roster_top_k, 4);
        assert_eq!(config.query_top_k, 3);
        assert!(config.skip_empty_context);
        assert!(!config.isolate_failures);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_builder_missing_api_key() {
        let result = AgentConfig::builder().build();
        assert!(matches!(result, Err(ConfigError::ApiKeyMissing)));
    }

    #[test]
    fn test_builder_blank_api_key() {
        let result = AgentConfig::builder().api_key("   ").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_zero_top_k() {
        let roster = AgentConfig::builder().api_key("key").roster_top_k(0).build();
        assert!(matches!(
            roster,
            Err(ConfigError::InvalidValue { field: "roster_top_k", .. })
        ));
        let query = AgentConfig::builder().api_key("key").query_top_k(0).build();
        assert!(matches!(
            query,
            Err(ConfigError::InvalidValue { field: "query_top_k", .. })
        ));
    }

    #[test_case("true", Some(true) ; "lowercase true")]
    #[test_case("1", Some(true) ; "one")]
    #[test_case(" YES ", Some(true) ; "padded yes")]
    #[test_case("on", Some(true) ; "on")]
    #[test_case("0", Some(false) ; "zero")]
    #[test_case("No", Some(false) ; "no")]
    #[test_case("sometimes", None ; "unrecognised")]
    fn test_parse_flag(raw: &str, expected: Option<bool>) {
        assert_eq!(parse_flag(raw), expected);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AgentConfig::builder()
            .api_key("key")
            .provider("custom")
            .model("llama-3.1-8b-instant")
            .roster_top_k(6)
            .query_top_k(2)
            .timeout(Duration::from_secs(30))
            .retrieval_timeout(Duration::from_secs(5))
            .isolate_failures(true)
            .skip_empty_context(false)
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.provider, "custom");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.roster_top_k, 6);
        assert_eq!(config.query_top_k, 2);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retrieval_timeout, Duration::from_secs(5));
        assert!(config.isolate_failures);
        assert!(!config.skip_empty_context);
    }
}
