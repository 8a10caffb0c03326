//! Provider registry and factory.
//!
//! Every supported vendor speaks the `OpenAI` chat-completions dialect, so
//! the registry is a table of presets over [`OpenAiProvider`]: a name and
//! the endpoint it talks to unless `base_url` overrides it.

use std::borrow::Cow;

use tracing::debug;

use crate::agent::config::AgentConfig;
use crate::agent::provider::LlmProvider;
use crate::agent::providers::OpenAiProvider;
use crate::error::ConfigError;

/// Known provider names and their default endpoints. `None` keeps the
/// `async-openai` default.
const PRESETS: &[(&str, Option<&str>)] = &[
    ("openai", None),
    ("groq", Some("https://api.groq.com/openai/v1")),
    (
        "gemini",
        Some("https://generativelanguage.googleapis.com/v1beta/openai"),
    ),
];

/// Creates an [`LlmProvider`] based on the configured provider name.
///
/// # Supported Providers
///
/// - `"openai"` (default)
/// - `"groq"`
/// - `"gemini"`, through Google's `OpenAI`-compatible endpoint
///
/// Names are matched case-insensitively. An explicit `base_url` wins over
/// the preset endpoint, which also covers local servers and proxies.
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedProvider`] for unknown provider names.
pub fn create_provider(config: &AgentConfig) -> Result<Box<dyn LlmProvider>, ConfigError> {
    let name = config.provider.trim().to_lowercase();
    let Some(&(_, endpoint)) = PRESETS.iter().find(|(preset, _)| *preset == name) else {
        return Err(ConfigError::UnsupportedProvider {
            name: config.provider.clone(),
        });
    };

    let config = match (endpoint, &config.base_url) {
        (Some(url), None) => {
            let mut resolved = config.clone();
            resolved.base_url = Some(url.to_string());
            Cow::Owned(resolved)
        }
        _ => Cow::Borrowed(config),
    };
    debug!(
        provider = %name,
        model = %config.model,
        base_url = config.base_url.as_deref().unwrap_or("default"),
        "creating provider"
    );
    Ok(Box::new(OpenAiProvider::new(&config)))
}

/// Names accepted by [`create_provider`].
pub fn supported_providers() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(name, _)| *name)
}
