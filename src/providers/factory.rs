use std::fmt;
use std::str::FromStr;

use crate::config::{AiConfig, ProviderConfig};
use crate::error::NutritionError;
use crate::providers::{AnthropicProvider, GoogleProvider, LlmProvider, OpenAIProvider};

/// Supported model backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    /// Provider name string used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Model used when the configuration does not name one
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Google => crate::config::default_google_model(),
            ProviderKind::OpenAI => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-haiku-latest",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" | "gemini" => Ok(ProviderKind::Google),
            "openai" => Ok(ProviderKind::OpenAI),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(NutritionError::Configuration(format!(
                "Unknown provider: {} (expected one of: {})",
                other,
                ProviderFactory::available_providers().join(", ")
            ))),
        }
    }
}

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LlmProvider>, NutritionError> {
        let kind: ProviderKind = provider_name.parse()?;

        // Validate that provider is enabled
        if !config.enabled {
            return Err(NutritionError::Configuration(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        // An entry that only sets a key (e.g. from the environment) keeps the stock model
        let config = if config.model.trim().is_empty() {
            ProviderConfig {
                model: kind.default_model().to_string(),
                ..config.clone()
            }
        } else {
            config.clone()
        };

        match kind {
            ProviderKind::Google => Ok(Box::new(GoogleProvider::new(&config)?)),
            ProviderKind::OpenAI => Ok(Box::new(OpenAIProvider::new(&config)?)),
            ProviderKind::Anthropic => Ok(Box::new(AnthropicProvider::new(&config)?)),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(config: &AiConfig) -> Result<Box<dyn LlmProvider>, NutritionError> {
        let provider_name = &config.default_provider;
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            NutritionError::Configuration(format!(
                "Default provider '{}' not found in configuration",
                provider_name
            ))
        })?;

        Self::create(provider_name, provider_config)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai", "anthropic"]
    }
}
