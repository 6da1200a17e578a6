mod anthropic;
mod factory;
mod google;
mod open_ai;

pub use anthropic::AnthropicProvider;
pub use factory::{ProviderFactory, ProviderKind};
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;

use async_trait::async_trait;
use reqwest::Response;

use crate::config::ProviderConfig;
use crate::error::NutritionError;

/// Unified trait for all text-generation backends
///
/// A provider is a text-in, text-out collaborator: it sends a prompt and
/// returns the raw completion without interpreting it.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send a prompt and return the raw completion text
    async fn complete(&self, prompt: &str) -> Result<String, NutritionError>;
}

/// Take the key from config first, then from the first set environment variable.
///
/// Empty strings count as missing.
pub(crate) fn resolve_api_key(
    config: &ProviderConfig,
    env_vars: &[&str],
) -> Result<String, NutritionError> {
    config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            env_vars
                .iter()
                .filter_map(|name| std::env::var(name).ok())
                .find(|key| !key.trim().is_empty())
        })
        .ok_or_else(|| {
            NutritionError::Configuration(format!(
                "{} not found in config or environment",
                env_vars.join(" / ")
            ))
        })
}

/// Fail with the status and body text when the backend did not return 2xx
pub(crate) async fn ensure_success(
    provider: &str,
    response: Response,
) -> Result<Response, NutritionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(NutritionError::Upstream(format!(
        "{} returned {}: {}",
        provider, status, body
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_prefers_config() {
        let mut config = ProviderConfig::with_model("m");
        config.api_key = Some("from-config".to_string());
        let key = resolve_api_key(&config, &["RECIPE_NUTRITION_TEST_UNSET_KEY"]).unwrap();
        assert_eq!(key, "from-config");
    }

    #[test]
    fn test_resolve_api_key_reads_environment() {
        std::env::set_var("RECIPE_NUTRITION_TEST_PRESENT_KEY", "from-env");
        let config = ProviderConfig::with_model("m");
        let key = resolve_api_key(
            &config,
            &[
                "RECIPE_NUTRITION_TEST_UNSET_KEY",
                "RECIPE_NUTRITION_TEST_PRESENT_KEY",
            ],
        )
        .unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_resolve_api_key_blank_is_missing() {
        let mut config = ProviderConfig::with_model("m");
        config.api_key = Some("   ".to_string());
        let result = resolve_api_key(&config, &["RECIPE_NUTRITION_TEST_UNSET_KEY"]);
        match result {
            Err(NutritionError::Configuration(msg)) => {
                assert!(msg.contains("RECIPE_NUTRITION_TEST_UNSET_KEY"))
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }
}
