use std::sync::Arc;
use std::time::Duration;

use log::warn;

use crate::config::{AiConfig, ProviderConfig};
use crate::error::NutritionError;
use crate::pipeline::NutritionAnalyzer;
use crate::providers::{LlmProvider, ProviderFactory, ProviderKind};

/// Builder for configuring a [`NutritionAnalyzer`]
#[derive(Default)]
pub struct NutritionAnalyzerBuilder {
    provider: Option<ProviderKind>,
    custom_provider: Option<Arc<dyn LlmProvider>>,
    config: Option<AiConfig>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl NutritionAnalyzerBuilder {
    /// Choose the model backend instead of the configured default
    ///
    /// # Example
    /// ```
    /// use recipe_nutrition::{NutritionAnalyzer, ProviderKind};
    ///
    /// let builder = NutritionAnalyzer::builder()
    ///     .provider(ProviderKind::OpenAI);
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use an already constructed provider, bypassing configuration
    pub fn with_provider(mut self, provider: impl LlmProvider + 'static) -> Self {
        self.custom_provider = Some(Arc::new(provider));
        self
    }

    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: AiConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the wall-clock ceiling for one analysis
    ///
    /// # Example
    /// ```
    /// use recipe_nutrition::NutritionAnalyzer;
    /// use std::time::Duration;
    ///
    /// let builder = NutritionAnalyzer::builder()
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a custom or proxy endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Build the analyzer
    ///
    /// A missing credential does not fail here; it is reported as a
    /// `Configuration` error by each analysis so that empty input is still
    /// rejected first.
    ///
    /// # Errors
    /// Returns `NutritionError::Config` if the configuration file or
    /// environment cannot be parsed.
    pub fn build(self) -> Result<NutritionAnalyzer, NutritionError> {
        if let Some(provider) = self.custom_provider {
            let timeout = self.timeout.unwrap_or(crate::pipeline::DEFAULT_TIMEOUT);
            return Ok(NutritionAnalyzer::new(provider, timeout));
        }

        let config = match self.config {
            Some(config) => config,
            None => AiConfig::load()?,
        };
        let timeout = self.timeout.unwrap_or_else(|| config.request_timeout());

        let provider_name = self
            .provider
            .map(|kind| kind.as_str().to_string())
            .unwrap_or_else(|| config.default_provider.clone());

        let mut provider_config = match config.providers.get(&provider_name) {
            Some(provider_config) => provider_config.clone(),
            None => match self.provider {
                Some(kind) => ProviderConfig::with_model(kind.default_model()),
                None => {
                    return Ok(NutritionAnalyzer::unconfigured(
                        format!(
                            "Default provider '{}' not found in configuration",
                            provider_name
                        ),
                        timeout,
                    ))
                }
            },
        };

        if let Some(api_key) = self.api_key {
            provider_config.api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            provider_config.model = model;
        }
        if let Some(base_url) = self.base_url {
            provider_config.base_url = Some(base_url);
        }

        match ProviderFactory::create(&provider_name, &provider_config) {
            Ok(provider) => Ok(NutritionAnalyzer::new(Arc::from(provider), timeout)),
            Err(e) => {
                warn!("Provider '{}' is unavailable: {}", provider_name, e);
                let reason = match e {
                    NutritionError::Configuration(reason) => reason,
                    other => other.to_string(),
                };
                Ok(NutritionAnalyzer::unconfigured(reason, timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> AiConfig {
        let mut config = AiConfig::default();
        if let Some(google) = config.providers.get_mut("google") {
            google.api_key = key.map(str::to_string);
        }
        config
    }

    #[test]
    fn test_build_with_configured_key() {
        let analyzer = NutritionAnalyzer::builder()
            .config(config_with_key(Some("test-key")))
            .build()
            .unwrap();

        assert_eq!(analyzer.provider_name(), Some("google"));
        assert_eq!(analyzer.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_build_provider_override_not_in_config() {
        let analyzer = NutritionAnalyzer::builder()
            .config(config_with_key(None))
            .provider(ProviderKind::Anthropic)
            .api_key("sk-ant-test")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(analyzer.provider_name(), Some("anthropic"));
        assert_eq!(analyzer.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_build_unknown_default_is_deferred() {
        let mut config = config_with_key(Some("test-key"));
        config.default_provider = "mistral".to_string();

        let analyzer = NutritionAnalyzer::builder().config(config).build().unwrap();
        assert!(analyzer.provider_name().is_none());
    }

    #[test]
    fn test_build_disabled_provider_is_deferred() {
        let mut config = config_with_key(Some("test-key"));
        if let Some(google) = config.providers.get_mut("google") {
            google.enabled = false;
        }

        let analyzer = NutritionAnalyzer::builder().config(config).build().unwrap();
        assert!(analyzer.provider_name().is_none());
    }
}
